//! Forgiving deserializers for record fields.
//!
//! Records come from a spreadsheet round-tripped through JSON, so numbers
//! arrive as strings, booleans as `"TRUE"`, and empty cells as `""`. Nothing
//! here fails: a value that cannot be understood becomes the field's default.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use tracing::debug;

use super::dates::{DateValue, normalize_date, parse_time_of_day};
use super::record::{LeaveType, OtType};

/// Any scalar a spreadsheet cell can turn into.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Other(IgnoredAny),
}

fn cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Cell>, D::Error> {
    Option::<Cell>::deserialize(deserializer)
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Largest magnitude a numeric cell may carry (10^12). Anything beyond is a
/// typo, and keeping it would only overflow the pay arithmetic downstream.
pub(crate) const MAX_CELL_MAGNITUDE: Decimal =
    Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

fn within_bounds(value: Decimal) -> Option<Decimal> {
    if value.abs() <= MAX_CELL_MAGNITUDE {
        Some(value)
    } else {
        debug!(value = %value, "number out of range");
        None
    }
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .inspect_err(|_| debug!(value = %text, "unparseable number"))
        .ok()
        .and_then(within_bounds)
}

/// A numeric cell: `None` when blank, `Some(None)` when it holds something
/// that is not a usable number.
fn numeric(cell: Option<Cell>) -> Option<Option<Decimal>> {
    match cell? {
        Cell::Int(value) => Some(within_bounds(Decimal::from(value))),
        Cell::Float(value) => Some(parse_decimal(&value.to_string())),
        Cell::Text(text) => non_empty(&text).map(parse_decimal),
        Cell::Bool(_) | Cell::Other(_) => Some(None),
    }
}

/// Numbers, numeric strings, or nothing. Garbage and out-of-range values
/// read as zero.
pub(crate) fn decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    Ok(numeric(cell(deserializer)?).map(|value| value.unwrap_or(Decimal::ZERO)))
}

/// A numeric setting. Blank, garbage and out-of-range values all read as
/// "not set", so the caller's default applies.
pub(crate) fn setting<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    Ok(match numeric(cell(deserializer)?) {
        Some(Some(value)) => Some(value),
        Some(None) => {
            debug!("unusable setting left at its default");
            None
        }
        None => None,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Section<T> {
    Given(T),
    Unreadable(IgnoredAny),
}

/// A whole settings section; `null` or a value of the wrong shape reads as
/// the section's defaults.
pub(crate) fn section<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(match Option::<Section<T>>::deserialize(deserializer)? {
        Some(Section::Given(value)) => value,
        Some(Section::Unreadable(_)) => {
            debug!("unreadable settings section left at its defaults");
            T::default()
        }
        None => T::default(),
    })
}

/// Like [`decimal`] but for fields that always have a value.
pub(crate) fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(decimal(deserializer)?.unwrap_or(Decimal::ZERO))
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Some(true),
        "false" | "no" | "n" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Booleans, `"TRUE"`/`"false"`, 0/1. Unknown or empty is "not set".
pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(match cell(deserializer)? {
        Some(Cell::Bool(value)) => Some(value),
        Some(Cell::Int(value)) => Some(value != 0),
        Some(Cell::Float(value)) => Some(value != 0.0),
        Some(Cell::Text(text)) => non_empty(&text).and_then(parse_flag),
        Some(Cell::Other(_)) | None => None,
    })
}

/// A flag where "not set" means `false`.
pub(crate) fn switch<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(flag(deserializer)?.unwrap_or(false))
}

/// Dates go through the canonical normaliser; anything else is "no date".
pub(crate) fn date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let parsed = match cell(deserializer)? {
        Some(Cell::Text(text)) => normalize_date(text.as_str()),
        Some(Cell::Int(millis)) => normalize_date(DateValue::EpochMillis(millis)),
        Some(Cell::Float(millis)) if millis.fract() == 0.0 && millis.abs() < 1e15 => {
            normalize_date(DateValue::EpochMillis(millis as i64))
        }
        _ => return Ok(None),
    };
    Ok(parsed
        .inspect_err(|err| debug!(error = %err, "record date left unset"))
        .ok())
}

pub(crate) fn time<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveTime>, D::Error> {
    Ok(match cell(deserializer)? {
        Some(Cell::Text(text)) => non_empty(&text).and_then(|text| {
            parse_time_of_day(text)
                .inspect_err(|err| debug!(error = %err, "time of day ignored"))
                .ok()
        }),
        _ => None,
    })
}

pub(crate) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match cell(deserializer)? {
        Some(Cell::Text(text)) => non_empty(&text).map(str::to_string),
        _ => None,
    })
}

pub(crate) fn ot_type<'de, D: Deserializer<'de>>(deserializer: D) -> Result<OtType, D::Error> {
    Ok(match cell(deserializer)? {
        Some(Cell::Text(text)) => OtType::from_tag(&text),
        _ => OtType::default(),
    })
}

pub(crate) fn leave_type<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<LeaveType>, D::Error> {
    Ok(match cell(deserializer)? {
        Some(Cell::Text(text)) => non_empty(&text).map(LeaveType::from_tag),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Cells {
        #[serde(default, deserialize_with = "decimal")]
        number: Option<Decimal>,
        #[serde(default, deserialize_with = "flag")]
        toggle: Option<bool>,
        #[serde(default, deserialize_with = "setting")]
        setting: Option<Decimal>,
        #[serde(default, deserialize_with = "date")]
        date: Option<NaiveDate>,
    }

    fn read(json: &str) -> Cells {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_decimal_accepts_numbers_and_numeric_strings() {
        assert_eq!(read(r#"{"number": 2.5}"#).number, Some(Decimal::new(25, 1)));
        assert_eq!(read(r#"{"number": 3}"#).number, Some(Decimal::from(3)));
        assert_eq!(read(r#"{"number": " 1.25 "}"#).number, Some(Decimal::new(125, 2)));
    }

    #[test]
    fn test_decimal_garbage_is_zero_and_blank_is_absent() {
        assert_eq!(read(r#"{"number": "abc"}"#).number, Some(Decimal::ZERO));
        assert_eq!(read(r#"{"number": [1, 2]}"#).number, Some(Decimal::ZERO));
        assert_eq!(read(r#"{"number": ""}"#).number, None);
        assert_eq!(read(r#"{"number": null}"#).number, None);
        assert_eq!(read("{}").number, None);
    }

    #[test]
    fn test_flag_spellings() {
        assert_eq!(read(r#"{"toggle": true}"#).toggle, Some(true));
        assert_eq!(read(r#"{"toggle": "TRUE"}"#).toggle, Some(true));
        assert_eq!(read(r#"{"toggle": 0}"#).toggle, Some(false));
        assert_eq!(read(r#"{"toggle": "maybe"}"#).toggle, None);
        assert_eq!(read(r#"{"toggle": ""}"#).toggle, None);
    }

    #[test]
    fn test_magnitude_bound_is_one_trillion() {
        assert_eq!(MAX_CELL_MAGNITUDE, Decimal::from(1_000_000_000_000i64));
    }

    #[test]
    fn test_decimal_accepts_scientific_notation_in_range() {
        assert_eq!(read(r#"{"number": "2.5e2"}"#).number, Some(Decimal::from(250)));
        assert_eq!(read(r#"{"number": "1e12"}"#).number, Some(MAX_CELL_MAGNITUDE));
    }

    #[test]
    fn test_decimal_out_of_range_is_zero() {
        assert_eq!(read(r#"{"number": "1e27"}"#).number, Some(Decimal::ZERO));
        assert_eq!(read(r#"{"number": "-5e28"}"#).number, Some(Decimal::ZERO));
        assert_eq!(read(r#"{"number": "1e40"}"#).number, Some(Decimal::ZERO));
        assert_eq!(read(r#"{"number": 9000000000000000000}"#).number, Some(Decimal::ZERO));
        assert_eq!(read(r#"{"number": 1e300}"#).number, Some(Decimal::ZERO));
    }

    #[test]
    fn test_setting_unusable_is_unset() {
        assert_eq!(read(r#"{"setting": "60000"}"#).setting, Some(Decimal::from(60000)));
        assert_eq!(read(r#"{"setting": ""}"#).setting, None);
        assert_eq!(read(r#"{"setting": null}"#).setting, None);
        assert_eq!(read(r#"{"setting": "lots"}"#).setting, None);
        assert_eq!(read(r#"{"setting": "5e28"}"#).setting, None);
        assert_eq!(read(r#"{"setting": true}"#).setting, None);
    }

    #[test]
    fn test_date_accepts_whole_float_epoch_millis() {
        let expected = NaiveDate::from_ymd_opt(2024, 6, 3);
        assert_eq!(read(r#"{"date": 1717372800000}"#).date, expected);
        assert_eq!(read(r#"{"date": 1717372800000.0}"#).date, expected);
        assert_eq!(read(r#"{"date": 1717372800000.5}"#).date, None);
    }
}
