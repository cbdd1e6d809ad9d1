//! Calendar date normalisation and date ranges.
//!
//! Every place that compares a record's date goes through [`normalize_date`],
//! so a value stored as `"2024-06-03"`, `"2024-06-03T00:00:00.000Z"` or a
//! spreadsheet timestamp all land on the same calendar day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A date as it may arrive from the record store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateValue<'a> {
    /// Already a calendar date.
    Date(NaiveDate),
    /// A date with a time-of-day component, which is dropped.
    DateTime(NaiveDateTime),
    /// Milliseconds since the Unix epoch (UTC).
    EpochMillis(i64),
    /// Free text such as `2024-06-03`, `2024/6/3` or an ISO timestamp.
    Text(&'a str),
}

impl From<NaiveDate> for DateValue<'_> {
    fn from(date: NaiveDate) -> Self {
        DateValue::Date(date)
    }
}

impl From<NaiveDateTime> for DateValue<'_> {
    fn from(datetime: NaiveDateTime) -> Self {
        DateValue::DateTime(datetime)
    }
}

impl<'a> From<&'a str> for DateValue<'a> {
    fn from(text: &'a str) -> Self {
        DateValue::Text(text)
    }
}

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

/// Normalises any supported date value to a calendar date.
///
/// Time-of-day components are truncated, never converted between zones: the
/// calendar day written in the value is the calendar day returned.
///
/// # Examples
///
/// ```
/// use overtime_ledger::models::normalize_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
/// assert_eq!(normalize_date("2024-06-03").unwrap(), expected);
/// assert_eq!(normalize_date("2024-06-03T21:45:00.000Z").unwrap(), expected);
/// assert_eq!(normalize_date("2024/6/3").unwrap(), expected);
/// assert!(normalize_date("next tuesday").is_err());
/// ```
pub fn normalize_date<'a>(value: impl Into<DateValue<'a>>) -> EngineResult<NaiveDate> {
    match value.into() {
        DateValue::Date(date) => Ok(date),
        DateValue::DateTime(datetime) => Ok(datetime.date()),
        DateValue::EpochMillis(millis) => DateTime::from_timestamp_millis(millis)
            .map(|dt| dt.date_naive())
            .ok_or_else(|| EngineError::InvalidDate {
                value: millis.to_string(),
            }),
        DateValue::Text(text) => parse_date_text(text),
    }
}

fn parse_date_text(text: &str) -> EngineResult<NaiveDate> {
    let trimmed = text.trim();
    let date_part = trimmed
        .split(['T', ' '])
        .next()
        .unwrap_or_default();

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
        .ok_or_else(|| EngineError::InvalidDate {
            value: text.to_string(),
        })
}

/// Parses a wall-clock time of day.
///
/// Accepts `HH:MM` and `HH:MM:SS`. Spreadsheet cells formatted as times come
/// back as full timestamps on the 1899-12-30 epoch; for those the part after
/// the `T` is used.
///
/// ```
/// use overtime_ledger::models::parse_time_of_day;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_time_of_day("20:00").unwrap(), NaiveTime::from_hms_opt(20, 0, 0).unwrap());
/// assert_eq!(
///     parse_time_of_day("1899-12-30T19:15:00.000Z").unwrap(),
///     NaiveTime::from_hms_opt(19, 15, 0).unwrap()
/// );
/// ```
pub fn parse_time_of_day(text: &str) -> EngineResult<NaiveTime> {
    let trimmed = text.trim();
    let clock = match trimmed.split_once('T') {
        Some((_, time)) => time.get(..8).unwrap_or(time),
        None => trimmed,
    };

    NaiveTime::parse_from_str(clock, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(clock, "%H:%M"))
        .map_err(|_| EngineError::InvalidTime {
            value: text.to_string(),
        })
}

/// A calendar month, used to bucket records and to look up salary history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a month, or `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The month containing `date`.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 to 12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    /// The following month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Number of calendar months from `self` to `later`, counting both ends.
    ///
    /// Returns 0 when `later` is before `self`.
    pub fn months_until_inclusive(&self, later: YearMonth) -> u32 {
        let from = self.year as i64 * 12 + self.month as i64;
        let to = later.year as i64 * 12 + later.month as i64;
        u32::try_from(to - from + 1).unwrap_or(0)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidDate {
            value: s.to_string(),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        YearMonth::new(year, month).ok_or_else(invalid)
    }
}

impl From<YearMonth> for String {
    fn from(month: YearMonth) -> Self {
        month.to_string()
    }
}

impl TryFrom<String> for YearMonth {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use overtime_ledger::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
/// );
/// assert!(range.contains(NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start: NaiveDate,
    /// Last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from `start` to `end`, both inclusive.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The whole of one calendar month.
    pub fn month(month: YearMonth) -> Self {
        Self::new(month.first_day(), month.last_day())
    }

    /// The trailing 365-day window ending on `today`.
    pub fn rolling_year(today: NaiveDate) -> Self {
        let start = today.checked_sub_days(Days::new(365)).unwrap_or(today);
        Self::new(start, today)
    }

    /// Whether `date` falls inside the range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Every calendar month the range touches, in order. Empty when the
    /// range is inverted.
    pub fn months(&self) -> Vec<YearMonth> {
        if self.start > self.end {
            return Vec::new();
        }
        let last = YearMonth::of(self.end);
        let mut months = Vec::new();
        let mut current = YearMonth::of(self.start);
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }
}
