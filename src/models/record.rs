//! Attendance record model.
//!
//! One [`AttendanceRecord`] describes one calendar day: when work ended, how
//! overtime is compensated, whether the day was a holiday or a leave day,
//! travel, and bonuses. Records deserialize leniently (see the crate-level
//! notes on failure semantics): a bad field takes its default instead of
//! rejecting the record.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::lenient;
use super::summary::saturating_sum;

/// How overtime hours on a working day are compensated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtType {
    /// Paid out in cash at the tiered overtime rates.
    #[default]
    Paid,
    /// Banked as comp-leave units instead of cash.
    Internal,
    /// The day is tagged as leave; overtime earns neither cash nor units.
    Leave,
}

impl OtType {
    /// Reads a stored tag. Unknown tags fall back to [`OtType::Paid`].
    ///
    /// ```
    /// use overtime_ledger::models::OtType;
    ///
    /// assert_eq!(OtType::from_tag("internal"), OtType::Internal);
    /// assert_eq!(OtType::from_tag("補休"), OtType::Internal);
    /// assert_eq!(OtType::from_tag("whatever"), OtType::Paid);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "internal" | "in_lieu" | "inlieu" | "comp" | "補休" => OtType::Internal,
            "leave" | "請假" => OtType::Leave,
            _ => OtType::Paid,
        }
    }
}

/// The kind of leave taken on a leave day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    /// Statutory annual leave; already covered by the monthly base.
    Annual,
    /// Department comp-leave, debited from the comp-leave bank.
    Comp,
    /// Personal leave without pay.
    Personal,
    /// Sick leave.
    Sick,
    /// Official leave (jury duty, civic duties).
    Official,
    /// Any tag this ledger does not recognise.
    Other,
}

impl LeaveType {
    /// Reads a stored tag, accepting the English names and the labels used by
    /// the calendar UI.
    ///
    /// ```
    /// use overtime_ledger::models::LeaveType;
    ///
    /// assert_eq!(LeaveType::from_tag("annual"), LeaveType::Annual);
    /// assert_eq!(LeaveType::from_tag("部門補休"), LeaveType::Comp);
    /// assert_eq!(LeaveType::from_tag("sabbatical"), LeaveType::Other);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "annual" | "statutory" | "特休" => LeaveType::Annual,
            "comp" | "comp_leave" | "compleave" | "department_comp" | "補休" | "部門補休" => {
                LeaveType::Comp
            }
            "personal" | "unpaid" | "事假" => LeaveType::Personal,
            "sick" | "病假" => LeaveType::Sick,
            "official" | "公假" => LeaveType::Official,
            _ => LeaveType::Other,
        }
    }
}

/// One bonus paid on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BonusEntry {
    /// The amount in local currency.
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Decimal,
    /// Free-form category (e.g. "performance", "festival").
    pub category: String,
    /// Free-form note.
    pub note: String,
}

/// One calendar day of attendance data.
///
/// # Example
///
/// ```
/// use overtime_ledger::models::{AttendanceRecord, OtType};
/// use chrono::{NaiveDate, NaiveTime};
///
/// let record: AttendanceRecord = serde_json::from_str(
///     r#"{"date": "2024-06-03", "endTime": "20:00", "otHours": "", "otType": "paid"}"#,
/// ).unwrap();
///
/// assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 6, 3));
/// assert_eq!(record.end_time, NaiveTime::from_hms_opt(20, 0, 0));
/// assert_eq!(record.ot_hours, None);
/// assert_eq!(record.ot_type, OtType::Paid);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AttendanceRecord {
    /// The calendar day. `None` when the stored value could not be read;
    /// such records are left out of aggregation.
    #[serde(deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Clock-out time.
    #[serde(deserialize_with = "lenient::time")]
    pub end_time: Option<NaiveTime>,
    /// Explicit overtime hours; when absent or zero they are derived from
    /// `end_time`.
    #[serde(deserialize_with = "lenient::decimal")]
    pub ot_hours: Option<Decimal>,
    /// How overtime is compensated.
    #[serde(deserialize_with = "lenient::ot_type")]
    pub ot_type: OtType,
    /// Manual holiday override. `None` defers to the holiday oracle.
    #[serde(deserialize_with = "lenient::flag")]
    pub is_holiday: Option<bool>,
    /// Whether the day is a leave day.
    #[serde(deserialize_with = "lenient::switch")]
    pub is_leave: bool,
    /// The kind of leave, when `is_leave` is set.
    #[serde(deserialize_with = "lenient::leave_type")]
    pub leave_type: Option<LeaveType>,
    /// Hours of leave taken. `None` on a leave day means a full day.
    #[serde(deserialize_with = "lenient::decimal")]
    pub leave_duration: Option<Decimal>,
    /// Country travelled to, as typed by the user.
    #[serde(alias = "country", deserialize_with = "lenient::text")]
    pub travel_country: Option<String>,
    /// Scalar bonus; mirrors the sum of `bonus_entries` when there are any.
    #[serde(deserialize_with = "lenient::decimal")]
    pub bonus: Option<Decimal>,
    /// Itemised bonuses.
    pub bonus_entries: Vec<BonusEntry>,
}

/// Hours in a full leave day.
pub const FULL_LEAVE_DAY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

impl AttendanceRecord {
    /// An otherwise empty record for `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// The day's bonus: the sum of entries when there are any, else the
    /// scalar field. Never negative.
    pub fn bonus_total(&self) -> Decimal {
        let total = if self.bonus_entries.is_empty() {
            self.bonus.unwrap_or(Decimal::ZERO)
        } else {
            saturating_sum(self.bonus_entries.iter().map(|entry| entry.amount))
        };
        total.max(Decimal::ZERO)
    }

    /// Sets the scalar bonus to the sum of the entries, if there are entries.
    pub fn sync_bonus(&mut self) {
        if !self.bonus_entries.is_empty() {
            self.bonus = Some(saturating_sum(self.bonus_entries.iter().map(|entry| entry.amount)));
        }
    }

    /// Hours of leave on this day: the recorded duration (floored at zero),
    /// or a full day when none was recorded.
    pub fn leave_hours(&self) -> Decimal {
        self.leave_duration
            .map(|hours| hours.max(Decimal::ZERO))
            .unwrap_or(FULL_LEAVE_DAY_HOURS)
    }

    /// The leave type, defaulting to statutory annual leave.
    pub fn effective_leave_type(&self) -> LeaveType {
        self.leave_type.unwrap_or(LeaveType::Annual)
    }

    /// The travel destination as typed, if any.
    pub fn travel_country(&self) -> Option<&str> {
        self.travel_country
            .as_deref()
            .map(str::trim)
            .filter(|country| !country.is_empty())
    }
}

/// The document shape served by the remote record store: `{ "data": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSheet {
    /// One entry per stored row.
    #[serde(default)]
    pub data: Vec<AttendanceRecord>,
}

impl RecordSheet {
    /// Parses a sheet document, dropping rows that are not JSON objects.
    ///
    /// ```
    /// use overtime_ledger::models::RecordSheet;
    ///
    /// let sheet = RecordSheet::parse(r#"{"data": [{"date": "2024-06-03"}, 42]}"#).unwrap();
    /// assert_eq!(sheet.data.len(), 1);
    /// ```
    pub fn parse(json: &str) -> EngineResult<Self> {
        #[derive(Deserialize)]
        struct RawSheet {
            #[serde(default)]
            data: Vec<serde_json::Value>,
        }

        let raw: RawSheet =
            serde_json::from_str(json).map_err(|err| EngineError::InvalidSheet {
                message: err.to_string(),
            })?;

        let data = raw
            .data
            .into_iter()
            .enumerate()
            .filter_map(|(row, value)| {
                if !value.is_object() {
                    warn!(row, "dropping sheet row that is not an object");
                    return None;
                }
                serde_json::from_value(value)
                    .inspect_err(|err| warn!(row, error = %err, "dropping unreadable sheet row"))
                    .ok()
            })
            .collect();

        Ok(Self { data })
    }
}

/// Inserts `record`, replacing any record already stored for the same date.
///
/// Returns `false` (and leaves `records` untouched) when the record has no
/// date, since it could never be found again.
pub fn upsert_record(records: &mut Vec<AttendanceRecord>, record: AttendanceRecord) -> bool {
    let Some(date) = record.date else {
        warn!("refusing to store a record without a date");
        return false;
    };
    match records.iter_mut().find(|existing| existing.date == Some(date)) {
        Some(existing) => *existing = record,
        None => records.push(record),
    }
    true
}

/// Removes the record for `date`. Returns whether one was removed.
pub fn remove_record(records: &mut Vec<AttendanceRecord>, date: NaiveDate) -> bool {
    let before = records.len();
    records.retain(|record| record.date != Some(date));
    records.len() != before
}
