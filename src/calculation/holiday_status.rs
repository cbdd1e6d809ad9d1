//! Holiday status resolution.
//!
//! A record's own `isHoliday` flag is a manual override and always wins.
//! Otherwise the holiday oracle is asked, once, about the record's date.

use tracing::warn;

use crate::holidays::HolidayOracle;
use crate::models::{AttendanceRecord, AuditStep};

/// Whether a record's day counts as a holiday, and its name when known.
#[derive(Debug, Clone)]
pub struct HolidayStatusResult {
    /// Whether the holiday multiplier applies.
    pub is_holiday: bool,
    /// The holiday's name, when the oracle supplied one.
    pub name: Option<String>,
    /// The audit step recording the decision.
    pub audit_step: AuditStep,
}

/// Decides whether `record` falls on a holiday.
///
/// An oracle failure is logged and treated as "not a holiday". Undated
/// records without an override are never holidays.
pub fn resolve_holiday_status(
    record: &AttendanceRecord,
    oracle: &dyn HolidayOracle,
    step_number: u32,
) -> HolidayStatusResult {
    let (is_holiday, name, source, reasoning) = match (record.is_holiday, record.date) {
        (Some(flag), _) => (
            flag,
            None,
            "record_override",
            format!("Record explicitly marks the day as {}a holiday", if flag { "" } else { "not " }),
        ),
        (None, Some(date)) => match oracle.lookup(date) {
            Ok(Some(holiday)) => {
                let reasoning = format!("{} is a public holiday ({})", date, holiday.name);
                (true, Some(holiday.name), "oracle", reasoning)
            }
            Ok(None) => (
                false,
                None,
                "oracle",
                format!("{} is not a public holiday", date),
            ),
            Err(err) => {
                warn!(%date, error = %err, "holiday lookup failed, treating day as ordinary");
                (
                    false,
                    None,
                    "oracle_failure",
                    format!("Holiday lookup failed for {}; treated as not a holiday", date),
                )
            }
        },
        (None, None) => (
            false,
            None,
            "undated",
            "Record has no date; not a holiday".to_string(),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "holiday_status".to_string(),
        rule_name: "Holiday Status".to_string(),
        input: serde_json::json!({
            "date": record.date.map(|d| d.to_string()),
            "is_holiday_override": record.is_holiday
        }),
        output: serde_json::json!({
            "is_holiday": is_holiday,
            "name": name,
            "source": source
        }),
        reasoning,
    };

    HolidayStatusResult {
        is_holiday,
        name,
        audit_step,
    }
}
