//! Overtime hours derivation.
//!
//! A record either states its overtime hours or carries a clock-out time from
//! which they are derived against the standard end of day.

use chrono::NaiveTime;
use rust_decimal::Decimal;

use crate::config::OvertimeRules;
use crate::models::{AttendanceRecord, AuditStep, HoursSource};

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The resolved overtime hours for a record, with where they came from.
#[derive(Debug, Clone)]
pub struct OvertimeHoursResult {
    /// Overtime hours, never negative.
    pub hours: Decimal,
    /// Whether the hours were stated, derived, or absent.
    pub source: HoursSource,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Hours worked past `standard_end_time`, at minute precision.
///
/// Both times are within the same day; leaving at or before the standard
/// end yields zero.
///
/// # Example
///
/// ```
/// use chrono::NaiveTime;
/// use overtime_ledger::calculation::derive_overtime_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let standard = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
///
/// let late = NaiveTime::from_hms_opt(20, 0, 0).unwrap();
/// assert_eq!(derive_overtime_hours(late, standard), Decimal::from_str("2.5").unwrap());
///
/// let early = NaiveTime::from_hms_opt(17, 0, 0).unwrap();
/// assert_eq!(derive_overtime_hours(early, standard), Decimal::ZERO);
/// ```
pub fn derive_overtime_hours(end_time: NaiveTime, standard_end_time: NaiveTime) -> Decimal {
    let minutes = (end_time - standard_end_time).num_minutes();
    if minutes <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(minutes) / MINUTES_PER_HOUR
}

/// Resolves a record's overtime hours.
///
/// A positive `ot_hours` on the record is used as is. Otherwise the hours are
/// derived from `end_time`, and with neither the result is zero.
pub fn resolve_overtime_hours(
    record: &AttendanceRecord,
    rules: &OvertimeRules,
    step_number: u32,
) -> OvertimeHoursResult {
    let explicit = record.ot_hours.filter(|hours| *hours > Decimal::ZERO);

    let (hours, source, reasoning) = match (explicit, record.end_time) {
        (Some(hours), _) => (
            hours,
            HoursSource::Explicit,
            format!("Record states {} overtime hours", hours.normalize()),
        ),
        (None, Some(end_time)) => {
            let hours = derive_overtime_hours(end_time, rules.standard_end_time);
            let reasoning = if hours > Decimal::ZERO {
                format!(
                    "Clock-out {} is {} hours after standard end {}",
                    end_time.format("%H:%M"),
                    hours.normalize(),
                    rules.standard_end_time.format("%H:%M")
                )
            } else {
                format!(
                    "Clock-out {} is not after standard end {}, no overtime",
                    end_time.format("%H:%M"),
                    rules.standard_end_time.format("%H:%M")
                )
            };
            (hours, HoursSource::Derived, reasoning)
        }
        (None, None) => (
            Decimal::ZERO,
            HoursSource::None,
            "No overtime hours or clock-out time recorded".to_string(),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "overtime_hours_resolution".to_string(),
        rule_name: "Overtime Hours Resolution".to_string(),
        input: serde_json::json!({
            "ot_hours": record.ot_hours.map(|h| h.normalize().to_string()),
            "end_time": record.end_time.map(|t| t.format("%H:%M").to_string()),
            "standard_end_time": rules.standard_end_time.format("%H:%M").to_string()
        }),
        output: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "source": source
        }),
        reasoning,
    };

    OvertimeHoursResult {
        hours,
        source,
        audit_step,
    }
}
