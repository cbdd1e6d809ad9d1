//! Comp-leave accrual and consumption.
//!
//! Internal overtime is banked in half-hour units instead of paid. Comp
//! leave draws units back out at the same rate, so a full 8-hour comp-leave
//! day uses 16 units. The balance is never stored; it is recomputed from the
//! record history, and an overdraft is reported rather than refused.

use rust_decimal::Decimal;

use crate::config::SettingsSnapshot;
use crate::models::{AttendanceRecord, CompLeaveBalance, LeaveType, OtType};

use super::overtime_hours::resolve_overtime_hours;

/// Comp-leave units per hour (one unit per half hour).
pub const UNITS_PER_HOUR: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Whole units banked for `hours` of internal overtime. Partial units are
/// dropped, never rounded up.
///
/// ```
/// use overtime_ledger::calculation::units_for_hours;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(units_for_hours(Decimal::from_str("1.5").unwrap()), Decimal::from(3));
/// assert_eq!(units_for_hours(Decimal::from_str("1.74").unwrap()), Decimal::from(3));
/// assert_eq!(units_for_hours(Decimal::from_str("0.4").unwrap()), Decimal::ZERO);
/// ```
pub fn units_for_hours(hours: Decimal) -> Decimal {
    hours
        .max(Decimal::ZERO)
        .saturating_mul(UNITS_PER_HOUR)
        .floor()
}

/// Units a record earns: only working days with internal overtime accrue.
pub fn comp_leave_units_earned(
    record: &AttendanceRecord,
    settings: &SettingsSnapshot,
) -> Decimal {
    if record.is_leave || record.ot_type != OtType::Internal {
        return Decimal::ZERO;
    }
    units_for_hours(resolve_overtime_hours(record, &settings.rules, 0).hours)
}

/// Units a record uses: comp-leave hours times two.
pub fn comp_leave_units_used(record: &AttendanceRecord) -> Decimal {
    if !record.is_leave || record.effective_leave_type() != LeaveType::Comp {
        return Decimal::ZERO;
    }
    record.leave_hours().saturating_mul(UNITS_PER_HOUR)
}

/// Earned and used units over every dated record, and what remains.
///
/// Undated records are left out, the same as in aggregation.
///
/// ```
/// use chrono::NaiveDate;
/// use overtime_ledger::calculation::comp_leave_balance;
/// use overtime_ledger::config::SettingsSnapshot;
/// use overtime_ledger::models::{AttendanceRecord, LeaveType, OtType};
/// use rust_decimal::Decimal;
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
/// let records = vec![
///     AttendanceRecord {
///         ot_type: OtType::Internal,
///         ot_hours: Some(Decimal::from(4)),
///         ..AttendanceRecord::on(day(3))
///     },
///     AttendanceRecord {
///         is_leave: true,
///         leave_type: Some(LeaveType::Comp),
///         leave_duration: Some(Decimal::from(2)),
///         ..AttendanceRecord::on(day(4))
///     },
/// ];
///
/// let balance = comp_leave_balance(&records, &SettingsSnapshot::default());
/// assert_eq!(balance.earned, Decimal::from(8));
/// assert_eq!(balance.used, Decimal::from(4));
/// assert_eq!(balance.balance, Decimal::from(4));
/// ```
pub fn comp_leave_balance(
    records: &[AttendanceRecord],
    settings: &SettingsSnapshot,
) -> CompLeaveBalance {
    let (earned, used) = records
        .iter()
        .filter(|record| record.date.is_some())
        .fold((Decimal::ZERO, Decimal::ZERO), |(earned, used), record| {
            (
                earned.saturating_add(comp_leave_units_earned(record, settings)),
                used.saturating_add(comp_leave_units_used(record)),
            )
        });

    let balance = earned.saturating_sub(used);
    if balance < Decimal::ZERO {
        tracing::debug!(earned = %earned, used = %used, "comp-leave balance overdrawn");
    }

    CompLeaveBalance {
        earned,
        used,
        balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn internal(d: u32, hours: &str) -> AttendanceRecord {
        AttendanceRecord {
            ot_type: OtType::Internal,
            ot_hours: Some(dec(hours)),
            ..AttendanceRecord::on(day(d))
        }
    }

    fn comp_leave(d: u32, hours: Option<&str>) -> AttendanceRecord {
        AttendanceRecord {
            is_leave: true,
            leave_type: Some(LeaveType::Comp),
            leave_duration: hours.map(dec),
            ..AttendanceRecord::on(day(d))
        }
    }

    #[test]
    fn test_units_truncate() {
        assert_eq!(units_for_hours(dec("0.49")), dec("0"));
        assert_eq!(units_for_hours(dec("0.5")), dec("1"));
        assert_eq!(units_for_hours(dec("2.99")), dec("5"));
        assert_eq!(units_for_hours(dec("-1")), dec("0"));
    }

    #[test]
    fn test_internal_overtime_from_clock_out() {
        let record = AttendanceRecord {
            ot_type: OtType::Internal,
            end_time: NaiveTime::from_hms_opt(19, 0, 0),
            ..AttendanceRecord::on(day(3))
        };
        assert_eq!(comp_leave_units_earned(&record, &SettingsSnapshot::default()), dec("3"));
    }

    #[test]
    fn test_paid_overtime_earns_no_units() {
        let record = AttendanceRecord {
            ot_type: OtType::Paid,
            ..internal(3, "4")
        };
        assert_eq!(comp_leave_units_earned(&record, &SettingsSnapshot::default()), dec("0"));
    }

    #[test]
    fn test_leave_tagged_overtime_earns_no_units() {
        let record = AttendanceRecord {
            ot_type: OtType::Leave,
            ..internal(3, "4")
        };
        assert_eq!(comp_leave_units_earned(&record, &SettingsSnapshot::default()), dec("0"));
    }

    #[test]
    fn test_leave_day_earns_no_units() {
        let record = AttendanceRecord {
            is_leave: true,
            ..internal(3, "4")
        };
        assert_eq!(comp_leave_units_earned(&record, &SettingsSnapshot::default()), dec("0"));
    }

    #[test]
    fn test_comp_leave_uses_two_units_per_hour() {
        assert_eq!(comp_leave_units_used(&comp_leave(4, Some("3.5"))), dec("7"));
        assert_eq!(comp_leave_units_used(&comp_leave(4, None)), dec("16"));
    }

    #[test]
    fn test_other_leave_uses_no_units() {
        let record = AttendanceRecord {
            leave_type: Some(LeaveType::Annual),
            ..comp_leave(4, Some("8"))
        };
        assert_eq!(comp_leave_units_used(&record), Decimal::ZERO);
    }

    #[test]
    fn test_balance_can_go_negative() {
        let records = vec![internal(3, "1"), comp_leave(4, Some("8"))];
        let balance = comp_leave_balance(&records, &SettingsSnapshot::default());
        assert_eq!(balance.earned, dec("2"));
        assert_eq!(balance.used, dec("16"));
        assert_eq!(balance.balance, dec("-14"));
    }

    #[test]
    fn test_balance_skips_undated_records() {
        let mut undated = internal(3, "4");
        undated.date = None;
        let records = vec![undated, internal(5, "1.5")];
        let balance = comp_leave_balance(&records, &SettingsSnapshot::default());
        assert_eq!(balance.earned, dec("3"));
    }

    #[test]
    fn test_empty_history_balance() {
        let balance = comp_leave_balance(&[], &SettingsSnapshot::default());
        assert_eq!(balance, CompLeaveBalance::default());
    }

    #[test]
    fn test_huge_hours_saturate_units() {
        assert_eq!(units_for_hours(Decimal::MAX), Decimal::MAX);

        let mut huge = internal(3, "1");
        huge.ot_hours = Some(Decimal::MAX);
        let records = vec![huge.clone(), huge];
        let balance = comp_leave_balance(&records, &SettingsSnapshot::default());
        assert_eq!(balance.earned, Decimal::MAX);
        assert_eq!(balance.balance, Decimal::MAX);
    }
}
