//! Core data models for the overtime ledger.
//!
//! This module contains the attendance record, the per-day pay breakdown, and
//! the aggregated reporting values, together with the canonical date handling
//! every comparison goes through.

mod daily_pay;
mod dates;
pub(crate) mod lenient;
mod record;
mod summary;

pub use daily_pay::{AuditStep, DailyPay, HoursSource, OvertimeTier, TierLine};
pub use dates::{DateRange, DateValue, YearMonth, normalize_date, parse_time_of_day};
pub use record::{
    AttendanceRecord, BonusEntry, FULL_LEAVE_DAY_HOURS, LeaveType, OtType, RecordSheet,
    remove_record, upsert_record,
};
pub use summary::{
    CompLeaveBalance, Destination, LifetimeStats, MonthBucket, MonthEstimate, PayTotals, Summary,
    saturating_sum,
};
