//! Calculation logic for the overtime ledger.
//!
//! This module contains one function per pay rule (base rate resolution,
//! holiday status, overtime hours derivation, tiered overtime, travel
//! allowance, leave deduction, comp-leave accrual), the daily pay engine
//! that sequences them, and the aggregation that folds daily results into
//! reports.
//!
//! Nothing here performs I/O or fails: malformed input has already been
//! reduced to defaults by the models, and the holiday oracle's errors are
//! absorbed.

mod aggregation;
mod base_rate;
mod comp_leave;
mod country;
mod daily_pay;
mod holiday_status;
mod leave_deduction;
mod overtime_hours;
mod overtime_tiers;
mod travel_allowance;

pub use aggregation::{aggregate, estimate_month, lifetime_stats};
pub use base_rate::{BaseRateResult, DAYS_PER_MONTH, HOURS_PER_DAY, resolve_base_rate};
pub use comp_leave::{
    UNITS_PER_HOUR, comp_leave_balance, comp_leave_units_earned, comp_leave_units_used,
    units_for_hours,
};
pub use country::standardize_country;
pub use daily_pay::{HOLIDAY_MULTIPLIER, compute_daily_pay};
pub use holiday_status::{HolidayStatusResult, resolve_holiday_status};
pub use leave_deduction::{LeaveDeductionResult, calculate_leave_deduction};
pub use overtime_hours::{OvertimeHoursResult, derive_overtime_hours, resolve_overtime_hours};
pub use overtime_tiers::{
    TIER_1_HOURS, TIER_2_HOURS, TieredOvertimeResult, calculate_tiered_overtime,
};
pub use travel_allowance::{
    TravelAllowanceResult, calculate_travel_allowance, effective_exchange_rate,
};
