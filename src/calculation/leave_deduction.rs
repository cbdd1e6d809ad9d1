//! Leave deduction functionality.
//!
//! Paid leave (annual, comp, official) costs nothing; unpaid leave deducts a
//! share of the daily base proportional to the hours taken.

use rust_decimal::Decimal;

use crate::config::LeavePolicy;
use crate::models::{AttendanceRecord, AuditStep, FULL_LEAVE_DAY_HOURS, LeaveType};

/// The result of the leave deduction rule.
#[derive(Debug, Clone)]
pub struct LeaveDeductionResult {
    /// Amount deducted, between zero and the daily base.
    pub amount: Decimal,
    /// The leave type the policy was applied for.
    pub leave_type: LeaveType,
    /// Hours of leave taken.
    pub hours: Decimal,
    /// Deduction ratio for the leave type.
    pub ratio: Decimal,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// Computes the deduction for a leave day.
///
/// `ratio × hours / 8 × base_daily`, clamped to `base_daily`.
///
/// # Example
///
/// ```
/// use overtime_ledger::calculation::calculate_leave_deduction;
/// use overtime_ledger::config::LeavePolicy;
/// use overtime_ledger::models::{AttendanceRecord, LeaveType};
/// use rust_decimal::Decimal;
///
/// let record = AttendanceRecord {
///     is_leave: true,
///     leave_type: Some(LeaveType::Personal),
///     leave_duration: Some(Decimal::from(4)),
///     ..AttendanceRecord::default()
/// };
///
/// let result = calculate_leave_deduction(&record, Decimal::from(2000), &LeavePolicy::default(), 1);
/// assert_eq!(result.amount, Decimal::from(1000));
/// ```
pub fn calculate_leave_deduction(
    record: &AttendanceRecord,
    base_daily: Decimal,
    policy: &LeavePolicy,
    step_number: u32,
) -> LeaveDeductionResult {
    let leave_type = record.effective_leave_type();
    let hours = record.leave_hours();
    let ratio = policy.deduction_ratio(leave_type);

    let uncapped =
        (ratio.saturating_mul(hours) / FULL_LEAVE_DAY_HOURS).saturating_mul(base_daily);
    let amount = uncapped.min(base_daily).max(Decimal::ZERO);

    let reasoning = if ratio.is_zero() {
        format!("{:?} leave is paid, no deduction", leave_type)
    } else if amount < uncapped {
        format!(
            "{} hours of {:?} leave at ratio {} would deduct ${}, capped at the daily base ${}",
            hours.normalize(),
            leave_type,
            ratio.normalize(),
            uncapped.round_dp(2),
            base_daily.round_dp(2)
        )
    } else {
        format!(
            "{} hours of {:?} leave at ratio {} deducts ${}",
            hours.normalize(),
            leave_type,
            ratio.normalize(),
            amount.round_dp(2)
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "leave_deduction".to_string(),
        rule_name: "Leave Deduction".to_string(),
        input: serde_json::json!({
            "leave_type": leave_type,
            "leave_duration": record.leave_duration.map(|h| h.normalize().to_string()),
            "base_daily": base_daily.normalize().to_string()
        }),
        output: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "ratio": ratio.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    LeaveDeductionResult {
        amount,
        leave_type,
        hours,
        ratio,
        audit_step,
    }
}
