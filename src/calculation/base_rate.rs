//! Base rate resolution functionality.
//!
//! This module determines the monthly base salary in effect for a record's
//! month and derives the daily and hourly rates from it.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::SettingsSnapshot;
use crate::models::{AuditStep, YearMonth};

/// Every month counts as 30 days when pro-rating the monthly base.
pub const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Hours in a standard working day; the hourly rate is the daily base over this.
pub const HOURS_PER_DAY: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The result of a base rate resolution, including the rates and audit step.
#[derive(Debug, Clone)]
pub struct BaseRateResult {
    /// Monthly base salary in effect.
    pub base_monthly: Decimal,
    /// `base_monthly / 30`.
    pub base_daily: Decimal,
    /// `base_daily / 8`.
    pub hourly_rate: Decimal,
    /// Effective date of the salary history entry used, if one applied.
    pub effective_from: Option<NaiveDate>,
    /// The audit step recording this resolution.
    pub audit_step: AuditStep,
}

/// Resolves the base salary for `month`.
///
/// The latest salary history entry effective on or before the first day of
/// the month wins; history order does not matter. With no applicable entry
/// (or no month, for an undated record) the current `salary.base_monthly`
/// is used.
///
/// # Example
///
/// ```
/// use overtime_ledger::calculation::resolve_base_rate;
/// use overtime_ledger::config::SettingsSnapshot;
/// use overtime_ledger::models::YearMonth;
/// use rust_decimal::Decimal;
///
/// let mut settings = SettingsSnapshot::default();
/// settings.salary.base_monthly = Decimal::from(60000);
///
/// let result = resolve_base_rate(YearMonth::new(2024, 6), &settings, 1);
/// assert_eq!(result.base_daily, Decimal::from(2000));
/// assert_eq!(result.hourly_rate, Decimal::from(250));
/// ```
pub fn resolve_base_rate(
    month: Option<YearMonth>,
    settings: &SettingsSnapshot,
    step_number: u32,
) -> BaseRateResult {
    let applicable = month.and_then(|month| {
        let month_start = month.first_day();
        settings
            .salary_history
            .iter()
            .filter(|change| change.effective_date <= month_start)
            .max_by_key(|change| change.effective_date)
    });

    let (base_monthly, effective_from, source) = match applicable {
        Some(change) => (change.amount, Some(change.effective_date), "salary_history"),
        None => (settings.salary.base_monthly, None, "current_salary"),
    };

    let base_daily = base_monthly / DAYS_PER_MONTH;
    let hourly_rate = base_daily / HOURS_PER_DAY;

    let reasoning = match (month, effective_from) {
        (Some(month), Some(from)) => format!(
            "Salary change effective {} applies to {}: monthly base ${}",
            from, month, base_monthly
        ),
        (Some(month), None) => format!(
            "No salary change applies to {}; using current monthly base ${}",
            month, base_monthly
        ),
        (None, _) => format!(
            "Record has no date; using current monthly base ${}",
            base_monthly
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "base_rate_resolution".to_string(),
        rule_name: "Base Rate Resolution".to_string(),
        input: serde_json::json!({
            "month": month.map(|m| m.to_string()),
            "salary_history_entries": settings.salary_history.len()
        }),
        output: serde_json::json!({
            "base_monthly": base_monthly.normalize().to_string(),
            "base_daily": base_daily.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "source": source,
            "effective_from": effective_from.map(|d| d.to_string())
        }),
        reasoning,
    };

    BaseRateResult {
        base_monthly,
        base_daily,
        hourly_rate,
        effective_from,
        audit_step,
    }
}
