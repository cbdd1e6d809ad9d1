//! Per-day pay breakdown produced by the engine.
//!
//! A [`DailyPay`] is a plain value: every monetary field is unrounded, so
//! reports can sum breakdowns without drift. Rounding to whole currency units
//! is a display concern (see [`crate::models::PayTotals::rounded`]).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::OtType;
use super::summary::saturating_sum;

/// One of the three overtime bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OvertimeTier {
    /// The first two overtime hours.
    First,
    /// The next two overtime hours.
    Second,
    /// Everything beyond four overtime hours.
    Third,
}

/// Hours paid within one overtime band.
///
/// # Example
///
/// ```
/// use overtime_ledger::models::{OvertimeTier, TierLine};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let line = TierLine {
///     tier: OvertimeTier::First,
///     hours: Decimal::from_str("2").unwrap(),
///     multiplier: Decimal::from_str("1.34").unwrap(),
///     hourly_rate: Decimal::from_str("250").unwrap(),
///     amount: Decimal::from_str("670").unwrap(),
/// };
/// assert_eq!(line.hours * line.hourly_rate * line.multiplier, line.amount);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLine {
    /// Which band these hours fall in.
    pub tier: OvertimeTier,
    /// Hours in this band.
    pub hours: Decimal,
    /// The band's pay multiplier.
    pub multiplier: Decimal,
    /// The plain hourly rate (daily base / 8).
    pub hourly_rate: Decimal,
    /// `hours × hourly_rate × multiplier`.
    pub amount: Decimal,
}

/// Where the overtime hours for a day came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursSource {
    /// The record carried a non-zero `otHours`.
    Explicit,
    /// Derived from the clock-out time.
    Derived,
    /// Neither was available.
    None,
}

/// A single step in the audit trail of a daily calculation.
///
/// Each step captures the input, output, and reasoning for one rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The pay breakdown for one attendance record.
///
/// `extra` is everything on top of the day's base share (`ot_pay +
/// travel_allowance + bonus`), and `total` is
/// `base + extra - leave_deduction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyPay {
    /// The record's date, if it had a readable one.
    pub date: Option<NaiveDate>,
    /// Monthly base salary in effect for the record's month.
    pub base_monthly: Decimal,
    /// `base_monthly / 30`.
    pub base_daily: Decimal,
    /// Whether the day counted as a holiday.
    pub is_holiday: bool,
    /// The holiday's name, when the oracle supplied one.
    pub holiday_name: Option<String>,
    /// Whether the day was a leave day.
    pub is_leave: bool,
    /// Resolved overtime hours (zero on leave days).
    pub ot_hours: Decimal,
    /// Where `ot_hours` came from.
    pub hours_source: HoursSource,
    /// The record's compensation type.
    pub ot_type: OtType,
    /// Tiered overtime lines, present even when the value is banked instead
    /// of paid.
    pub tiers: Vec<TierLine>,
    /// The day's base share: `base_daily`, doubled on a worked holiday.
    pub base: Decimal,
    /// Cash overtime pay.
    pub ot_pay: Decimal,
    /// Foreign travel allowance in local currency.
    pub travel_allowance: Decimal,
    /// Standardised travel destination.
    pub travel_country: Option<String>,
    /// Bonus paid on the day.
    pub bonus: Decimal,
    /// Deduction for unpaid leave, never more than `base_daily`.
    pub leave_deduction: Decimal,
    /// `ot_pay + travel_allowance + bonus`.
    pub extra: Decimal,
    /// `base + extra - leave_deduction`.
    pub total: Decimal,
    /// Comp-leave units earned by internal overtime.
    pub comp_units_earned: Decimal,
    /// Comp-leave units consumed by comp leave.
    pub comp_units_used: Decimal,
    /// How each figure was reached.
    pub steps: Vec<AuditStep>,
}

impl DailyPay {
    /// The value the overtime tiers would have paid in cash, whether or not
    /// it was actually paid.
    pub fn tiered_value(&self) -> Decimal {
        saturating_sum(self.tiers.iter().map(|line| line.amount))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_tier_serialization() {
        assert_eq!(
            serde_json::to_string(&OvertimeTier::Second).unwrap(),
            "\"second\""
        );
        let tier: OvertimeTier = serde_json::from_str("\"third\"").unwrap();
        assert_eq!(tier, OvertimeTier::Third);
    }

    #[test]
    fn test_tier_line_amounts_serialize_as_strings() {
        let line = TierLine {
            tier: OvertimeTier::First,
            hours: dec("0.5"),
            multiplier: dec("1.67"),
            hourly_rate: dec("250"),
            amount: dec("208.75"),
        };
        let json = serde_json::to_string(&line).unwrap();
        assert!(json.contains("\"amount\":\"208.75\""));
        assert!(json.contains("\"tier\":\"first\""));
    }

    #[test]
    fn test_hours_source_serialization() {
        assert_eq!(
            serde_json::to_string(&HoursSource::Derived).unwrap(),
            "\"derived\""
        );
    }
}
