//! Tiered overtime pay.
//!
//! Overtime hours are split into successive bands: the first two hours at
//! `ot1`, the next two at `ot2`, and everything after at `ot3`. Each band pays
//! its hours at the plain hourly rate times the band's multiplier.

use rust_decimal::Decimal;

use crate::config::OvertimeRules;
use crate::models::{AuditStep, OvertimeTier, TierLine, saturating_sum};

/// Width of the first overtime band, in hours.
pub const TIER_1_HOURS: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Width of the second overtime band, in hours.
pub const TIER_2_HOURS: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// The result of splitting overtime into bands.
#[derive(Debug, Clone)]
pub struct TieredOvertimeResult {
    /// One line per band with hours in it.
    pub lines: Vec<TierLine>,
    /// Sum of the line amounts.
    pub amount: Decimal,
    /// The audit step recording the split.
    pub audit_step: AuditStep,
}

/// Splits `hours` into overtime bands and prices each at `hourly_rate`.
///
/// Bands with no hours produce no line, so zero hours produce no lines and a
/// zero amount.
///
/// # Example
///
/// ```
/// use overtime_ledger::calculation::calculate_tiered_overtime;
/// use overtime_ledger::config::OvertimeRules;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let hours = Decimal::from_str("2.5").unwrap();
/// let hourly_rate = Decimal::from(250);
///
/// let result = calculate_tiered_overtime(hours, hourly_rate, &OvertimeRules::default(), 1);
///
/// // 2h × 250 × 1.34 + 0.5h × 250 × 1.67
/// assert_eq!(result.amount, Decimal::from_str("878.75").unwrap());
/// assert_eq!(result.lines.len(), 2);
/// ```
pub fn calculate_tiered_overtime(
    hours: Decimal,
    hourly_rate: Decimal,
    rules: &OvertimeRules,
    step_number: u32,
) -> TieredOvertimeResult {
    let hours = hours.max(Decimal::ZERO);

    let first = hours.min(TIER_1_HOURS);
    let second = (hours - first).min(TIER_2_HOURS);
    let third = hours - first - second;

    let lines: Vec<TierLine> = [
        (OvertimeTier::First, first, rules.ot1),
        (OvertimeTier::Second, second, rules.ot2),
        (OvertimeTier::Third, third, rules.ot3),
    ]
    .into_iter()
    .filter(|(_, band_hours, _)| *band_hours > Decimal::ZERO)
    .map(|(tier, band_hours, multiplier)| TierLine {
        tier,
        hours: band_hours,
        multiplier,
        hourly_rate,
        amount: band_hours.saturating_mul(hourly_rate).saturating_mul(multiplier),
    })
    .collect();

    let amount = saturating_sum(lines.iter().map(|line| line.amount));

    let reasoning = if lines.is_empty() {
        "No overtime hours to pay".to_string()
    } else {
        let parts: Vec<String> = lines
            .iter()
            .map(|line| {
                format!(
                    "{}h x ${} x {}",
                    line.hours.normalize(),
                    line.hourly_rate.round_dp(2),
                    line.multiplier.normalize()
                )
            })
            .collect();
        format!(
            "{} = ${}",
            parts.join(" + "),
            amount.round_dp(2).normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "tiered_overtime".to_string(),
        rule_name: "Tiered Overtime".to_string(),
        input: serde_json::json!({
            "hours": hours.normalize().to_string(),
            "hourly_rate": hourly_rate.normalize().to_string(),
            "ot1": rules.ot1.normalize().to_string(),
            "ot2": rules.ot2.normalize().to_string(),
            "ot3": rules.ot3.normalize().to_string()
        }),
        output: serde_json::json!({
            "first_band_hours": first.normalize().to_string(),
            "second_band_hours": second.normalize().to_string(),
            "third_band_hours": third.normalize().to_string(),
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    TieredOvertimeResult {
        lines,
        amount,
        audit_step,
    }
}
