//! Foreign travel allowance.
//!
//! A day with a travel destination earns the daily allowance, set in the
//! reference currency, converted at the effective exchange rate.

use rust_decimal::Decimal;

use crate::config::SettingsSnapshot;
use crate::models::{AttendanceRecord, AuditStep};

use super::country::standardize_country;

/// The result of the travel allowance rule.
#[derive(Debug, Clone)]
pub struct TravelAllowanceResult {
    /// Allowance in local currency; zero without a destination.
    pub amount: Decimal,
    /// The standardised destination, if any.
    pub country: Option<String>,
    /// The exchange rate applied.
    pub exchange_rate: Decimal,
    /// The audit step recording this rule.
    pub audit_step: AuditStep,
}

/// The exchange rate in effect: a positive live rate wins over the
/// configured static rate.
///
/// ```
/// use overtime_ledger::calculation::effective_exchange_rate;
/// use overtime_ledger::config::SettingsSnapshot;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = SettingsSnapshot::default();
/// assert_eq!(effective_exchange_rate(&settings), Decimal::from_str("32.5").unwrap());
///
/// let live = settings.with_live_rate(Some(Decimal::from(31)));
/// assert_eq!(effective_exchange_rate(&live), Decimal::from(31));
/// ```
pub fn effective_exchange_rate(settings: &SettingsSnapshot) -> Decimal {
    settings
        .live_rate
        .filter(|rate| *rate > Decimal::ZERO)
        .unwrap_or(settings.allowance.exchange_rate)
}

/// Computes the travel allowance for a working day.
///
/// The record is eligible when its destination standardises to a non-empty
/// country name.
pub fn calculate_travel_allowance(
    record: &AttendanceRecord,
    settings: &SettingsSnapshot,
    step_number: u32,
) -> TravelAllowanceResult {
    let exchange_rate = effective_exchange_rate(settings);
    let country = record
        .travel_country()
        .and_then(|raw| standardize_country(raw, &settings.country_aliases));

    let (amount, reasoning) = match &country {
        Some(country) => {
            let amount = settings.allowance.trip_daily.saturating_mul(exchange_rate);
            (
                amount,
                format!(
                    "Travel to {}: {} x rate {} = ${}",
                    country,
                    settings.allowance.trip_daily.normalize(),
                    exchange_rate.normalize(),
                    amount.normalize()
                ),
            )
        }
        None => (Decimal::ZERO, "No travel destination recorded".to_string()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "travel_allowance".to_string(),
        rule_name: "Travel Allowance".to_string(),
        input: serde_json::json!({
            "travel_country": record.travel_country,
            "trip_daily": settings.allowance.trip_daily.normalize().to_string(),
            "exchange_rate": exchange_rate.normalize().to_string(),
            "live_rate": settings.live_rate.map(|r| r.normalize().to_string())
        }),
        output: serde_json::json!({
            "country": country,
            "amount": amount.normalize().to_string()
        }),
        reasoning,
    };

    TravelAllowanceResult {
        amount,
        country,
        exchange_rate,
        audit_step,
    }
}
