//! Settings snapshot types.
//!
//! A [`SettingsSnapshot`] is the complete configuration the engine needs for
//! one call. It deserializes from the app's camelCase settings document (or
//! `settings.yaml`), with every missing, blank or unreadable field falling
//! back to [`super::defaults`]. Unknown fields are ignored.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::models::LeaveType;
use crate::models::lenient;

use super::defaults::{
    DEFAULT_BASE_MONTHLY, DEFAULT_EXCHANGE_RATE, DEFAULT_OT1, DEFAULT_OT2, DEFAULT_OT3,
    DEFAULT_PERSONAL_LEAVE_RATIO, DEFAULT_SICK_LEAVE_RATIO, DEFAULT_TRIP_DAILY,
    default_standard_end_time,
};

fn or_default<T: std::fmt::Display>(value: Option<T>, field: &'static str, default: T) -> T {
    value.unwrap_or_else(|| {
        debug!(field, default = %default, "setting not given, using default");
        default
    })
}

/// Current salary settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawSalarySettings")]
pub struct SalarySettings {
    /// Monthly base salary used when no salary history entry applies.
    pub base_monthly: Decimal,
}

impl Default for SalarySettings {
    fn default() -> Self {
        Self {
            base_monthly: DEFAULT_BASE_MONTHLY,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSalarySettings {
    #[serde(deserialize_with = "lenient::setting")]
    base_monthly: Option<Decimal>,
}

impl From<RawSalarySettings> for SalarySettings {
    fn from(raw: RawSalarySettings) -> Self {
        Self {
            base_monthly: or_default(raw.base_monthly, "baseMonthly", DEFAULT_BASE_MONTHLY),
        }
    }
}

/// A change of monthly base salary taking effect on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryChange {
    /// First day the new salary applies. An entry applies to a month when it
    /// is effective on or before the month's first day.
    pub effective_date: NaiveDate,
    /// The new monthly base salary.
    pub amount: Decimal,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawSalaryChange {
    #[serde(deserialize_with = "lenient::date")]
    effective_date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient::setting")]
    amount: Option<Decimal>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryEntry {
    Change(RawSalaryChange),
    Unreadable(IgnoredAny),
}

/// Salary history entries without a usable date and amount are dropped.
fn salary_history<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<SalaryChange>, D::Error> {
    let entries: Vec<HistoryEntry> = lenient::section(deserializer)?;
    Ok(entries
        .into_iter()
        .filter_map(|entry| match entry {
            HistoryEntry::Change(RawSalaryChange {
                effective_date: Some(effective_date),
                amount: Some(amount),
            }) => Some(SalaryChange {
                effective_date,
                amount,
            }),
            _ => {
                debug!("salary history entry dropped");
                None
            }
        })
        .collect())
}

/// Overtime multipliers and the nominal end of the working day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawOvertimeRules")]
pub struct OvertimeRules {
    /// Multiplier for the first two overtime hours.
    pub ot1: Decimal,
    /// Multiplier for overtime hours two to four.
    pub ot2: Decimal,
    /// Multiplier for overtime beyond four hours.
    pub ot3: Decimal,
    /// Overtime starts after this time.
    #[serde(serialize_with = "clock")]
    pub standard_end_time: NaiveTime,
}

impl Default for OvertimeRules {
    fn default() -> Self {
        Self {
            ot1: DEFAULT_OT1,
            ot2: DEFAULT_OT2,
            ot3: DEFAULT_OT3,
            standard_end_time: default_standard_end_time(),
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawOvertimeRules {
    #[serde(deserialize_with = "lenient::setting")]
    ot1: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    ot2: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    ot3: Option<Decimal>,
    #[serde(deserialize_with = "lenient::time")]
    standard_end_time: Option<NaiveTime>,
}

impl From<RawOvertimeRules> for OvertimeRules {
    fn from(raw: RawOvertimeRules) -> Self {
        Self {
            ot1: or_default(raw.ot1, "ot1", DEFAULT_OT1),
            ot2: or_default(raw.ot2, "ot2", DEFAULT_OT2),
            ot3: or_default(raw.ot3, "ot3", DEFAULT_OT3),
            standard_end_time: or_default(
                raw.standard_end_time,
                "standardEndTime",
                default_standard_end_time(),
            ),
        }
    }
}

/// Travel allowance settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawAllowanceSettings")]
pub struct AllowanceSettings {
    /// Daily allowance in the reference currency.
    pub trip_daily: Decimal,
    /// Static reference-to-local exchange rate.
    pub exchange_rate: Decimal,
}

impl Default for AllowanceSettings {
    fn default() -> Self {
        Self {
            trip_daily: DEFAULT_TRIP_DAILY,
            exchange_rate: DEFAULT_EXCHANGE_RATE,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawAllowanceSettings {
    #[serde(deserialize_with = "lenient::setting")]
    trip_daily: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    exchange_rate: Option<Decimal>,
}

impl From<RawAllowanceSettings> for AllowanceSettings {
    fn from(raw: RawAllowanceSettings) -> Self {
        Self {
            trip_daily: or_default(raw.trip_daily, "tripDaily", DEFAULT_TRIP_DAILY),
            exchange_rate: or_default(raw.exchange_rate, "exchangeRate", DEFAULT_EXCHANGE_RATE),
        }
    }
}

/// Share of the daily base deducted per full day of each leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawLeavePolicy")]
pub struct LeavePolicy {
    /// Statutory annual leave.
    pub annual: Decimal,
    /// Department comp-leave.
    pub comp: Decimal,
    /// Personal (unpaid) leave.
    pub personal: Decimal,
    /// Sick leave.
    pub sick: Decimal,
    /// Official leave.
    pub official: Decimal,
    /// Unrecognised leave types.
    pub other: Decimal,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            annual: Decimal::ZERO,
            comp: Decimal::ZERO,
            personal: DEFAULT_PERSONAL_LEAVE_RATIO,
            sick: DEFAULT_SICK_LEAVE_RATIO,
            official: Decimal::ZERO,
            other: Decimal::ZERO,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawLeavePolicy {
    #[serde(deserialize_with = "lenient::setting")]
    annual: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    comp: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    personal: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    sick: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    official: Option<Decimal>,
    #[serde(deserialize_with = "lenient::setting")]
    other: Option<Decimal>,
}

impl From<RawLeavePolicy> for LeavePolicy {
    fn from(raw: RawLeavePolicy) -> Self {
        let defaults = LeavePolicy::default();
        Self {
            annual: or_default(raw.annual, "annual", defaults.annual),
            comp: or_default(raw.comp, "comp", defaults.comp),
            personal: or_default(raw.personal, "personal", defaults.personal),
            sick: or_default(raw.sick, "sick", defaults.sick),
            official: or_default(raw.official, "official", defaults.official),
            other: or_default(raw.other, "other", defaults.other),
        }
    }
}

impl LeavePolicy {
    /// The deduction ratio for `leave_type`, clamped to `0..=1`.
    pub fn deduction_ratio(&self, leave_type: LeaveType) -> Decimal {
        let ratio = match leave_type {
            LeaveType::Annual => self.annual,
            LeaveType::Comp => self.comp,
            LeaveType::Personal => self.personal,
            LeaveType::Sick => self.sick,
            LeaveType::Official => self.official,
            LeaveType::Other => self.other,
        };
        ratio.clamp(Decimal::ZERO, Decimal::ONE)
    }
}

/// The configuration in effect for a calculation.
///
/// # Example
///
/// ```
/// use overtime_ledger::config::SettingsSnapshot;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings: SettingsSnapshot = serde_json::from_str(
///     r#"{"salary": {"baseMonthly": "60000"}, "rules": {"standardEndTime": "18:00"}}"#,
/// ).unwrap();
///
/// assert_eq!(settings.salary.base_monthly, Decimal::from(60000));
/// assert_eq!(settings.rules.ot1, Decimal::from_str("1.34").unwrap());
/// assert_eq!(settings.allowance.exchange_rate, Decimal::from_str("32.5").unwrap());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsSnapshot {
    /// Current salary.
    #[serde(deserialize_with = "lenient::section")]
    pub salary: SalarySettings,
    /// Historical base salaries, in any order.
    #[serde(deserialize_with = "salary_history")]
    pub salary_history: Vec<SalaryChange>,
    /// Overtime rules.
    #[serde(deserialize_with = "lenient::section")]
    pub rules: OvertimeRules,
    /// Travel allowance.
    #[serde(deserialize_with = "lenient::section")]
    pub allowance: AllowanceSettings,
    /// A live exchange rate fetched by the app; wins over
    /// `allowance.exchange_rate` when positive.
    #[serde(deserialize_with = "lenient::setting")]
    pub live_rate: Option<Decimal>,
    /// Leave deduction policy.
    #[serde(deserialize_with = "lenient::section")]
    pub leave: LeavePolicy,
    /// Extra country aliases (alias → canonical name), consulted before the
    /// built-in table.
    #[serde(deserialize_with = "lenient::section")]
    pub country_aliases: BTreeMap<String, String>,
}

impl SettingsSnapshot {
    /// Returns a copy of these settings with `live_rate` composed in.
    /// Non-positive rates are ignored.
    pub fn with_live_rate(mut self, rate: Option<Decimal>) -> Self {
        if let Some(rate) = rate.filter(|rate| *rate > Decimal::ZERO) {
            self.live_rate = Some(rate);
        }
        self
    }
}

fn clock<S: serde::Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&time.format("%H:%M").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings: SettingsSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, SettingsSnapshot::default());
        assert_eq!(settings.salary.base_monthly, dec("50000"));
        assert_eq!(
            settings.rules.standard_end_time,
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
        assert_eq!(settings.allowance.trip_daily, dec("50"));
        assert_eq!(settings.live_rate, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let settings: SettingsSnapshot =
            serde_json::from_str(r#"{"salary": {"hourlyRate": 208}, "theme": "dark"}"#).unwrap();
        assert_eq!(settings.salary.base_monthly, dec("50000"));
    }

    #[test]
    fn test_salary_history_deserializes() {
        let settings: SettingsSnapshot = serde_json::from_str(
            r#"{"salaryHistory": [{"effectiveDate": "2024-01-01", "amount": "55000"}]}"#,
        )
        .unwrap();
        assert_eq!(settings.salary_history.len(), 1);
        assert_eq!(settings.salary_history[0].amount, dec("55000"));
    }

    #[test]
    fn test_standard_end_time_serializes_as_clock() {
        let json = serde_json::to_string(&OvertimeRules::default()).unwrap();
        assert!(json.contains("\"standardEndTime\":\"17:30\""));
    }

    #[test]
    fn test_bad_standard_end_time_falls_back() {
        let rules: OvertimeRules = serde_json::from_str(r#"{"standardEndTime": "teatime"}"#).unwrap();
        assert_eq!(rules.standard_end_time, NaiveTime::from_hms_opt(17, 30, 0).unwrap());
    }

    #[test]
    fn test_null_and_blank_settings_fall_back_to_defaults() {
        let settings: SettingsSnapshot = serde_json::from_str(
            r#"{"salary": {"baseMonthly": null}, "rules": {"standardEndTime": ""}}"#,
        )
        .unwrap();
        assert_eq!(settings.salary.base_monthly, DEFAULT_BASE_MONTHLY);
        assert_eq!(settings.rules.standard_end_time, default_standard_end_time());
        assert_eq!(settings, SettingsSnapshot::default());
    }

    #[test]
    fn test_unusable_numbers_fall_back_per_field() {
        let settings: SettingsSnapshot = serde_json::from_str(
            r#"{
                "salary": {"baseMonthly": " "},
                "rules": {"ot1": "fast", "ot2": "1.7", "ot3": "5e28"},
                "allowance": {"tripDaily": [], "exchangeRate": "31"},
                "leave": {"sick": null, "personal": "0.8"},
                "liveRate": "soon"
            }"#,
        )
        .unwrap();
        assert_eq!(settings.salary.base_monthly, DEFAULT_BASE_MONTHLY);
        assert_eq!(settings.rules.ot1, DEFAULT_OT1);
        assert_eq!(settings.rules.ot2, dec("1.7"));
        assert_eq!(settings.rules.ot3, DEFAULT_OT3);
        assert_eq!(settings.allowance.trip_daily, DEFAULT_TRIP_DAILY);
        assert_eq!(settings.allowance.exchange_rate, dec("31"));
        assert_eq!(settings.leave.sick, DEFAULT_SICK_LEAVE_RATIO);
        assert_eq!(settings.leave.personal, dec("0.8"));
        assert_eq!(settings.live_rate, None);
    }

    #[test]
    fn test_null_or_misshapen_sections_are_defaults() {
        let settings: SettingsSnapshot = serde_json::from_str(
            r#"{"salary": null, "rules": "none", "leave": 3, "countryAliases": null}"#,
        )
        .unwrap();
        assert_eq!(settings, SettingsSnapshot::default());
    }

    #[test]
    fn test_incomplete_salary_history_entries_dropped() {
        let settings: SettingsSnapshot = serde_json::from_str(
            r#"{"salaryHistory": [
                {"effectiveDate": "2024-01-01", "amount": 55000},
                {"effectiveDate": "", "amount": "56000"},
                {"effectiveDate": "2024-07-01", "amount": null},
                "garbage"
            ]}"#,
        )
        .unwrap();
        assert_eq!(settings.salary_history.len(), 1);
        assert_eq!(settings.salary_history[0].amount, dec("55000"));
    }

    #[test]
    fn test_leave_ratios() {
        let policy = LeavePolicy::default();
        assert_eq!(policy.deduction_ratio(LeaveType::Annual), Decimal::ZERO);
        assert_eq!(policy.deduction_ratio(LeaveType::Comp), Decimal::ZERO);
        assert_eq!(policy.deduction_ratio(LeaveType::Personal), dec("1"));
        assert_eq!(policy.deduction_ratio(LeaveType::Sick), dec("0.5"));

        let generous = LeavePolicy {
            personal: dec("3"),
            ..LeavePolicy::default()
        };
        assert_eq!(generous.deduction_ratio(LeaveType::Personal), dec("1"));
    }

    #[test]
    fn test_with_live_rate_ignores_non_positive() {
        let settings = SettingsSnapshot::default().with_live_rate(Some(dec("31.2")));
        assert_eq!(settings.live_rate, Some(dec("31.2")));

        let unchanged = settings.clone().with_live_rate(Some(Decimal::ZERO));
        assert_eq!(unchanged.live_rate, Some(dec("31.2")));

        let unchanged = unchanged.with_live_rate(None);
        assert_eq!(unchanged.live_rate, Some(dec("31.2")));
    }
}
