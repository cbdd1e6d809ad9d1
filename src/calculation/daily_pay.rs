//! Daily pay calculation.
//!
//! This is the engine's entry point for one record. It sequences the
//! individual rules, collects their audit steps, and assembles a
//! [`DailyPay`]. It never fails: every input shape has a defined result.

use rust_decimal::Decimal;

use crate::config::SettingsSnapshot;
use crate::holidays::HolidayOracle;
use crate::models::{
    AttendanceRecord, AuditStep, DailyPay, HoursSource, OtType, YearMonth, saturating_sum,
};

use super::base_rate::resolve_base_rate;
use super::comp_leave::{comp_leave_units_used, units_for_hours};
use super::holiday_status::resolve_holiday_status;
use super::leave_deduction::calculate_leave_deduction;
use super::overtime_hours::resolve_overtime_hours;
use super::overtime_tiers::calculate_tiered_overtime;
use super::travel_allowance::calculate_travel_allowance;

/// Base multiplier on a worked public holiday.
pub const HOLIDAY_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Computes the pay breakdown for one attendance record.
///
/// On a working day the base share is the daily base (doubled on a
/// holiday), overtime is paid in tiers or banked as comp-leave units, and
/// travel and bonus are added on top. On a leave day overtime and travel are
/// suspended, the holiday multiplier does not apply, and unpaid leave
/// deducts from the base share. The bonus is paid either way.
///
/// The holiday oracle is consulted at most once, and only when the record
/// does not set `is_holiday` itself.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use overtime_ledger::calculation::compute_daily_pay;
/// use overtime_ledger::config::SettingsSnapshot;
/// use overtime_ledger::holidays::NoHolidays;
/// use overtime_ledger::models::AttendanceRecord;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let mut settings = SettingsSnapshot::default();
/// settings.salary.base_monthly = Decimal::from(60000);
///
/// let record = AttendanceRecord {
///     end_time: NaiveTime::from_hms_opt(20, 0, 0),
///     ..AttendanceRecord::on(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
/// };
///
/// let pay = compute_daily_pay(&record, &settings, &NoHolidays);
/// assert_eq!(pay.base, Decimal::from(2000));
/// assert_eq!(pay.ot_pay, Decimal::from_str("878.75").unwrap());
/// assert_eq!(pay.total, Decimal::from_str("2878.75").unwrap());
/// ```
pub fn compute_daily_pay(
    record: &AttendanceRecord,
    settings: &SettingsSnapshot,
    oracle: &dyn HolidayOracle,
) -> DailyPay {
    let mut steps = Vec::new();
    let mut step_number = 1;

    let base_rate = resolve_base_rate(record.date.map(YearMonth::of), settings, step_number);
    steps.push(base_rate.audit_step);
    step_number += 1;
    let base_daily = base_rate.base_daily;

    let holiday = resolve_holiday_status(record, oracle, step_number);
    steps.push(holiday.audit_step);
    step_number += 1;

    let bonus = record.bonus_total();

    let pay = if record.is_leave {
        let deduction =
            calculate_leave_deduction(record, base_daily, &settings.leave, step_number);
        steps.push(deduction.audit_step);
        step_number += 1;

        DailyPay {
            date: record.date,
            base_monthly: base_rate.base_monthly,
            base_daily,
            is_holiday: holiday.is_holiday,
            holiday_name: holiday.name,
            is_leave: true,
            ot_hours: Decimal::ZERO,
            hours_source: HoursSource::None,
            ot_type: record.ot_type,
            tiers: Vec::new(),
            base: base_daily,
            ot_pay: Decimal::ZERO,
            travel_allowance: Decimal::ZERO,
            travel_country: None,
            bonus,
            leave_deduction: deduction.amount,
            extra: Decimal::ZERO,
            total: Decimal::ZERO,
            comp_units_earned: Decimal::ZERO,
            comp_units_used: comp_leave_units_used(record),
            steps: Vec::new(),
        }
    } else {
        let hours = resolve_overtime_hours(record, &settings.rules, step_number);
        steps.push(hours.audit_step);
        step_number += 1;

        let tiers = calculate_tiered_overtime(
            hours.hours,
            base_rate.hourly_rate,
            &settings.rules,
            step_number,
        );
        steps.push(tiers.audit_step);
        step_number += 1;

        let (ot_pay, comp_units_earned) = match record.ot_type {
            OtType::Paid => (tiers.amount, Decimal::ZERO),
            OtType::Internal => (Decimal::ZERO, units_for_hours(hours.hours)),
            OtType::Leave => (Decimal::ZERO, Decimal::ZERO),
        };
        steps.push(AuditStep {
            step_number,
            rule_id: "overtime_compensation".to_string(),
            rule_name: "Overtime Compensation".to_string(),
            input: serde_json::json!({
                "ot_type": record.ot_type,
                "tiered_value": tiers.amount.normalize().to_string()
            }),
            output: serde_json::json!({
                "ot_pay": ot_pay.normalize().to_string(),
                "comp_units_earned": comp_units_earned.normalize().to_string()
            }),
            reasoning: match record.ot_type {
                OtType::Paid => format!("Overtime paid in cash: ${}", ot_pay.round_dp(2)),
                OtType::Internal => format!(
                    "Internal overtime banked as {} comp-leave units instead of cash",
                    comp_units_earned
                ),
                OtType::Leave => "Overtime on a leave-tagged day earns nothing".to_string(),
            },
        });
        step_number += 1;

        let multiplier = if holiday.is_holiday {
            HOLIDAY_MULTIPLIER
        } else {
            Decimal::ONE
        };

        let travel = calculate_travel_allowance(record, settings, step_number);
        steps.push(travel.audit_step);
        step_number += 1;

        DailyPay {
            date: record.date,
            base_monthly: base_rate.base_monthly,
            base_daily,
            is_holiday: holiday.is_holiday,
            holiday_name: holiday.name,
            is_leave: false,
            ot_hours: hours.hours,
            hours_source: hours.source,
            ot_type: record.ot_type,
            tiers: tiers.lines,
            base: base_daily.saturating_mul(multiplier),
            ot_pay,
            travel_allowance: travel.amount,
            travel_country: travel.country,
            bonus,
            leave_deduction: Decimal::ZERO,
            extra: Decimal::ZERO,
            total: Decimal::ZERO,
            comp_units_earned,
            comp_units_used: Decimal::ZERO,
            steps: Vec::new(),
        }
    };

    let extra = saturating_sum([pay.ot_pay, pay.travel_allowance, pay.bonus]);
    let total = pay.base.saturating_add(extra).saturating_sub(pay.leave_deduction);

    steps.push(AuditStep {
        step_number,
        rule_id: "daily_total".to_string(),
        rule_name: "Daily Total".to_string(),
        input: serde_json::json!({
            "base": pay.base.normalize().to_string(),
            "ot_pay": pay.ot_pay.normalize().to_string(),
            "travel_allowance": pay.travel_allowance.normalize().to_string(),
            "bonus": pay.bonus.normalize().to_string(),
            "leave_deduction": pay.leave_deduction.normalize().to_string()
        }),
        output: serde_json::json!({
            "extra": extra.normalize().to_string(),
            "total": total.normalize().to_string()
        }),
        reasoning: format!(
            "${} base + ${} extra - ${} deduction = ${}",
            pay.base.round_dp(2),
            extra.round_dp(2),
            pay.leave_deduction.round_dp(2),
            total.round_dp(2)
        ),
    });

    tracing::debug!(
        date = ?pay.date,
        is_leave = pay.is_leave,
        is_holiday = pay.is_holiday,
        total = %total,
        "daily pay computed"
    );

    DailyPay {
        extra,
        total,
        steps,
        ..pay
    }
}
