//! Property tests for the pay engine and the aggregation layer.
//!
//! Base salaries are drawn from values whose daily and hourly rates divide
//! exactly, and hours move in quarter-hour steps, so every figure compared
//! here is an exact decimal.

use chrono::{Days, NaiveDate, NaiveTime};
use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use overtime_ledger::calculation::{
    aggregate, compute_daily_pay, derive_overtime_hours, estimate_month, lifetime_stats,
    units_for_hours,
};
use overtime_ledger::config::SettingsSnapshot;
use overtime_ledger::holidays::NoHolidays;
use overtime_ledger::models::{AttendanceRecord, DateRange, LeaveType, OtType, YearMonth};

fn quarter_hours(quarters: u32) -> Decimal {
    Decimal::new(i64::from(quarters) * 25, 2)
}

fn day_of_2024(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
}

fn arb_settings() -> impl Strategy<Value = SettingsSnapshot> {
    prop::sample::select(vec![24000i64, 48000, 60000]).prop_map(|base| {
        let mut settings = SettingsSnapshot::default();
        settings.salary.base_monthly = Decimal::from(base);
        settings.allowance.exchange_rate = Decimal::from(32);
        settings
    })
}

fn arb_ot_type() -> impl Strategy<Value = OtType> {
    prop_oneof![Just(OtType::Paid), Just(OtType::Internal), Just(OtType::Leave)]
}

fn arb_leave_type() -> impl Strategy<Value = LeaveType> {
    prop_oneof![
        Just(LeaveType::Annual),
        Just(LeaveType::Comp),
        Just(LeaveType::Personal),
        Just(LeaveType::Sick),
        Just(LeaveType::Official),
        Just(LeaveType::Other),
    ]
}

prop_compose! {
    fn arb_record()(
        offset in 0u64..366,
        quarters in 0u32..=48,
        ot_type in arb_ot_type(),
        is_holiday in prop::option::of(any::<bool>()),
        is_leave in any::<bool>(),
        leave_type in arb_leave_type(),
        leave_quarters in 0u32..=32,
        travel in prop::sample::select(vec!["", "Japan", "美國", "VN"]),
        bonus in 0i64..2000,
    ) -> AttendanceRecord {
        AttendanceRecord {
            ot_hours: Some(quarter_hours(quarters)),
            ot_type,
            is_holiday,
            is_leave,
            leave_type: Some(leave_type),
            leave_duration: Some(quarter_hours(leave_quarters)),
            travel_country: Some(travel.to_string()),
            bonus: Some(Decimal::from(bonus)),
            ..AttendanceRecord::on(day_of_2024(offset))
        }
    }
}

/// Spreadsheet cells at or far beyond the edge of what a decimal can hold.
fn arb_extreme_cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::sample::select(vec![
            "1e27",
            "7.9e28",
            "-5e28",
            "1e40",
            "79228162514264337593543950335",
            "-79228162514264337593543950335",
            "1e12",
            "1E-30",
            "NaN",
        ])
        .prop_map(|text| json!(text)),
        (1u32..10, -30i32..40, any::<bool>())
            .prop_map(|(mantissa, exp, negative)| {
                let sign = if negative { "-" } else { "" };
                json!(format!("{sign}{mantissa}e{exp}"))
            }),
        any::<f64>().prop_map(|value| json!(value)),
        any::<i64>().prop_map(|value| json!(value)),
    ]
}

/// Any value a `Decimal` can hold, including both extremes.
fn arb_any_decimal() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        Just(Decimal::MAX),
        Just(Decimal::MIN),
        (any::<u32>(), any::<u32>(), any::<u32>(), any::<bool>(), 0u32..=28)
            .prop_map(|(lo, mid, hi, negative, scale)| Decimal::from_parts(lo, mid, hi, negative, scale)),
    ]
}

prop_compose! {
    fn arb_extreme_record()(
        offset in 0u64..366,
        ot_hours in arb_extreme_cell(),
        bonus in arb_extreme_cell(),
        bonus_entries in prop::collection::vec(arb_extreme_cell(), 0..3),
        leave_duration in arb_extreme_cell(),
        is_leave in any::<bool>(),
        ot_type in prop::sample::select(vec!["paid", "internal"]),
    ) -> AttendanceRecord {
        let entries: Vec<Value> =
            bonus_entries.into_iter().map(|amount| json!({"amount": amount})).collect();
        serde_json::from_value(json!({
            "date": day_of_2024(offset).to_string(),
            "otHours": ot_hours,
            "otType": ot_type,
            "isLeave": is_leave,
            "leaveType": "personal",
            "leaveDuration": leave_duration,
            "travelCountry": "Japan",
            "bonus": bonus,
            "bonusEntries": entries,
        }))
        .unwrap()
    }
}

prop_compose! {
    fn arb_raw_decimal_record()(
        offset in 0u64..366,
        ot_hours in arb_any_decimal(),
        bonus in arb_any_decimal(),
        leave_duration in arb_any_decimal(),
        is_leave in any::<bool>(),
        ot_type in arb_ot_type(),
    ) -> AttendanceRecord {
        AttendanceRecord {
            ot_hours: Some(ot_hours),
            ot_type,
            is_leave,
            leave_type: Some(LeaveType::Personal),
            leave_duration: Some(leave_duration),
            travel_country: Some("Japan".to_string()),
            bonus: Some(bonus),
            ..AttendanceRecord::on(day_of_2024(offset))
        }
    }
}

proptest! {
    #[test]
    fn extreme_cells_never_break_the_engine(
        records in prop::collection::vec(arb_extreme_record(), 1..6),
        live_rate in arb_extreme_cell(),
    ) {
        let settings: SettingsSnapshot =
            serde_json::from_value(json!({"liveRate": live_rate})).unwrap();

        for record in &records {
            let pay = compute_daily_pay(record, &settings, &NoHolidays);
            prop_assert!(pay.total >= Decimal::ZERO);
            prop_assert!(pay.leave_deduction <= pay.base_daily);
        }

        let whole = DateRange::new(day_of_2024(0), day_of_2024(365));
        let summary = aggregate(&records, &settings, &NoHolidays, whole);
        prop_assert_eq!(summary.records, records.len());
        prop_assert!(summary.totals.total >= Decimal::ZERO);

        let month = YearMonth::new(2024, 6).unwrap();
        estimate_month(&records, &settings, &NoHolidays, month);
        lifetime_stats(&records, &settings, &NoHolidays, day_of_2024(365));
    }

    #[test]
    fn any_decimal_input_saturates_instead_of_panicking(
        records in prop::collection::vec(arb_raw_decimal_record(), 1..6),
        live_rate in arb_any_decimal(),
        trip_daily in arb_any_decimal(),
    ) {
        let mut settings = SettingsSnapshot::default().with_live_rate(Some(live_rate));
        settings.allowance.trip_daily = trip_daily;

        for record in &records {
            let pay = compute_daily_pay(record, &settings, &NoHolidays);
            prop_assert!(pay.leave_deduction <= pay.base_daily);
        }

        let whole = DateRange::new(day_of_2024(0), day_of_2024(365));
        let summary = aggregate(&records, &settings, &NoHolidays, whole);
        prop_assert_eq!(summary.records, records.len());
        lifetime_stats(&records, &settings, &NoHolidays, day_of_2024(365));
    }
}

proptest! {
    #[test]
    fn daily_pay_is_deterministic(record in arb_record(), settings in arb_settings()) {
        let first = compute_daily_pay(&record, &settings, &NoHolidays);
        let second = compute_daily_pay(&record, &settings, &NoHolidays);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn clocking_out_early_is_never_overtime(minutes in 0u32..(17 * 60 + 30)) {
        let end = NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap();
        let standard = NaiveTime::from_hms_opt(17, 30, 0).unwrap();
        prop_assert_eq!(derive_overtime_hours(end, standard), Decimal::ZERO);
    }

    #[test]
    fn first_band_absorbs_up_to_two_hours(quarters in 1u32..=8, settings in arb_settings()) {
        let record = AttendanceRecord {
            ot_hours: Some(quarter_hours(quarters)),
            ..AttendanceRecord::on(day_of_2024(155))
        };
        let pay = compute_daily_pay(&record, &settings, &NoHolidays);
        prop_assert_eq!(pay.tiers.len(), 1);
        prop_assert_eq!(pay.tiers[0].multiplier, settings.rules.ot1);
    }

    #[test]
    fn holiday_doubles_base_and_nothing_else(
        quarters in 0u32..=48,
        settings in arb_settings(),
    ) {
        let plain = AttendanceRecord {
            ot_hours: Some(quarter_hours(quarters)),
            is_holiday: Some(false),
            ..AttendanceRecord::on(day_of_2024(155))
        };
        let holiday = AttendanceRecord { is_holiday: Some(true), ..plain.clone() };

        let plain_pay = compute_daily_pay(&plain, &settings, &NoHolidays);
        let holiday_pay = compute_daily_pay(&holiday, &settings, &NoHolidays);

        prop_assert_eq!(holiday_pay.base, plain_pay.base * Decimal::TWO);
        prop_assert_eq!(holiday_pay.ot_pay, plain_pay.ot_pay);
        prop_assert_eq!(holiday_pay.total - plain_pay.total, plain_pay.base);
    }

    #[test]
    fn internal_overtime_pays_no_cash(quarters in 0u32..=48, settings in arb_settings()) {
        let hours = quarter_hours(quarters);
        let record = AttendanceRecord {
            ot_hours: Some(hours),
            ot_type: OtType::Internal,
            ..AttendanceRecord::on(day_of_2024(155))
        };
        let pay = compute_daily_pay(&record, &settings, &NoHolidays);

        prop_assert_eq!(pay.ot_pay, Decimal::ZERO);
        prop_assert_eq!(pay.comp_units_earned, units_for_hours(hours));
        prop_assert_eq!(pay.comp_units_earned, (hours * Decimal::TWO).floor());
    }

    #[test]
    fn leave_suspends_overtime_and_travel(record in arb_record(), settings in arb_settings()) {
        let record = AttendanceRecord { is_leave: true, ..record };
        let pay = compute_daily_pay(&record, &settings, &NoHolidays);

        prop_assert_eq!(pay.ot_pay, Decimal::ZERO);
        prop_assert_eq!(pay.travel_allowance, Decimal::ZERO);
        prop_assert_eq!(pay.comp_units_earned, Decimal::ZERO);
    }

    #[test]
    fn leave_deduction_never_exceeds_daily_base(
        record in arb_record(),
        settings in arb_settings(),
        ratio_percent in 0i64..=300,
        extra_hours in 0u32..=64,
    ) {
        let mut settings = settings;
        settings.leave.personal = Decimal::new(ratio_percent, 2);
        settings.leave.sick = Decimal::new(ratio_percent, 2);
        let record = AttendanceRecord {
            is_leave: true,
            leave_duration: Some(quarter_hours(extra_hours * 4)),
            ..record
        };
        let pay = compute_daily_pay(&record, &settings, &NoHolidays);

        prop_assert!(pay.leave_deduction >= Decimal::ZERO);
        prop_assert!(pay.leave_deduction <= pay.base_daily);
    }

    #[test]
    fn summaries_over_disjoint_ranges_add_up(
        records in prop::collection::vec(arb_record(), 0..40),
        settings in arb_settings(),
        split in 0u64..365,
    ) {
        let first = DateRange::new(day_of_2024(0), day_of_2024(split));
        let second = DateRange::new(day_of_2024(split + 1), day_of_2024(365));
        let whole = DateRange::new(day_of_2024(0), day_of_2024(365));

        let a = aggregate(&records, &settings, &NoHolidays, first);
        let b = aggregate(&records, &settings, &NoHolidays, second);
        let all = aggregate(&records, &settings, &NoHolidays, whole);

        prop_assert_eq!(a.totals + b.totals, all.totals);
        prop_assert_eq!(a.ot_hours + b.ot_hours, all.ot_hours);
        prop_assert_eq!(a.records + b.records, all.records);
    }

    #[test]
    fn reaggregation_is_idempotent(
        records in prop::collection::vec(arb_record(), 0..40),
        settings in arb_settings(),
    ) {
        let range = DateRange::new(day_of_2024(0), day_of_2024(365));
        let first = aggregate(&records, &settings, &NoHolidays, range);
        let second = aggregate(&records, &settings, &NoHolidays, range);
        prop_assert_eq!(first, second);
    }
}

#[test]
fn tier_boundary_is_exact() {
    let settings = SettingsSnapshot::default();
    let at = AttendanceRecord {
        ot_hours: Some(Decimal::TWO),
        ..AttendanceRecord::on(day_of_2024(155))
    };
    let past = AttendanceRecord {
        ot_hours: Some(Decimal::new(20001, 4)),
        ..at.clone()
    };

    let at_pay = compute_daily_pay(&at, &settings, &NoHolidays);
    let past_pay = compute_daily_pay(&past, &settings, &NoHolidays);

    assert_eq!(at_pay.tiers.len(), 1);
    assert_eq!(past_pay.tiers.len(), 2);
    assert_eq!(past_pay.tiers[1].hours, Decimal::new(1, 4));
    assert_eq!(past_pay.tiers[1].multiplier, settings.rules.ot2);
}
