//! Aggregation over record collections.
//!
//! Folds per-record breakdowns into the figures the reporting views show:
//! range summaries with monthly buckets and destinations, the dashboard's
//! month estimate, and the analysis page's lifetime statistics.
//!
//! Records without a readable date are skipped and logged; they never abort
//! a report.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::config::SettingsSnapshot;
use crate::holidays::HolidayOracle;
use crate::models::{
    AttendanceRecord, CompLeaveBalance, DailyPay, DateRange, Destination, LifetimeStats,
    MonthBucket, MonthEstimate, PayTotals, Summary, YearMonth, saturating_sum,
};

use super::base_rate::resolve_base_rate;
use super::daily_pay::compute_daily_pay;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Pairs each dated record with its date, logging and counting the rest.
fn dated_records(records: &[AttendanceRecord]) -> (Vec<(NaiveDate, &AttendanceRecord)>, usize) {
    let mut dated = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for (position, record) in records.iter().enumerate() {
        match record.date {
            Some(date) => dated.push((date, record)),
            None => {
                warn!(position, "skipping record without a readable date");
                skipped += 1;
            }
        }
    }
    (dated, skipped)
}

/// Summarises every record whose date falls inside `range`.
///
/// Months are bucketed for every calendar month the range touches, even
/// empty ones. Destinations are counted after standardisation and listed by
/// day count, most visited first, ties by name. The comp-leave figures cover
/// the range only; see [`super::comp_leave_balance`] for the lifetime bank.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use overtime_ledger::calculation::aggregate;
/// use overtime_ledger::config::SettingsSnapshot;
/// use overtime_ledger::holidays::NoHolidays;
/// use overtime_ledger::models::DateRange;
/// use rust_decimal::Decimal;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
/// );
/// let summary = aggregate(&[], &SettingsSnapshot::default(), &NoHolidays, range);
///
/// assert_eq!(summary.records, 0);
/// assert_eq!(summary.totals.total, Decimal::ZERO);
/// assert_eq!(summary.months.len(), 12);
/// ```
pub fn aggregate(
    records: &[AttendanceRecord],
    settings: &SettingsSnapshot,
    oracle: &dyn HolidayOracle,
    range: DateRange,
) -> Summary {
    let (dated, skipped_records) = dated_records(records);

    let mut months: BTreeMap<YearMonth, MonthBucket> = range
        .months()
        .into_iter()
        .map(|month| (month, MonthBucket::empty(month)))
        .collect();
    let mut destinations: HashMap<String, usize> = HashMap::new();
    let mut totals = PayTotals::default();
    let mut ot_hours = Decimal::ZERO;
    let mut comp_leave = CompLeaveBalance::default();
    let mut leave_days = 0;
    let mut travel_days = 0;
    let mut count = 0;

    for (date, record) in dated.into_iter().filter(|(date, _)| range.contains(*date)) {
        let pay = compute_daily_pay(record, settings, oracle);
        count += 1;

        totals.add_day(&pay);
        ot_hours = ot_hours.saturating_add(pay.ot_hours);
        comp_leave.earned = comp_leave.earned.saturating_add(pay.comp_units_earned);
        comp_leave.used = comp_leave.used.saturating_add(pay.comp_units_used);
        if pay.is_leave {
            leave_days += 1;
        }
        if let Some(country) = &pay.travel_country {
            travel_days += 1;
            *destinations.entry(country.clone()).or_default() += 1;
        }

        let bucket = months
            .entry(YearMonth::of(date))
            .or_insert_with_key(|month| MonthBucket::empty(*month));
        bucket.records += 1;
        bucket.ot_hours = bucket.ot_hours.saturating_add(pay.ot_hours);
        bucket.comp_units_earned = bucket
            .comp_units_earned
            .saturating_add(pay.comp_units_earned);
        bucket.totals.add_day(&pay);
    }
    comp_leave.balance = comp_leave.earned.saturating_sub(comp_leave.used);

    let mut destinations: Vec<Destination> = destinations
        .into_iter()
        .map(|(country, days)| Destination { country, days })
        .collect();
    destinations.sort_by(|a, b| b.days.cmp(&a.days).then_with(|| a.country.cmp(&b.country)));

    tracing::debug!(
        start = %range.start,
        end = %range.end,
        records = count,
        skipped = skipped_records,
        "range aggregated"
    );

    Summary {
        range,
        records: count,
        skipped_records,
        totals,
        ot_hours,
        comp_leave,
        leave_days,
        travel_days,
        months: months.into_values().collect(),
        destinations,
    }
}

/// The dashboard's estimate of one month's pay.
///
/// Starts from the full monthly base in effect for the month (not the sum of
/// daily shares), then adds overtime, travel and bonuses and subtracts leave
/// deductions for the month's records.
pub fn estimate_month(
    records: &[AttendanceRecord],
    settings: &SettingsSnapshot,
    oracle: &dyn HolidayOracle,
    month: YearMonth,
) -> MonthEstimate {
    let base_monthly = resolve_base_rate(Some(month), settings, 1).base_monthly;
    let summary = aggregate(records, settings, oracle, DateRange::month(month));
    let totals = summary.totals;

    MonthEstimate {
        month,
        base_monthly,
        ot_pay: totals.ot_pay,
        travel_allowance: totals.travel_allowance,
        bonus: totals.bonus,
        leave_deduction: totals.leave_deduction,
        estimated_total: saturating_sum([
            base_monthly,
            totals.ot_pay,
            totals.travel_allowance,
            totals.bonus,
        ])
        .saturating_sub(totals.leave_deduction),
        ot_hours: summary.ot_hours,
        comp_units_earned: summary.comp_leave.earned,
        leave_days: summary.leave_days,
    }
}

/// Long-run averages and rolling-year figures as of `today`.
///
/// The span runs from the earliest dated record to `today`, counted in
/// calendar months inclusive and never less than one month or one year, so
/// a short history is not extrapolated. An empty history yields all zeros.
pub fn lifetime_stats(
    records: &[AttendanceRecord],
    settings: &SettingsSnapshot,
    oracle: &dyn HolidayOracle,
    today: NaiveDate,
) -> LifetimeStats {
    let (dated, _) = dated_records(records);
    let Some(first) = dated.iter().map(|(date, _)| *date).min() else {
        return LifetimeStats::default();
    };

    let pays: Vec<(NaiveDate, DailyPay)> = dated
        .into_iter()
        .map(|(date, record)| (date, compute_daily_pay(record, settings, oracle)))
        .collect();

    let months_span = YearMonth::of(first)
        .months_until_inclusive(YearMonth::of(today))
        .max(1);
    let months = Decimal::from(months_span);
    let years_span = (months / MONTHS_PER_YEAR).max(Decimal::ONE);

    let total_salary = saturating_sum(pays.iter().map(|(_, pay)| pay.total));
    let total_ot_hours = saturating_sum(pays.iter().map(|(_, pay)| pay.ot_hours));

    let rolling_year = DateRange::rolling_year(today);
    let last_year: Vec<&DailyPay> = pays
        .iter()
        .filter(|(date, _)| rolling_year.contains(*date))
        .map(|(_, pay)| pay)
        .collect();
    let current_month = YearMonth::of(today);

    LifetimeStats {
        records: pays.len(),
        months_span,
        years_span,
        total_salary,
        avg_annual_salary: total_salary / years_span,
        avg_annual_ot_hours: total_ot_hours / years_span,
        avg_monthly_salary: total_salary / months,
        avg_daily_salary: total_salary / Decimal::from(pays.len()),
        last_year_salary: saturating_sum(last_year.iter().map(|pay| pay.total)),
        last_year_ot_hours: saturating_sum(last_year.iter().map(|pay| pay.ot_hours)),
        last_year_ot_pay: saturating_sum(last_year.iter().map(|pay| pay.ot_pay)),
        current_month_ot_pay: saturating_sum(
            pays.iter()
                .filter(|(date, _)| YearMonth::of(*date) == current_month)
                .map(|(_, pay)| pay.ot_pay),
        ),
    }
}
