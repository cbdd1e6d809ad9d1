//! Aggregated reporting values.
//!
//! These are what the dashboard and analysis views consume: totals over a
//! date range, monthly series, destination counts, and long-run averages.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{DailyPay, DateRange, YearMonth};

/// Sums `values`, clamping at the edge of the decimal range instead of
/// overflowing.
///
/// ```
/// use overtime_ledger::models::saturating_sum;
/// use rust_decimal::Decimal;
///
/// assert_eq!(saturating_sum([Decimal::ONE, Decimal::TWO]), Decimal::from(3));
/// assert_eq!(saturating_sum([Decimal::MAX, Decimal::MAX]), Decimal::MAX);
/// ```
pub fn saturating_sum(values: impl IntoIterator<Item = Decimal>) -> Decimal {
    values.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Summed pay components.
///
/// # Example
///
/// ```
/// use overtime_ledger::models::PayTotals;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let totals = PayTotals {
///     total: Decimal::from_str("2878.5").unwrap(),
///     ..PayTotals::default()
/// };
/// assert_eq!(totals.rounded().total, Decimal::from(2879));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayTotals {
    /// Sum of daily base shares.
    pub base: Decimal,
    /// Sum of cash overtime pay.
    pub ot_pay: Decimal,
    /// Sum of travel allowances.
    pub travel_allowance: Decimal,
    /// Sum of bonuses.
    pub bonus: Decimal,
    /// Sum of leave deductions.
    pub leave_deduction: Decimal,
    /// Sum of `extra` (everything above base).
    pub extra: Decimal,
    /// Sum of daily totals.
    pub total: Decimal,
}

impl PayTotals {
    /// Adds one day's breakdown.
    pub fn add_day(&mut self, pay: &DailyPay) {
        self.base = self.base.saturating_add(pay.base);
        self.ot_pay = self.ot_pay.saturating_add(pay.ot_pay);
        self.travel_allowance = self.travel_allowance.saturating_add(pay.travel_allowance);
        self.bonus = self.bonus.saturating_add(pay.bonus);
        self.leave_deduction = self.leave_deduction.saturating_add(pay.leave_deduction);
        self.extra = self.extra.saturating_add(pay.extra);
        self.total = self.total.saturating_add(pay.total);
    }

    /// Every component rounded to whole currency units, halves away from zero.
    pub fn rounded(&self) -> Self {
        let round = |value: Decimal| {
            value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        };
        Self {
            base: round(self.base),
            ot_pay: round(self.ot_pay),
            travel_allowance: round(self.travel_allowance),
            bonus: round(self.bonus),
            leave_deduction: round(self.leave_deduction),
            extra: round(self.extra),
            total: round(self.total),
        }
    }
}

impl std::ops::Add for PayTotals {
    type Output = PayTotals;

    fn add(self, other: PayTotals) -> PayTotals {
        PayTotals {
            base: self.base.saturating_add(other.base),
            ot_pay: self.ot_pay.saturating_add(other.ot_pay),
            travel_allowance: self.travel_allowance.saturating_add(other.travel_allowance),
            bonus: self.bonus.saturating_add(other.bonus),
            leave_deduction: self.leave_deduction.saturating_add(other.leave_deduction),
            extra: self.extra.saturating_add(other.extra),
            total: self.total.saturating_add(other.total),
        }
    }
}

/// One calendar month of a summary's trend series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBucket {
    /// The month.
    pub month: YearMonth,
    /// Records that fell in the month.
    pub records: usize,
    /// Overtime hours worked in the month.
    pub ot_hours: Decimal,
    /// Comp-leave units earned in the month.
    pub comp_units_earned: Decimal,
    /// Pay components for the month.
    pub totals: PayTotals,
}

impl MonthBucket {
    /// An empty bucket for `month`.
    pub fn empty(month: YearMonth) -> Self {
        Self {
            month,
            records: 0,
            ot_hours: Decimal::ZERO,
            comp_units_earned: Decimal::ZERO,
            totals: PayTotals::default(),
        }
    }
}

/// How many days were spent in one destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    /// Standardised country name.
    pub country: String,
    /// Number of records naming it.
    pub days: usize,
}

/// Earned and used comp-leave units and what remains.
///
/// The balance can be negative; an overdraft is reported, not prevented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompLeaveBalance {
    /// Units earned by internal overtime.
    pub earned: Decimal,
    /// Units used by comp leave.
    pub used: Decimal,
    /// `earned - used`.
    pub balance: Decimal,
}

/// Everything reported for one date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// The range that was summarised.
    pub range: DateRange,
    /// Records inside the range.
    pub records: usize,
    /// Records skipped because they had no readable date.
    pub skipped_records: usize,
    /// Summed pay components.
    pub totals: PayTotals,
    /// Overtime hours across the range.
    pub ot_hours: Decimal,
    /// Comp-leave units earned and used inside the range.
    pub comp_leave: CompLeaveBalance,
    /// Leave days inside the range.
    pub leave_days: usize,
    /// Days with a travel destination.
    pub travel_days: usize,
    /// One bucket per calendar month the range touches.
    pub months: Vec<MonthBucket>,
    /// Destinations by number of days, most visited first.
    pub destinations: Vec<Destination>,
}

/// The dashboard's estimate of one month's pay slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthEstimate {
    /// The month.
    pub month: YearMonth,
    /// The full monthly base in effect for the month.
    pub base_monthly: Decimal,
    /// Cash overtime pay.
    pub ot_pay: Decimal,
    /// Travel allowances.
    pub travel_allowance: Decimal,
    /// Bonuses.
    pub bonus: Decimal,
    /// Leave deductions.
    pub leave_deduction: Decimal,
    /// `base_monthly + ot_pay + travel_allowance + bonus - leave_deduction`.
    pub estimated_total: Decimal,
    /// Overtime hours worked.
    pub ot_hours: Decimal,
    /// Comp-leave units earned.
    pub comp_units_earned: Decimal,
    /// Leave days taken.
    pub leave_days: usize,
}

/// Long-run averages and rolling-year figures for the analysis view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifetimeStats {
    /// Dated records considered.
    pub records: usize,
    /// Calendar months from the first record to today, at least 1.
    pub months_span: u32,
    /// `months_span / 12`, at least 1.
    pub years_span: Decimal,
    /// Sum of daily totals over the whole history.
    pub total_salary: Decimal,
    /// `total_salary / years_span`.
    pub avg_annual_salary: Decimal,
    /// Overtime hours per year.
    pub avg_annual_ot_hours: Decimal,
    /// `total_salary / months_span`.
    pub avg_monthly_salary: Decimal,
    /// `total_salary / records`.
    pub avg_daily_salary: Decimal,
    /// Sum of daily totals over the trailing 365 days.
    pub last_year_salary: Decimal,
    /// Overtime hours over the trailing 365 days.
    pub last_year_ot_hours: Decimal,
    /// Cash overtime pay over the trailing 365 days.
    pub last_year_ot_pay: Decimal,
    /// Cash overtime pay in the current calendar month.
    pub current_month_ot_pay: Decimal,
}
