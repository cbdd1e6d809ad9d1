//! Public holiday lookup.
//!
//! The engine asks a [`HolidayOracle`] whether a date is a public holiday
//! only when the record itself does not say. The oracle is a seam: the
//! bundled [`HolidayCalendar`] answers from configured dates, and callers
//! can plug in anything else (a remote calendar, a cached service).
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use overtime_ledger::holidays::{HolidayCalendar, HolidayOracle, PublicHoliday};
//!
//! let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let calendar = HolidayCalendar::new(vec![PublicHoliday::new(new_year, "New Year's Day")]);
//!
//! assert!(calendar.is_holiday(new_year).unwrap());
//! assert!(!calendar.is_holiday(new_year.succ_opt().unwrap()).unwrap());
//! ```

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;

/// A named public holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The holiday's date.
    pub date: NaiveDate,
    /// Its name, for display.
    pub name: String,
}

impl PublicHoliday {
    /// Creates a holiday.
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
        }
    }
}

/// Answers whether a date is a public holiday.
///
/// Implementations may fail (a remote calendar can be unreachable); the
/// daily calculation treats a failed lookup as "not a holiday".
pub trait HolidayOracle: Send + Sync {
    /// Looks up the holiday on `date`, if any.
    fn lookup(&self, date: NaiveDate) -> EngineResult<Option<PublicHoliday>>;

    /// Whether `date` is a public holiday.
    fn is_holiday(&self, date: NaiveDate) -> EngineResult<bool> {
        Ok(self.lookup(date)?.is_some())
    }
}

/// An oracle that knows no holidays.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayOracle for NoHolidays {
    fn lookup(&self, _date: NaiveDate) -> EngineResult<Option<PublicHoliday>> {
        Ok(None)
    }
}

/// A fixed set of holidays keyed by date.
///
/// When two entries share a date the later one wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HolidayCalendar {
    holidays: BTreeMap<NaiveDate, PublicHoliday>,
}

impl HolidayCalendar {
    /// Builds a calendar from a list of holidays.
    pub fn new(holidays: Vec<PublicHoliday>) -> Self {
        let mut calendar = Self::default();
        calendar.extend(holidays);
        calendar
    }

    /// Number of distinct holiday dates.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Whether the calendar is empty.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Holidays in date order.
    pub fn iter(&self) -> impl Iterator<Item = &PublicHoliday> {
        self.holidays.values()
    }
}

impl Extend<PublicHoliday> for HolidayCalendar {
    fn extend<I: IntoIterator<Item = PublicHoliday>>(&mut self, iter: I) {
        for holiday in iter {
            self.holidays.insert(holiday.date, holiday);
        }
    }
}

impl HolidayOracle for HolidayCalendar {
    fn lookup(&self, date: NaiveDate) -> EngineResult<Option<PublicHoliday>> {
        Ok(self.holidays.get(&date).cloned())
    }
}
