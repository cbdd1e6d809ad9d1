//! The one table of fallback values.
//!
//! Any settings field that is missing takes its value from here; nothing else
//! in the crate hard-codes a default.

use chrono::NaiveTime;
use rust_decimal::Decimal;

/// Monthly base salary when none is configured.
pub const DEFAULT_BASE_MONTHLY: Decimal = Decimal::from_parts(50000, 0, 0, false, 0);

/// Multiplier for the first two overtime hours.
pub const DEFAULT_OT1: Decimal = Decimal::from_parts(134, 0, 0, false, 2);

/// Multiplier for overtime hours two to four.
pub const DEFAULT_OT2: Decimal = Decimal::from_parts(167, 0, 0, false, 2);

/// Multiplier for overtime beyond four hours.
pub const DEFAULT_OT3: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Daily travel allowance, in the reference currency (USD).
pub const DEFAULT_TRIP_DAILY: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Reference-to-local exchange rate used when no live rate is available.
pub const DEFAULT_EXCHANGE_RATE: Decimal = Decimal::from_parts(325, 0, 0, false, 1);

/// Share of a day's base deducted for a full day of personal leave.
pub const DEFAULT_PERSONAL_LEAVE_RATIO: Decimal = Decimal::from_parts(1, 0, 0, false, 0);

/// Share of a day's base deducted for a full day of sick leave (half pay).
pub const DEFAULT_SICK_LEAVE_RATIO: Decimal = Decimal::from_parts(5, 0, 0, false, 1);

/// Nominal end of the working day, 17:30.
pub fn default_standard_end_time() -> NaiveTime {
    NaiveTime::from_hms_opt(17, 30, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_default_constants() {
        assert_eq!(DEFAULT_BASE_MONTHLY, dec("50000"));
        assert_eq!(DEFAULT_OT1, dec("1.34"));
        assert_eq!(DEFAULT_OT2, dec("1.67"));
        assert_eq!(DEFAULT_OT3, dec("2.0"));
        assert_eq!(DEFAULT_TRIP_DAILY, dec("50"));
        assert_eq!(DEFAULT_EXCHANGE_RATE, dec("32.5"));
        assert_eq!(DEFAULT_SICK_LEAVE_RATIO, dec("0.5"));
    }

    #[test]
    fn test_default_standard_end_time() {
        assert_eq!(
            default_standard_end_time(),
            NaiveTime::from_hms_opt(17, 30, 0).unwrap()
        );
    }
}
