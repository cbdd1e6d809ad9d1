//! Overtime Ledger
//!
//! This crate computes daily salary, tiered overtime pay, foreign travel
//! allowances, leave deductions and comp-leave accrual from attendance
//! records, and aggregates the results into date-range summaries, month
//! estimates and lifetime statistics.
//!
//! The engine is total: every record, however malformed, produces a
//! breakdown. Unreadable fields fall back to documented defaults, records
//! without a readable date are left out of aggregation, and a failing holiday
//! oracle counts as "not a holiday". Errors only surface from configuration
//! loading and the parsing helpers.
//!
//! # Example
//!
//! ```
//! use overtime_ledger::calculation::compute_daily_pay;
//! use overtime_ledger::config::SettingsSnapshot;
//! use overtime_ledger::holidays::NoHolidays;
//! use overtime_ledger::models::AttendanceRecord;
//! use rust_decimal::Decimal;
//!
//! let record: AttendanceRecord =
//!     serde_json::from_str(r#"{"date": "2024-06-03", "endTime": "20:00"}"#).unwrap();
//! let pay = compute_daily_pay(&record, &SettingsSnapshot::default(), &NoHolidays);
//!
//! assert_eq!(pay.ot_hours, Decimal::new(25, 1));
//! assert!(pay.ot_pay > Decimal::ZERO);
//! ```

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod holidays;
pub mod models;
