//! Configuration loading and management for the overtime ledger.
//!
//! This module provides the settings snapshot every calculation reads, the
//! single table of defaults behind it, and a loader for YAML configuration.
//!
//! # Example
//!
//! ```no_run
//! use overtime_ledger::config::SettingsLoader;
//!
//! let loader = SettingsLoader::load("./config").unwrap();
//! println!("Overtime starts after {}", loader.settings().rules.standard_end_time);
//! ```

pub mod defaults;
mod loader;
mod types;

pub use loader::SettingsLoader;
pub use types::{
    AllowanceSettings, LeavePolicy, OvertimeRules, SalaryChange, SalarySettings, SettingsSnapshot,
};
