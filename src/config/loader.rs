//! Configuration loading functionality.
//!
//! This module provides the [`SettingsLoader`] type for loading a settings
//! snapshot and the holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::holidays::{HolidayCalendar, PublicHoliday};

use super::types::SettingsSnapshot;

/// The layout of one file under `holidays/`.
#[derive(Debug, Deserialize)]
struct HolidayFile {
    #[serde(default)]
    holidays: Vec<PublicHoliday>,
}

/// Loads and provides access to the ledger's configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── settings.yaml       # Salary, overtime rules, allowance, leave policy
/// └── holidays/
///     ├── 2025.yaml       # { holidays: [{ date, name }, ...] }
///     └── 2026.yaml
/// ```
///
/// `settings.yaml` is required; the `holidays/` directory is optional.
///
/// # Example
///
/// ```no_run
/// use overtime_ledger::config::SettingsLoader;
///
/// let loader = SettingsLoader::load("./config")?;
/// println!("Base salary: {}", loader.settings().salary.base_monthly);
/// println!("Known holidays: {}", loader.calendar().len());
/// # Ok::<(), overtime_ledger::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    settings: SettingsSnapshot,
    calendar: HolidayCalendar,
}

impl SettingsLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `settings.yaml` is missing or malformed, or if
    /// any holiday file is malformed.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<SettingsSnapshot>(&path.join("settings.yaml"))?;
        let calendar = Self::load_holidays(&path.join("holidays"))?;

        tracing::info!(
            path = %path.display(),
            holidays = calendar.len(),
            salary_changes = settings.salary_history.len(),
            "Configuration loaded"
        );

        Ok(Self { settings, calendar })
    }

    /// Wraps an already-built snapshot and calendar.
    pub fn from_parts(settings: SettingsSnapshot, calendar: HolidayCalendar) -> Self {
        Self { settings, calendar }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads every `.yaml` file in the holidays directory, in file name order.
    fn load_holidays(holidays_dir: &Path) -> EngineResult<HolidayCalendar> {
        if !holidays_dir.exists() {
            tracing::debug!(path = %holidays_dir.display(), "No holiday directory");
            return Ok(HolidayCalendar::default());
        }

        let dir_str = holidays_dir.display().to_string();
        let entries = fs::read_dir(holidays_dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        files.sort();

        let mut calendar = HolidayCalendar::default();
        for file in files {
            calendar.extend(Self::load_holiday_file(&file)?);
        }
        Ok(calendar)
    }

    fn load_holiday_file(path: &Path) -> EngineResult<Vec<PublicHoliday>> {
        let file = Self::load_yaml::<HolidayFile>(path)?;
        tracing::debug!(path = %path.display(), count = file.holidays.len(), "Holiday file loaded");
        Ok(file.holidays)
    }

    /// Returns the settings snapshot.
    pub fn settings(&self) -> &SettingsSnapshot {
        &self.settings
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Splits the loader into its parts.
    pub fn into_parts(self) -> (SettingsSnapshot, HolidayCalendar) {
        (self.settings, self.calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::HolidayOracle;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = SettingsLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.settings().salary.base_monthly, dec("60000"));
        assert_eq!(loader.settings().salary_history.len(), 2);
        assert_eq!(loader.settings().allowance.exchange_rate, dec("32.5"));
    }

    #[test]
    fn test_bundled_holidays_loaded() {
        let loader = SettingsLoader::load(config_path()).unwrap();
        let national_day = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        assert!(loader.calendar().is_holiday(national_day).unwrap());
        assert!(!loader.calendar().is_empty());
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = SettingsLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("settings.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_missing_holiday_directory_is_empty_calendar() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.yaml"), "salary:\n  baseMonthly: \"42000\"\n").unwrap();

        let loader = SettingsLoader::load(dir.path()).unwrap();
        assert_eq!(loader.settings().salary.base_monthly, dec("42000"));
        assert!(loader.calendar().is_empty());
    }

    #[test]
    fn test_malformed_settings_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.yaml"), "salary: [unclosed\n").unwrap();

        let result = SettingsLoader::load(dir.path());
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_blank_settings_values_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("settings.yaml"),
            "salary:\n  baseMonthly:\nrules:\n  standardEndTime: teatime\n  ot1: \"\"\n",
        )
        .unwrap();

        let loader = SettingsLoader::load(dir.path()).unwrap();
        assert_eq!(loader.settings(), &SettingsSnapshot::default());
    }

    #[test]
    fn test_malformed_holiday_file_returns_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.yaml"), "{}\n").unwrap();
        fs::create_dir(dir.path().join("holidays")).unwrap();
        fs::write(
            dir.path().join("holidays").join("2025.yaml"),
            "holidays:\n  - date: not-a-date\n    name: Broken\n",
        )
        .unwrap();

        let result = SettingsLoader::load(dir.path());
        match result {
            Err(EngineError::ConfigParseError { path, .. }) => assert!(path.contains("2025.yaml")),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_non_yaml_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("settings.yaml"), "{}\n").unwrap();
        fs::create_dir(dir.path().join("holidays")).unwrap();
        fs::write(dir.path().join("holidays").join("README.md"), "# notes").unwrap();

        let loader = SettingsLoader::load(dir.path()).unwrap();
        assert!(loader.calendar().is_empty());
        assert_eq!(loader.settings(), &SettingsSnapshot::default());
    }
}
