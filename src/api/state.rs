//! Application state for the overtime ledger API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{SettingsLoader, SettingsSnapshot};
use crate::holidays::HolidayCalendar;

/// Shared application state.
///
/// Holds the loaded settings snapshot and holiday calendar. Both are
/// read-only; a request that carries a live exchange rate composes it into
/// its own copy of the settings.
#[derive(Clone)]
pub struct AppState {
    settings: Arc<SettingsSnapshot>,
    calendar: Arc<HolidayCalendar>,
}

impl AppState {
    /// Creates a new application state from loaded configuration.
    pub fn new(loader: SettingsLoader) -> Self {
        let (settings, calendar) = loader.into_parts();
        Self {
            settings: Arc::new(settings),
            calendar: Arc::new(calendar),
        }
    }

    /// Returns the configured settings snapshot.
    pub fn settings(&self) -> &SettingsSnapshot {
        &self.settings
    }

    /// Returns the holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }
}
