//! Error types for the overtime ledger.
//!
//! The pay engine and the aggregation layer never fail: every record produces a
//! breakdown. These errors only come out of configuration loading, the parsing
//! helpers, and holiday lookups (which the engine downgrades to "not a holiday").

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the overtime ledger.
///
/// # Example
///
/// ```
/// use overtime_ledger::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/settings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/settings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A wall-clock time string was not of the form `HH:MM`.
    #[error("Invalid time of day: '{value}'")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// A date value could not be normalised to a calendar date.
    #[error("Invalid date: '{value}'")]
    InvalidDate {
        /// The rejected input.
        value: String,
    },

    /// A record sheet document was not valid JSON.
    #[error("Invalid record sheet: {message}")]
    InvalidSheet {
        /// A description of the parse error.
        message: String,
    },

    /// The holiday oracle could not answer for a date.
    #[error("Holiday lookup failed for {date}: {message}")]
    HolidayLookup {
        /// The date that was queried.
        date: NaiveDate,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
