//! Request types for the overtime ledger API.
//!
//! Records inside requests use the same lenient deserialization as stored
//! records, so a bad field takes its default instead of failing the request.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AttendanceRecord, DateRange, YearMonth};

/// Request body for `POST /daily-pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPayRequest {
    /// The record to price.
    pub record: AttendanceRecord,
    /// A live exchange rate to use instead of the configured one.
    #[serde(default, deserialize_with = "crate::models::lenient::setting")]
    pub live_rate: Option<Decimal>,
}

/// Request body for `POST /summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    /// The record collection.
    pub records: Vec<AttendanceRecord>,
    /// The inclusive date range to summarise.
    pub range: DateRange,
    /// A live exchange rate to use instead of the configured one.
    #[serde(default, deserialize_with = "crate::models::lenient::setting")]
    pub live_rate: Option<Decimal>,
}

/// Request body for `POST /estimate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    /// The record collection.
    pub records: Vec<AttendanceRecord>,
    /// The month to estimate, as `YYYY-MM`.
    pub month: YearMonth,
    /// A live exchange rate to use instead of the configured one.
    #[serde(default, deserialize_with = "crate::models::lenient::setting")]
    pub live_rate: Option<Decimal>,
}

/// Request body for `POST /stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRequest {
    /// The full record history.
    pub records: Vec<AttendanceRecord>,
    /// The reference day for rolling-year and current-month figures.
    pub today: NaiveDate,
    /// A live exchange rate to use instead of the configured one.
    #[serde(default, deserialize_with = "crate::models::lenient::setting")]
    pub live_rate: Option<Decimal>,
}
