//! HTTP API for the overtime ledger.
//!
//! This module provides a REST API for pricing attendance records and
//! summarising them.
//!
//! # Endpoints
//!
//! - `POST /daily-pay` prices one record
//! - `POST /summary` aggregates records over an inclusive date range
//! - `POST /estimate` estimates one month's pay slip
//! - `POST /stats` computes lifetime and rolling-year figures
//!
//! Every endpoint accepts an optional `liveRate`, which replaces the
//! configured exchange rate for that request when it is positive.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{DailyPayRequest, EstimateRequest, StatsRequest, SummaryRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
