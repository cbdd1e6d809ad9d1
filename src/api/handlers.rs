//! HTTP request handlers for the overtime ledger API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate, compute_daily_pay, estimate_month, lifetime_stats};

use super::request::{DailyPayRequest, EstimateRequest, StatsRequest, SummaryRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/daily-pay", post(daily_pay_handler))
        .route("/summary", post(summary_handler))
        .route("/estimate", post(estimate_handler))
        .route("/stats", post(stats_handler))
        .with_state(state)
}

/// Handler for POST /daily-pay.
///
/// Prices a single record and returns the full breakdown with its audit steps.
async fn daily_pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<DailyPayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing daily pay request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(rejection, correlation_id),
    };

    let settings = state.settings().clone().with_live_rate(request.live_rate);
    let start_time = Instant::now();
    let pay = compute_daily_pay(&request.record, &settings, state.calendar());

    info!(
        correlation_id = %correlation_id,
        date = ?pay.date,
        total = %pay.total,
        duration_us = start_time.elapsed().as_micros(),
        "Daily pay computed"
    );
    ok_json(pay)
}

/// Handler for POST /summary.
async fn summary_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummaryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing summary request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(rejection, correlation_id),
    };

    if request.range.start > request.range.end {
        warn!(
            correlation_id = %correlation_id,
            start = %request.range.start,
            end = %request.range.end,
            "Inverted summary range"
        );
        return ApiErrorResponse::bad_request(ApiError::inverted_range(
            request.range.start,
            request.range.end,
        ))
        .into_response();
    }

    let settings = state.settings().clone().with_live_rate(request.live_rate);
    let start_time = Instant::now();
    let summary = aggregate(&request.records, &settings, state.calendar(), request.range);

    info!(
        correlation_id = %correlation_id,
        records = summary.records,
        skipped = summary.skipped_records,
        duration_us = start_time.elapsed().as_micros(),
        "Summary computed"
    );
    ok_json(summary)
}

/// Handler for POST /estimate.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(rejection, correlation_id),
    };

    let settings = state.settings().clone().with_live_rate(request.live_rate);
    let start_time = Instant::now();
    let estimate = estimate_month(&request.records, &settings, state.calendar(), request.month);

    info!(
        correlation_id = %correlation_id,
        month = %estimate.month,
        estimated_total = %estimate.estimated_total,
        duration_us = start_time.elapsed().as_micros(),
        "Month estimate computed"
    );
    ok_json(estimate)
}

/// Handler for POST /stats.
async fn stats_handler(
    State(state): State<AppState>,
    payload: Result<Json<StatsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing stats request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject(rejection, correlation_id),
    };

    let settings = state.settings().clone().with_live_rate(request.live_rate);
    let start_time = Instant::now();
    let stats = lifetime_stats(&request.records, &settings, state.calendar(), request.today);

    info!(
        correlation_id = %correlation_id,
        records = stats.records,
        duration_us = start_time.elapsed().as_micros(),
        "Lifetime stats computed"
    );
    ok_json(stats)
}

fn ok_json<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a body rejection to a 400 with an [`ApiError`] payload.
fn reject(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // Get the body text which contains the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
