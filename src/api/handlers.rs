//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::calculation::{compute_payroll, compute_payroll_batch, is_valid_grade_step};
use crate::models::{AuditTrace, PayrollCalculation, PayrollInput};

use super::request::{BatchRequest, ValidateQuery};
use super::response::{ApiError, ApiErrorResponse, GradesResponse, ValidateResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/batch", post(batch_handler))
        .route("/grades", get(grades_handler))
        .route("/grades/validate", get(validate_handler))
        .with_state(state)
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON body rejection to an API error.
fn rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            // well-formed JSON whose fields have the wrong shape or value
            if ["missing field", "invalid value", "invalid type"]
                .iter()
                .any(|marker| body_text.contains(marker))
            {
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
    ApiErrorResponse::bad_request(error)
}

/// Handler for POST /payroll/calculate.
///
/// Computes one staff member's payroll and returns it with an audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayrollInput>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll calculation request");

    let input = match payload {
        Ok(Json(input)) => input,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };

    let config = state.config();
    let start_time = Instant::now();
    match compute_payroll(&input, config) {
        Ok(computation) => {
            let duration_us = start_time.elapsed().as_micros() as u64;
            info!(
                correlation_id = %correlation_id,
                grade_level = %computation.grade_level,
                step = computation.step,
                gross_pay = %computation.result.gross_pay,
                net_pay = %computation.result.net_pay,
                duration_us,
                "Calculation completed successfully"
            );
            json_ok(PayrollCalculation {
                calculation_id: Uuid::new_v4(),
                timestamp: Utc::now(),
                engine_version: env!("CARGO_PKG_VERSION").to_string(),
                scheme: config.scheme().code.clone(),
                grade_level: computation.grade_level,
                step: computation.step,
                result: computation.result,
                audit_trace: AuditTrace {
                    steps: computation.audit_steps,
                    duration_us,
                },
            })
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /payroll/batch.
///
/// Failed entries are reported in the body; the response is still 200.
/// The rayon fan-out runs on the blocking pool, off the async workers.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_error(rejection, correlation_id).into_response(),
    };
    info!(
        correlation_id = %correlation_id,
        entries = request.entries.len(),
        "Processing payroll batch request"
    );

    let start_time = Instant::now();
    let entries = request.entries;
    let batch = match tokio::task::spawn_blocking(move || {
        compute_payroll_batch(&entries, state.config())
    })
    .await
    {
        Ok(batch) => batch,
        Err(err) => {
            error!(
                correlation_id = %correlation_id,
                error = %err,
                "Batch task failed"
            );
            return ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::new("INTERNAL_ERROR", "Batch calculation failed"),
            }
            .into_response();
        }
    };
    info!(
        correlation_id = %correlation_id,
        staff_count = batch.totals.staff_count,
        failed_count = batch.totals.failed_count,
        total_net_pay = %batch.totals.total_net_pay,
        duration_us = start_time.elapsed().as_micros() as u64,
        "Batch completed"
    );

    json_ok(batch)
}

/// Handler for GET /grades/validate.
async fn validate_handler(
    State(state): State<AppState>,
    query: Result<Query<ValidateQuery>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(query)) => json_ok(ValidateResponse {
            valid: is_valid_grade_step(&query.grade, query.step, state.config().scale()),
        }),
        Err(rejection) => {
            ApiErrorResponse::bad_request(ApiError::validation_error(rejection.body_text()))
                .into_response()
        }
    }
}

/// Handler for GET /grades.
async fn grades_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_ok(GradesResponse {
        scheme: config.scheme().code.clone(),
        steps_per_grade: config.scale().steps_per_grade(),
        grades: config
            .scale()
            .grades()
            .iter()
            .map(|grade| grade.code.clone())
            .collect(),
    })
}
