//! Response types for the payroll engine API.
//!
//! This module defines the success bodies that are not engine models, the
//! error response structure, and the mapping from engine errors to HTTP.

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::MAX_AMOUNT;

/// Body of the `/grades/validate` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateResponse {
    /// Whether the grade and step exist on the scale.
    pub valid: bool,
}

/// Body of the `/grades` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradesResponse {
    /// The salary structure code.
    pub scheme: String,
    /// Number of steps in every grade.
    pub steps_per_grade: u32,
    /// Grade codes in ascending order.
    pub grades: Vec<String>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying the given error.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            Json(self.error),
        )
            .into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
            EngineError::InvalidGradeOrStep { grade, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_GRADE_OR_STEP",
                    message,
                    format!(
                        "Grade '{}' is not on the scale or the step is outside its range",
                        grade
                    ),
                ),
            ),
            EngineError::NegativeAmount { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "NEGATIVE_AMOUNT",
                    message,
                    format!("Field '{}' must be zero or more", field),
                ),
            ),
            EngineError::AmountOutOfRange { field, .. } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "AMOUNT_OUT_OF_RANGE",
                    message,
                    format!("Field '{}' must not exceed {}", field, MAX_AMOUNT),
                ),
            ),
            EngineError::AmountOverflow { .. } => {
                ApiErrorResponse::bad_request(ApiError::new("AMOUNT_OVERFLOW", message))
            }
            EngineError::InvalidStatusTransition { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("INVALID_STATUS_TRANSITION", message),
            },
            EngineError::RunNotEditable { .. } => ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("RUN_NOT_EDITABLE", message),
            },
        }
    }
}
