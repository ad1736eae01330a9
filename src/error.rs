//! Error types for estimation and their HTTP representation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Failure of a single estimation request.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PvError {
    /// A request field is outside its accepted range.
    #[error("invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    /// Calendar month outside 1..=12.
    #[error("month must be between 1 and 12, got {month}")]
    InvalidMonth { month: u32 },

    /// A derived figure came out NaN, infinite or outside its type's range.
    #[error("computation failed: {quantity} is out of range")]
    Computation { quantity: &'static str },
}

/// JSON body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ApiError {
    /// Stable error code for programmatic handling
    pub code: String,
    /// Human-readable message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Handler error, one variant per HTTP status we emit.
#[derive(Debug)]
pub enum AppError {
    /// Body is not valid JSON or does not match the request schema
    BadRequest(String),
    /// Estimation failure
    Pv(PvError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Pv(e @ PvError::InvalidField { .. }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiError::new("VALIDATION_ERROR", e.to_string()),
            ),
            AppError::Pv(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("COMPUTATION_FAILED", e.to_string()),
            ),
        };

        (status, Json(error)).into_response()
    }
}

impl From<PvError> for AppError {
    fn from(err: PvError) -> Self {
        AppError::Pv(err)
    }
}
