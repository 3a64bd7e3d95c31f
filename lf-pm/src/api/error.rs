//! API error responses
//!
//! One error type for all lead-facing handlers, rendered as
//! `{ "error": message }` JSON with the matching status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Errors surfaced by the prospect/pipeline/import handlers
#[derive(Debug)]
pub enum ApiError {
    /// Invalid request payload or parameter (400)
    Validation(String),
    /// No lead with the requested id (404)
    NotFound(String),
    /// Remote lead source unreachable or misbehaving (502)
    Remote(String),
    /// Store failure (500)
    Database(String),
}

impl From<lf_common::Error> for ApiError {
    fn from(err: lf_common::Error) -> Self {
        match err {
            lf_common::Error::NotFound(msg) => ApiError::NotFound(msg),
            lf_common::Error::InvalidInput(msg) => ApiError::Validation(msg),
            other => ApiError::Database(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, format!("Not found: {}", msg)),
            ApiError::Remote(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Remote lead source error: {}", msg),
            ),
            ApiError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
            ),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
