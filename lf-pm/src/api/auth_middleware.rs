//! Authentication middleware for lf-pm
//!
//! Static token check: protected requests must carry the configured token in
//! the `X-Api-Token` header. An empty configured token disables auth checking
//! entirely, which is the zero-config default for single-tenant installs.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::AppState;

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "x-api-token";

/// Authentication middleware
///
/// Applied to protected routes only; /health and /api/buildinfo stay public.
pub async fn auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Empty token disables ALL auth checking
    if state.api_token.is_empty() {
        return Ok(next.run(request).await);
    }

    let provided = request
        .headers()
        .get(API_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    if provided != state.api_token {
        warn!("Rejected request with invalid API token");
        return Err(AuthError::InvalidToken);
    }

    Ok(next.run(request).await)
}

/// Authentication error types for HTTP responses
#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            AuthError::MissingToken => "Missing API token".to_string(),
            AuthError::InvalidToken => "Invalid API token".to_string(),
        };

        let body = Json(json!({
            "error": message,
        }));

        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}
