//! Authentication middleware.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::api::state::AppState;
use crate::error::AppError;

/// Extract bearer token from Authorization header.
fn extract_bearer_token(req: &Request<Body>) -> Option<&str> {
    let auth_header = req.headers().get(AUTHORIZATION)?.to_str().ok()?;

    auth_header
        .strip_prefix("Bearer ")
        .or_else(|| auth_header.strip_prefix("bearer "))
}

/// Compare without short-circuiting on the first differing byte.
fn tokens_match(given: &str, expected: &str) -> bool {
    let (given, expected) = (given.as_bytes(), expected.as_bytes());
    if given.len() != expected.len() {
        return false;
    }
    given
        .iter()
        .zip(expected)
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}

fn unauthorized_response(reason: &str) -> Response {
    AppError::Unauthorized(reason.to_string()).into_response()
}

/// Middleware that requires the admin token.
pub async fn require_admin(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = extract_bearer_token(&req) else {
        return unauthorized_response("Missing or invalid Authorization header");
    };

    if !tokens_match(token, &state.config.auth.admin_token) {
        tracing::warn!(path = %req.uri().path(), "Rejected request with invalid token");
        return unauthorized_response("Invalid token");
    }

    next.run(req).await
}
