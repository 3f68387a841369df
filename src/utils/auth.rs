// src/utils/auth.rs

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};

use crate::{config::Config, error::AppError};

/// Axum Middleware: upload token check.
///
/// When `UPLOAD_TOKEN` is configured, requests must carry
/// `Authorization: Bearer <token>`; otherwise 401 Unauthorized.
/// Without a configured token every request passes through.
pub async fn upload_token_middleware(
    State(config): State<Config>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(expected) = config.upload_token.as_deref() else {
        return Ok(next.run(req).await);
    };

    let provided = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if tokens_match(token, expected) => Ok(next.run(req).await),
        _ => Err(AppError::AuthError("Invalid or missing upload token".to_string())),
    }
}

/// Compares without short-circuiting on the first differing byte.
/// Only the length is allowed to leak.
fn tokens_match(provided: &str, expected: &str) -> bool {
    let (provided, expected) = (provided.as_bytes(), expected.as_bytes());
    if provided.len() != expected.len() {
        return false;
    }
    provided
        .iter()
        .zip(expected)
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
