// src/handlers/health.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// Liveness probe; also reports whether uploads will be published.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "publishing": state.publisher.is_some(),
    }))
}

/// Fallback for known API paths hit with the wrong method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
