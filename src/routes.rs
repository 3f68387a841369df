// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    config::MAX_UPLOAD_BYTES,
    handlers::{
        health::{health, method_not_allowed},
        upload,
    },
    state::AppState,
    utils::auth::upload_token_middleware,
};

/// Room for multipart boundaries and the title field on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Assembles the main application router.
///
/// * `/api/upload-excel` and `/api/parse-text` convert (and maybe publish) quizzes.
/// * `/api/health` reports liveness.
/// * Everything else is served from the static front-end directory.
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = if state.config.allowed_origins.is_empty() {
        vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://127.0.0.1:3000"),
        ]
    } else {
        state
            .config
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect()
    };

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let upload_routes = Router::new()
        .route(
            "/upload-excel",
            post(upload::upload_excel).fallback(method_not_allowed),
        )
        .route(
            "/parse-text",
            post(upload::parse_text).fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + MULTIPART_OVERHEAD))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            upload_token_middleware,
        ));

    let api_routes = Router::new()
        .route("/health", get(health))
        .merge(upload_routes);

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
