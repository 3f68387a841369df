// src/main.rs

use dotenvy::dotenv;
use quizdeck::config::Config;
use quizdeck::routes;
use quizdeck::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    let addr = config.bind_addr;

    let state = AppState::new(config).expect("Failed to initialize remote store client");

    match &state.publisher {
        Some(_) => tracing::info!(
            owner = ?state.config.publish.owner,
            repo = ?state.config.publish.repo,
            branch = %state.config.publish.branch,
            "Publishing enabled"
        ),
        None => tracing::info!("GITHUB_TOKEN not set, uploads are converted but not published"),
    }

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
