//! Forgehook webhook intake server

use axum::routing::{any, get};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("webhook=debug".parse()?)
                .add_directive("api=debug".parse()?),
        )
        .init();

    info!("Starting Forgehook intake");

    // Load configuration
    let config = common::Config::from_env();

    // Create app state
    let state = Arc::new(AppState::new(&config)?);

    // The webhook route accepts any method: the authenticator owns the
    // method check so rejections carry the designed status and message.
    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/webhook", any(routes::webhooks::deliver))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
