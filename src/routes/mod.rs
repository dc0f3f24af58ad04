pub mod puzzles;
pub mod users;

use crate::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

/// Builds the full HTTP surface around `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .nest("/api/puzzles", puzzles::router())
        .nest("/api/users", users::router())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "puzzle-notify is running!"
}
