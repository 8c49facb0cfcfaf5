// Router wiring for the panel
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_view, health_check, index, post_command, stream_view};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Compression skips text/event-stream, so the view stream is flushed per event
    Router::new()
        .route("/", get(index))
        .route("/healthz", get(health_check))
        .route("/api/view", get(get_view))
        .route("/api/view/stream", get(stream_view))
        .route("/api/commands/:name", post(post_command))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
