// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{future::IntoFuture, net::SocketAddr, sync::Arc};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::application::live_view::LiveViewController;
use crate::infrastructure::config::load_panel_config;
use crate::infrastructure::http_command_gateway::HttpCommandGateway;
use crate::infrastructure::realtime_feed::RealtimeDbFeed;
use crate::presentation::app_state::AppState;
use crate::presentation::routes::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_panel_config().context("Failed to load panel configuration")?;

    // Create adapters (infrastructure layer)
    let feed = Arc::new(RealtimeDbFeed::new(&config.feed));
    let gateway = Arc::new(HttpCommandGateway::new(&config.commands)?);

    // Mount the live view (application layer); an unreachable feed leaves the default state
    let controller = LiveViewController::mount(feed, gateway).await;

    // Build router (presentation layer)
    let state = Arc::new(AppState {
        controller: controller.clone(),
    });
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;
    tracing::info!(%addr, "starting robot-panel");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Open view streams never finish on their own, so stop on ctrl-c instead of draining
    tokio::select! {
        result = axum::serve(listener, router).into_future() => result?,
        _ = tokio::signal::ctrl_c() => tracing::info!("shutting down"),
    }

    controller.teardown();
    Ok(())
}
