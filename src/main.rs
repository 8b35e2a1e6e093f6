// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::streaming_service::StreamingBoardService;
use crate::application::timeline_service::TimelineService;
use crate::infrastructure::config::{load_palette_config, load_server_config, load_timelines_config};
use crate::infrastructure::http_repository::HttpSampleRepository;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{get_timeline, health_check, list_timelines, stream_board};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let server_config = load_server_config()?;
    let palette = load_palette_config()?.into_palette();
    let timelines_config = load_timelines_config()?;

    tracing::info!(
        "Loaded {} timelines, {} palette colors",
        timelines_config.timelines.len(),
        palette.len()
    );

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpSampleRepository::new(
        server_config.upstream.host,
        server_config.upstream.token,
    ));

    // Create services (application layer)
    let timeline_service = TimelineService::new(
        repository,
        Arc::new(palette),
        timelines_config,
        server_config.upstream.max_points,
    );
    let streaming_service = StreamingBoardService::new(timeline_service.clone());

    // Create application state
    let state = Arc::new(AppState {
        timeline_service,
        streaming_service,
    });

    // Build router (presentation layer)
    // Responses are compressed by our own builders, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/timelines", get(list_timelines))
        .route("/timelines/:id", get(get_timeline))
        .route("/boards/:source", get(stream_board))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = server_config.server.bind_address.parse()?;
    tracing::info!("Starting risk-timeline service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
