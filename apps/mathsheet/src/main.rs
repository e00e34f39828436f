mod answers;
mod config;
mod errors;
mod generation;
mod layout;
mod models;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::generation::registry::{load_bank, GeneratorRegistry};
use crate::layout::Grid;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting mathsheet v{}", env!("CARGO_PKG_VERSION"));

    // Validate grid dimensions up front rather than on the first request
    let layout_config = config.layout_config();
    Grid::new(&layout_config)?;
    info!(
        "Layout grid: {} columns x {} rows per page",
        layout_config.grid_width, layout_config.grid_height
    );

    // Initialize generator registry
    let registry = match &config.question_bank_path {
        Some(path) => load_bank(path)?,
        None => GeneratorRegistry::new(),
    };
    if registry.is_empty() {
        warn!("No question bank configured; /api/v1/sheets will reject every selection");
    }

    let state = AppState {
        layout_config,
        registry: Arc::new(registry),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
