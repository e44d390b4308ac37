//! # Depot API
//!
//! HTTP server exposing the product repository.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Depot API Server                               │
//! │                                                                         │
//! │  Client ───► HTTP (8080) ───► Route Handlers ───► ProductRepository     │
//! │                                     │                      │            │
//! │                                     ▼                      ▼            │
//! │                                 DTO layer               SQLite          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup is fail-fast: a missing or malformed `DATABASE_URL` and a query
//! catalog that disagrees with the row mapper both abort before the
//! listener binds.

mod config;
mod dto;
mod error;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use depot_db::{ensure_schema, ConnectionProvider, ProductRepository};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repo: ProductRepository,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("Starting Depot API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(port = config.http_port, "Configuration loaded");

    // Validate the connection string once, before any traffic
    let provider = ConnectionProvider::new(&config.database_url)?;
    ensure_schema(&provider).await?;
    info!("Schema ensured");

    // Repository construction verifies the query catalog
    let repo = ProductRepository::new(provider)?;

    // Create shared state
    let state = Arc::new(AppState { repo });

    // Build router
    let app = routes::router(state);

    // Bind listener
    let addr = format!("0.0.0.0:{}", config.http_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "Starting HTTP server");

    // Run with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
