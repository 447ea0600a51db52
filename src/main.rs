//! Catalog Server - A lightweight catalog API server
//!
//! Serves a JSON-file-backed item catalog with search, pagination and
//! cached aggregate statistics.

mod api;
mod config;
mod error;
mod models;
mod stats;
mod store;
mod tasks;

use std::net::SocketAddr;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use store::spawn_store_watcher;
use tasks::spawn_refresh_task;

/// Main entry point for the catalog server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the file store and stats aggregator
/// 4. Warm the stats cache before accepting traffic
/// 5. Start the periodic stats refresh task and the store watcher
/// 6. Create Axum router with all endpoints
/// 7. Start HTTP server on configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Catalog Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: data_path={}, port={}, stats_ttl={}s, incremental_threshold={}",
        config.data_path.display(),
        config.server_port,
        config.stats_cache_ttl,
        config.stats_incremental_threshold
    );

    // Create application state with store and aggregator
    let state = AppState::from_config(&config);

    // Warm the stats cache; failures are logged and retried by the
    // periodic task, a dead data file should not keep the server down
    state.stats.refresh().await;
    info!("Stats cache warmed");

    // Start the periodic refresh safety net
    let refresh_handle = spawn_refresh_task(state.stats.clone(), config.stats_ttl());
    info!("Background stats refresh task started");

    // Watch the data file for out-of-band changes
    let watcher = match spawn_store_watcher(state.store.clone(), state.stats.clone()) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            warn!(error = %err, "Store watcher unavailable, relying on periodic refresh");
            None
        }
    };

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(refresh_handle))
        .await
        .unwrap();

    // Unregister the file watch last
    if let Some(watcher) = watcher {
        watcher.stop().await;
    }

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the refresh task and allows graceful shutdown.
async fn shutdown_signal(refresh_handle: tokio::task::JoinHandle<()>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the refresh task
    refresh_handle.abort();
    warn!("Stats refresh task aborted");
}
