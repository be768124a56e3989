//! lrukv - An in-memory key-value cache server
//!
//! Loads configuration from the environment, builds the configured cache
//! engine and serves it over HTTP until SIGINT/SIGTERM.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lrukv::api::create_router;
use lrukv::{build_cache, AppState, Config};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build and validate the cache engine (starts the TTL sweep if enabled)
/// 4. Create Axum router with all endpoints
/// 5. Serve HTTP until a shutdown signal arrives
/// 6. Stop the TTL sweep task
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lrukv=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting lrukv cache server");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("Refusing to start: {}", err);
            return Err(err.into());
        }
    };
    info!(
        "Configuration loaded: cache_type={}, capacity={}, sweep_interval={}s, port={}",
        config.cache_type, config.capacity, config.sweep_interval, config.server_port
    );

    let cache = match build_cache(&config) {
        Ok(cache) => Arc::new(cache),
        Err(err) => {
            error!("Refusing to start: {}", err);
            return Err(err.into());
        }
    };
    info!("Cache engine initialized");

    let app = create_router(AppState::from_shared(Arc::clone(&cache)));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    // The router has been dropped, so this is the last reference
    match Arc::try_unwrap(cache) {
        Ok(mut cache) => cache.shutdown().await,
        Err(_) => warn!("Cache still shared at shutdown, sweep stops on drop"),
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
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
}
