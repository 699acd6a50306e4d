//! # Random Worker
//!
//! A service that generates and keeps cryptographically secure random values:
//!
//! - **Strings**: constrained random strings with per-class minimums
//! - **Passwords**: the same generator, stored with a bcrypt hash
//! - **Ids**: random bytes presented as base64, hex and decimal
//!
//! The generation core lives in [`random`] and has no knowledge of HTTP or
//! storage.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                            Worker Service                             │
//! ├──────────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  ┌─────────────┐  │
//! │  │  API Layer  │→ │   Service   │→ │   Storage   │  │   Random    │  │
//! │  │   (Axum)    │  │    Layer    │  │    Layer    │  │    Core     │  │
//! │  └─────────────┘  └─────────────┘  └─────────────┘  └─────────────┘  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod random;
pub mod service;
pub mod storage;

use std::net::SocketAddr;
use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusBuilder;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

use crate::api::create_router;
use crate::api::state::AppState;
use crate::config::AppConfig;
use crate::storage::create_storage;

/// Run the random worker service.
///
/// This function:
/// 1. Loads configuration from files and environment
/// 2. Initializes logging and, if enabled, the metrics recorder
/// 3. Initializes the storage backend
/// 4. Creates all services
/// 5. Starts the HTTP server and handles graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded
/// - The metrics recorder cannot be installed
/// - Storage backend fails to initialize
/// - HTTP server fails to bind
pub async fn run() -> anyhow::Result<()> {
    let config = AppConfig::load()?;

    init_logging(&config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Random Worker"
    );

    let storage = create_storage(&config.storage).await?;
    info!(backend = %config.storage.backend, "Storage initialized");

    let mut state = AppState::new(Arc::new(config.clone()), storage);

    if config.observability.metrics_enabled {
        let handle = PrometheusBuilder::new().install_recorder()?;
        state = state.with_metrics(handle);
        info!("Prometheus recorder installed");
    }

    info!(
        source = state.random.source_name(),
        bcrypt_cost = config.generator.bcrypt_cost,
        "Generators ready"
    );

    let app = create_router(state);

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize logging based on configuration.
fn init_logging(config: &AppConfig) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_level));

    let subscriber = tracing_subscriber::registry().with(filter);

    if config.observability.log_format == "json" {
        subscriber.with(fmt::layer().json()).init();
    } else {
        subscriber.with(fmt::layer()).init();
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown");
        }
        () = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
