//! # Catalog API Server
//!
//! HTTP entry point for the product catalog.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  init_tracing ─► CatalogConfig::load ─► build store ─► (seed demo)     │
//! │                                             │                           │
//! │                          memory ◄───────────┴──────────► Redis          │
//! │                                                   (connect failure is   │
//! │                                                    fatal, not retried)  │
//! │                                                                         │
//! │  axum::serve(listener, router) ─► graceful shutdown on Ctrl+C/SIGTERM  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use anyhow::Context;
use catalog_api::{router, AppState, CatalogConfig, StoreBackend};
use catalog_db::seed::load_demo_products;
use catalog_db::{CatalogStore, InMemoryCatalog, RedisCatalog};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Starting Catalog API server...");

    let config = CatalogConfig::load().context("Failed to load configuration")?;
    info!(
        port = config.port,
        backend = %config.backend,
        seed_demo_data = config.seed_demo_data,
        "Configuration loaded"
    );

    let store = build_store(&config).await?;

    if config.seed_demo_data {
        load_demo_products(store.as_ref())
            .await
            .context("Failed to load demo products")?;
    }

    let app = router(AppState::new(store));

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Creates the configured store.
async fn build_store(config: &CatalogConfig) -> anyhow::Result<Arc<dyn CatalogStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory catalog");
            Ok(Arc::new(InMemoryCatalog::new()))
        }
        StoreBackend::Redis => {
            let url = config
                .redis_url
                .as_deref()
                .context("REDIS_URL is required for the redis backend")?;

            match RedisCatalog::connect(url).await {
                Ok(store) => Ok(Arc::new(store)),
                Err(e) => {
                    error!(error = %e, "Failed to connect to Redis");
                    Err(e).context("Redis connection failed")
                }
            }
        }
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
