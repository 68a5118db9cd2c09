//! # Catalog API
//!
//! REST service for the product catalog.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog API Routes                              │
//! │                                                                         │
//! │  ┌──────────────────────────────────┐  ┌─────────────────────────────┐ │
//! │  │  ProductService                  │  │  HealthService              │ │
//! │  │                                  │  │                             │ │
//! │  │ • GET    /products               │  │ • GET /                     │ │
//! │  │ • POST   /products               │  │ • GET /healthcheck          │ │
//! │  │ • GET    /products/{id}          │  │                             │ │
//! │  │ • PUT    /products/{id}          │  └─────────────────────────────┘ │
//! │  │ • DELETE /products/{id}          │                                  │
//! │  │ • PUT    /products/{id}/review   │   anything else → JSON 404/405  │
//! │  └──────────────────────────────────┘                                  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │           Arc<dyn CatalogStore>  (memory or Redis)               │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `CATALOG_CONFIG` - Optional TOML config file
//! - `CATALOG_BIND_ADDR` - Listen address (default: 0.0.0.0)
//! - `PORT` - HTTP port (default: 5000)
//! - `CATALOG_BACKEND` - `memory` or `redis` (default: memory)
//! - `REDIS_URL` - Redis connection string
//! - `CATALOG_SEED_DEMO` - Load demo products at startup (default: false)

pub mod config;
pub mod error;
pub mod services;

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use catalog_db::{CatalogStore, InMemoryCatalog};

// Re-exports
pub use config::{CatalogConfig, StoreBackend};
pub use error::{ApiError, ErrorCode};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        AppState { store }
    }

    /// State over an empty in-memory catalog.
    pub fn in_memory() -> Self {
        AppState::new(Arc::new(InMemoryCatalog::new()))
    }
}

/// Builds the HTTP router.
pub fn router(state: AppState) -> Router {
    use services::{health_service as health, product_service as products};

    Router::new()
        .route("/", get(health::index).fallback(services::method_not_allowed))
        .route(
            "/healthcheck",
            get(health::healthcheck).fallback(services::method_not_allowed),
        )
        .route(
            "/products",
            get(products::list_products)
                .post(products::create_product)
                .fallback(services::method_not_allowed),
        )
        .route(
            "/products/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product)
                .fallback(services::method_not_allowed),
        )
        .route(
            "/products/{id}/review",
            put(products::add_review).fallback(services::method_not_allowed),
        )
        .fallback(services::not_found)
        .with_state(state)
}
