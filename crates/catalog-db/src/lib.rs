//! # catalog-db: Storage Layer for the Product Catalog
//!
//! Stores Product records and issues their identifiers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Catalog Data Flow                                   │
//! │                                                                         │
//! │  HTTP handler (GET /products?keyword=phone)                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    catalog-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌─────────────────┐   ┌──────────────┐  │   │
//! │  │   │ CatalogStore  │    │ InMemoryCatalog │   │ RedisCatalog │  │   │
//! │  │   │  (store.rs)   │◄───│  (memory.rs)    │   │ (redis_store)│  │   │
//! │  │   │  async trait  │◄───┼─────────────────┼───│ JSON values  │  │   │
//! │  │   └───────────────┘    └─────────────────┘   └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> → catalog-core filters and sorts                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `CatalogStore` trait
//! - [`memory`] - Process-local store
//! - [`redis_store`] - Redis key-value store
//! - [`seed`] - Demo catalog
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use catalog_db::{CatalogStore, InMemoryCatalog, RedisCatalog};
//!
//! let store: Arc<dyn CatalogStore> = match redis_url {
//!     Some(url) => Arc::new(RedisCatalog::connect(&url).await?),
//!     None => Arc::new(InMemoryCatalog::new()),
//! };
//! let saved = store.save(Product::new("iPhone 8", 649.0)).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod redis_store;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCatalog;
pub use redis_store::RedisCatalog;
pub use store::{CatalogStore, ProductChange};
