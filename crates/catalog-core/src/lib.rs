//! # catalog-core: Pure Catalog Logic
//!
//! Record types and everything that can be done to records without touching
//! storage: wire-format (de)serialization, request validation, query
//! matching and sorting.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Product Catalog Service                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 catalog-api (axum HTTP service)                 │   │
//! │  │    /products  /products/{id}  /products/{id}/review  /health   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   codec   │  │   query   │  │   sort    │  │   │
//! │  │   │  Product  │  │ from_json │  │  Filter   │  │  SortKey  │  │   │
//! │  │   │  Review   │  │  to_json  │  │  Keyword  │  │  stable   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 catalog-db (Storage Layer)                      │   │
//! │  │           CatalogStore trait: in-memory and Redis               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product` and `Review`
//! - [`codec`] - JSON wire format, strict request decoding
//! - [`validation`] - Field checks and boundary coercion
//! - [`query`] - Field and keyword filters
//! - [`sort`] - Sort orders for listings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{apply_filters, sort_products, Filter, Product, QueryField, SortKey};
//!
//! let mut products = vec![
//!     Product::new("MacBook Pro", 1799.0).with_id(1),
//!     Product::new("iPhone 8", 649.0).with_id(0),
//! ];
//! sort_products(&mut products, SortKey::PriceAsc);
//! assert_eq!(products[0].name, "iPhone 8");
//!
//! let phones = apply_filters(products, &[Filter::new(QueryField::Keyword, "PHONE").unwrap()]);
//! assert_eq!(phones.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codec;
pub mod error;
pub mod query;
pub mod sort;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use query::{apply_filters, Filter, QueryField};
pub use sort::{sort_products, SortKey};
pub use types::*;
