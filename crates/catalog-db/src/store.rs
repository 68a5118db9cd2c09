//! # Catalog Store
//!
//! The storage contract shared by every backend.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Arc<dyn CatalogStore>  (constructed in main, injected as axum State)  │
//! │       │                                                                 │
//! │       ├──► InMemoryCatalog   Vec<Product> + counter, process-local     │
//! │       └──► RedisCatalog      key "<id>" → JSON, key "index" → counter  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identifier Rules
//! - Automatic identifiers start at 0 and increase by one per call to
//!   `next_id`, including calls whose save later fails.
//! - Saving a product with an explicit identifier raises the counter past
//!   it, so automatic identifiers never collide with explicit ones.
//! - `remove_all` resets the counter to 0.
//! - Explicit identifiers above `MAX_PRODUCT_ID` are refused; once the
//!   counter passes it, `next_id` fails with `StoreError::IdsExhausted`.

use async_trait::async_trait;
use catalog_core::{apply_filters, Filter, Product, QueryField, ValidationError};

use crate::error::StoreResult;

/// An in-place edit of a stored product, as passed to [`CatalogStore::update`].
pub type ProductChange<'a> =
    &'a (dyn Fn(&mut Product) -> Result<(), ValidationError> + Send + Sync);

/// Persistence operations for the product catalog.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Short backend name (`"memory"`, `"redis"`) for logs and health output.
    fn backend(&self) -> &'static str;

    /// Checks that the backing storage answers.
    async fn ping(&self) -> StoreResult<()>;

    /// Issues the next automatic identifier.
    async fn next_id(&self) -> StoreResult<u64>;

    /// Inserts or fully replaces a product and returns what was stored.
    ///
    /// An empty name is refused before anything changes. A product without
    /// an identifier gets one from [`CatalogStore::next_id`].
    async fn save(&self, product: Product) -> StoreResult<Product>;

    /// Looks up a product by identifier.
    async fn find(&self, id: u64) -> StoreResult<Option<Product>>;

    /// Removes a product; absent identifiers are ignored.
    async fn delete(&self, id: u64) -> StoreResult<()>;

    /// Snapshot of every stored product.
    async fn all(&self) -> StoreResult<Vec<Product>>;

    /// Removes every product and resets the identifier counter.
    async fn remove_all(&self) -> StoreResult<()>;

    /// Applies `change` to product `id` and stores the result.
    ///
    /// Returns `None` if no such product exists. If `change` fails nothing
    /// is written. The identifier is kept whatever `change` does to it.
    ///
    /// The default reads with `find` and writes with `save`, so another
    /// writer may land in between; backends that can hold a lock across
    /// both override it.
    async fn update(&self, id: u64, change: ProductChange<'_>) -> StoreResult<Option<Product>> {
        let Some(mut product) = self.find(id).await? else {
            return Ok(None);
        };
        change(&mut product)?;
        product.id = Some(id);
        self.save(product).await.map(Some)
    }

    /// Products whose `field` contains `value`, ignoring case.
    async fn query(&self, field: QueryField, value: &str) -> StoreResult<Vec<Product>> {
        let filter = Filter::new(field, value)?;
        self.filter(&[filter]).await
    }

    /// Products matching every filter, in store order.
    ///
    /// Scans [`CatalogStore::all`]; backends with an index may override.
    async fn filter(&self, filters: &[Filter]) -> StoreResult<Vec<Product>> {
        Ok(apply_filters(self.all().await?, filters))
    }
}
