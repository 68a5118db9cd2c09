//! # In-Memory Catalog
//!
//! Process-local store used by default and in tests.
//!
//! Records live in a `Vec` in insertion order. List mutations take the
//! write half of a `RwLock`; the identifier counter has its own `Mutex` so
//! `next_id` never waits on readers.

use async_trait::async_trait;
use catalog_core::validation::{validate_product_id, validate_product_name, MAX_PRODUCT_ID};
use catalog_core::Product;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::{CatalogStore, ProductChange};

/// A catalog held entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    products: RwLock<Vec<Product>>,
    /// Number of identifiers issued so far; the next automatic id.
    counter: Mutex<u64>,
}

impl InMemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure automatic identifiers stay above `id`.
    ///
    /// `id` has already passed `validate_product_id`, so `id + 1` fits.
    async fn reserve(&self, id: u64) {
        let mut counter = self.counter.lock().await;
        if *counter <= id {
            *counter = id + 1;
        }
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn next_id(&self) -> StoreResult<u64> {
        let mut counter = self.counter.lock().await;
        let id = *counter;
        if id > MAX_PRODUCT_ID {
            return Err(StoreError::IdsExhausted);
        }
        *counter = id + 1;
        Ok(id)
    }

    async fn save(&self, mut product: Product) -> StoreResult<Product> {
        validate_product_name(&product.name)?;

        let id = match product.id {
            Some(id) => {
                validate_product_id(id)?;
                self.reserve(id).await;
                id
            }
            None => self.next_id().await?,
        };
        product.id = Some(id);

        let mut products = self.products.write().await;
        match products.iter_mut().find(|p| p.id == Some(id)) {
            Some(existing) => {
                debug!(id = %id, "Replacing product");
                *existing = product.clone();
            }
            None => {
                debug!(id = %id, "Appending product");
                products.push(product.clone());
            }
        }

        Ok(product)
    }

    async fn update(&self, id: u64, change: ProductChange<'_>) -> StoreResult<Option<Product>> {
        let mut products = self.products.write().await;
        let Some(existing) = products.iter_mut().find(|p| p.id == Some(id)) else {
            return Ok(None);
        };

        let mut product = existing.clone();
        change(&mut product)?;
        product.id = Some(id);
        validate_product_name(&product.name)?;

        debug!(id = %id, "Updating product");
        *existing = product.clone();
        Ok(Some(product))
    }

    async fn find(&self, id: u64) -> StoreResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == Some(id)).cloned())
    }

    async fn delete(&self, id: u64) -> StoreResult<()> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != Some(id));
        debug!(id = %id, removed = before - products.len(), "Deleted product");
        Ok(())
    }

    async fn all(&self) -> StoreResult<Vec<Product>> {
        Ok(self.products.read().await.clone())
    }

    async fn remove_all(&self) -> StoreResult<()> {
        let mut products = self.products.write().await;
        let mut counter = self.counter.lock().await;
        products.clear();
        *counter = 0;
        debug!("Cleared catalog");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
