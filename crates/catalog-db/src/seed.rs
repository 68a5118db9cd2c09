//! # Demo Catalog
//!
//! Two reviewed products used for local development and demos. Loaded at
//! startup when `seed_demo_data` is set, and by the `seed` binary.

use catalog_core::{Product, Review};
use tracing::info;

use crate::error::StoreResult;
use crate::store::CatalogStore;

/// The demo products, with fixed identifiers 0 and 1.
pub fn demo_products() -> Vec<Product> {
    let phone_reviews = vec![
        Review::new("applefan", 4.0).with_detail("OK"),
        Review::new("helloworld", 4.0).with_detail("As expected"),
        Review::new("pythonfan", 3.0).with_detail("So So"),
    ];
    let laptop_reviews = vec![
        Review::new("applelover", 5.0).with_detail("Excellent"),
        Review::new("tvfan", 5.0).with_detail("Loving this!!"),
        Review::new("devops team member", 5.0).with_detail("Highly recommend!"),
        Review::new("nyu", 5.0).with_detail("Nice!"),
    ];

    vec![
        Product::new("iPhone 8", 649.0)
            .with_id(0)
            .with_reviews(phone_reviews),
        Product::new("MacBook Pro", 1799.0)
            .with_id(1)
            .with_reviews(laptop_reviews),
    ]
}

/// Saves the demo products into `store`, replacing records with the same ids.
pub async fn load_demo_products(store: &dyn CatalogStore) -> StoreResult<usize> {
    let products = demo_products();
    let count = products.len();
    for product in products {
        store.save(product).await?;
    }

    info!(count, backend = store.backend(), "Loaded demo catalog");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryCatalog;

    #[test]
    fn test_demo_products() {
        let products = demo_products();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].review_list.len(), 3);
        assert_eq!(products[1].review_list.len(), 4);
        assert_eq!(products[1].average_score(), 5.0);
    }

    #[tokio::test]
    async fn test_load_is_idempotent() {
        let store = InMemoryCatalog::new();
        load_demo_products(&store).await.unwrap();
        load_demo_products(&store).await.unwrap();

        assert_eq!(store.all().await.unwrap().len(), 2);
        let next = store.save(Product::new("Watch", 199.0)).await.unwrap();
        assert_eq!(next.id, Some(2));
    }
}
