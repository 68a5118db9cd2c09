//! # Sorting
//!
//! Orderings accepted by the `sort` request parameter.
//!
//! | Key      | Order                                   |
//! |----------|-----------------------------------------|
//! | `price`  | price, ascending                        |
//! | `price-` | price, descending                       |
//! | `review` | average review score, descending        |
//! | `name`   | name, ascending, ignoring case          |
//! | `name-`  | name, descending, ignoring case         |
//!
//! Keys are matched case-insensitively. An unrecognized key means "no
//! sort". All sorts are stable, so ties keep their store order.

use std::cmp::Ordering;

use crate::types::Product;

/// A recognized sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    ReviewDesc,
    NameAsc,
    NameDesc,
}

impl SortKey {
    /// Parses a `sort` parameter; `None` for anything unrecognized.
    pub fn parse(key: &str) -> Option<SortKey> {
        match key.trim().to_ascii_lowercase().as_str() {
            "price" => Some(SortKey::PriceAsc),
            "price-" => Some(SortKey::PriceDesc),
            "review" => Some(SortKey::ReviewDesc),
            "name" => Some(SortKey::NameAsc),
            "name-" => Some(SortKey::NameDesc),
            _ => None,
        }
    }

    fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::PriceAsc => a.price.total_cmp(&b.price),
            SortKey::PriceDesc => b.price.total_cmp(&a.price),
            SortKey::ReviewDesc => b.average_score().total_cmp(&a.average_score()),
            SortKey::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        }
    }
}

/// Sorts `products` in place.
pub fn sort_products(products: &mut [Product], key: SortKey) {
    products.sort_by(|a, b| key.compare(a, b));
}
