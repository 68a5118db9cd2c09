//! # Record Types
//!
//! The two records the catalog stores.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Record Types                                    │
//! │                                                                         │
//! │  ┌──────────────────────┐          ┌──────────────────────┐            │
//! │  │       Product        │  owns    │        Review        │            │
//! │  │  ──────────────────  │ ───────► │  ──────────────────  │            │
//! │  │  id (u64, optional)  │  0..n    │  username            │            │
//! │  │  name                │          │  score (f64)         │            │
//! │  │  price (f64)         │          │  date (free-form)    │            │
//! │  │  image_id            │          │  detail              │            │
//! │  │  description         │          └──────────────────────┘            │
//! │  │  review_list         │                                               │
//! │  └──────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! `id` is `None` until the store assigns one. Once a product has been saved
//! the store guarantees the identifier is unique.

use serde::{Deserialize, Serialize};

// =============================================================================
// Review
// =============================================================================

/// A customer review attached to a product.
///
/// The score has no enforced range; it is only compared and averaged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Who wrote the review.
    pub username: String,

    /// Free-form date string, as supplied by the client.
    #[serde(default)]
    pub date: String,

    /// Numeric score.
    pub score: f64,

    /// Review body.
    #[serde(default)]
    pub detail: String,
}

impl Review {
    /// Creates a review with an empty date and detail.
    pub fn new(username: impl Into<String>, score: f64) -> Self {
        Review {
            username: username.into(),
            date: String::new(),
            score,
            detail: String::new(),
        }
    }

    /// Sets the date.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    /// Sets the review body.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
///
/// Serializes to the wire format
/// `{id, name, price, image_id, description, review_list}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Identifier assigned by the store; `None` for a product not yet saved.
    #[serde(default)]
    pub id: Option<u64>,

    /// Display name. Required and non-empty once saved.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Identifier of the product image, if any.
    #[serde(default)]
    pub image_id: Option<String>,

    /// Optional long description.
    #[serde(default)]
    pub description: Option<String>,

    /// Reviews in the order they were added.
    #[serde(default)]
    pub review_list: Vec<Review>,
}

impl Product {
    /// Creates an unsaved product with no optional fields set.
    pub fn new(name: impl Into<String>, price: f64) -> Self {
        Product {
            id: None,
            name: name.into(),
            price,
            image_id: None,
            description: None,
            review_list: Vec::new(),
        }
    }

    /// Sets an explicit identifier.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets the image identifier.
    pub fn with_image_id(mut self, image_id: impl Into<String>) -> Self {
        self.image_id = Some(image_id.into());
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the review list.
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.review_list = reviews;
        self
    }

    /// Appends a review, keeping insertion order.
    pub fn add_review(&mut self, review: Review) {
        self.review_list.push(review);
    }

    /// Mean review score; exactly `0.0` when there are no reviews.
    pub fn average_score(&self) -> f64 {
        if self.review_list.is_empty() {
            return 0.0;
        }

        let total: f64 = self.review_list.iter().map(|r| r.score).sum();
        total / self.review_list.len() as f64
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
