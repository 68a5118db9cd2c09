//! # Record Codec
//!
//! Converts products and reviews to and from their JSON wire format.
//!
//! Serialization goes through serde. Deserialization of *request* data is
//! done by hand instead, because the rules are stricter than serde's:
//!
//! - `name` and `price` must be present, and the error names the one missing
//! - every other key must be a known attribute; unknown keys are rejected,
//!   never dropped
//! - identifiers and numbers are coerced at this boundary (see
//!   [`crate::validation`])
//!
//! Stored records (already validated) are decoded with plain serde.

use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::types::{Product, Review};
use crate::validation::{
    coerce_id, coerce_number, coerce_optional_text, coerce_string, ValidationResult,
};

/// Whether a payload may change the product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdPolicy {
    Accept,
    Ignore,
}

fn as_object(value: &Value) -> ValidationResult<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        ValidationError::InvalidBody("body of request contained bad or no data".to_string())
    })
}

fn require<'a>(map: &'a Map<String, Value>, field: &str) -> ValidationResult<&'a Value> {
    map.get(field).ok_or_else(|| ValidationError::required(field))
}

/// Writes every key of `map` onto `product`.
fn assign(product: &mut Product, map: &Map<String, Value>, ids: IdPolicy) -> ValidationResult<()> {
    for (key, value) in map {
        match key.as_str() {
            "id" => {
                let id = coerce_id("id", value)?;
                if ids == IdPolicy::Accept {
                    product.id = id;
                }
            }
            "name" => product.name = coerce_string("name", value)?,
            "price" => product.price = coerce_number("price", value)?,
            "image_id" => product.image_id = coerce_optional_text("image_id", value)?,
            "description" => product.description = coerce_optional_text("description", value)?,
            "review_list" => product.review_list = reviews_from_json(value)?,
            other => return Err(ValidationError::unknown(other)),
        }
    }

    Ok(())
}

fn reviews_from_json(value: &Value) -> ValidationResult<Vec<Review>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(Review::from_json).collect(),
        _ => Err(ValidationError::invalid("review_list", "expected a list")),
    }
}

impl Product {
    /// Serializes the product to its wire format.
    ///
    /// Reviews are nested under `review_list` with every field present.
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    /// Builds a new product from request data.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{Product, ValidationError};
    /// use serde_json::json;
    ///
    /// let product = Product::from_json(&json!({"name": "iPhone 8", "price": 649})).unwrap();
    /// assert_eq!(product.id, None);
    ///
    /// let err = Product::from_json(&json!({"price": 900})).unwrap_err();
    /// assert_eq!(err, ValidationError::required("name"));
    /// ```
    pub fn from_json(value: &Value) -> ValidationResult<Product> {
        let map = as_object(value)?;
        let name = coerce_string("name", require(map, "name")?)?;
        let price = coerce_number("price", require(map, "price")?)?;

        let mut product = Product::new(name, price);
        assign(&mut product, map, IdPolicy::Accept)?;
        Ok(product)
    }

    /// Applies an update payload onto this product.
    ///
    /// Same rules as [`Product::from_json`]; fields absent from the payload
    /// keep their current value and the identifier never changes. On error
    /// the product is left untouched.
    pub fn apply_json(&mut self, value: &Value) -> ValidationResult<()> {
        let map = as_object(value)?;
        require(map, "name")?;
        require(map, "price")?;

        let mut updated = self.clone();
        assign(&mut updated, map, IdPolicy::Ignore)?;
        *self = updated;
        Ok(())
    }
}

impl Review {
    /// Builds a review from request data; `username` and `score` are required.
    pub fn from_json(value: &Value) -> ValidationResult<Review> {
        let map = as_object(value)?;
        let username = coerce_string("username", require(map, "username")?)?;
        let score = coerce_number("score", require(map, "score")?)?;

        let mut review = Review::new(username, score);
        for (key, value) in map {
            match key.as_str() {
                "username" | "score" => {}
                "date" => review.date = coerce_optional_text("date", value)?.unwrap_or_default(),
                "detail" => {
                    review.detail = coerce_optional_text("detail", value)?.unwrap_or_default()
                }
                other => return Err(ValidationError::unknown(other)),
            }
        }

        Ok(review)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
