//! # Query Matching
//!
//! Field and keyword filters over a snapshot of the catalog.
//!
//! A filter matches when the serialized text of a field contains the
//! requested value, ignoring case. The value is always taken literally:
//! it is escaped before being compiled, so `.` or `*` in a search string
//! match those characters and nothing else.
//!
//! ```text
//!   GET /products?name=phone&keyword=8
//!            │
//!            ▼
//!   [Filter(Name, "phone"), Filter(Keyword, "8")]   ── AND ──►  matching products,
//!                                                               store order kept
//! ```
//!
//! Nested review data is never searched.

use std::fmt;
use std::str::FromStr;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::error::ValidationError;
use crate::types::Product;
use crate::validation::ValidationResult;

// =============================================================================
// Query Field
// =============================================================================

/// A product attribute that can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryField {
    Id,
    Name,
    Price,
    ImageId,
    Description,
    /// Any of the scalar fields above.
    Keyword,
}

impl QueryField {
    /// Scalar fields searched by [`QueryField::Keyword`].
    pub const SCALAR: [QueryField; 5] = [
        QueryField::Id,
        QueryField::Name,
        QueryField::Price,
        QueryField::ImageId,
        QueryField::Description,
    ];

    /// The request parameter name for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryField::Id => "id",
            QueryField::Name => "name",
            QueryField::Price => "price",
            QueryField::ImageId => "image_id",
            QueryField::Description => "description",
            QueryField::Keyword => "keyword",
        }
    }

    /// Text of this field as it appears in the serialized product.
    ///
    /// Unset optional fields read as the empty string. Not meaningful for
    /// [`QueryField::Keyword`], which returns the empty string.
    pub fn text_of(&self, product: &Product) -> String {
        match self {
            QueryField::Id => product.id.map(|id| id.to_string()).unwrap_or_default(),
            QueryField::Name => product.name.clone(),
            QueryField::Price => Value::from(product.price).to_string(),
            QueryField::ImageId => product.image_id.clone().unwrap_or_default(),
            QueryField::Description => product.description.clone().unwrap_or_default(),
            QueryField::Keyword => String::new(),
        }
    }
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(QueryField::Id),
            "name" => Ok(QueryField::Name),
            "price" => Ok(QueryField::Price),
            "image_id" => Ok(QueryField::ImageId),
            "description" => Ok(QueryField::Description),
            "keyword" => Ok(QueryField::Keyword),
            "review_list" => Err(ValidationError::invalid(
                "review_list",
                "reviews cannot be searched",
            )),
            other => Err(ValidationError::unknown(other)),
        }
    }
}

// =============================================================================
// Filter
// =============================================================================

/// A single `field contains value` condition.
#[derive(Debug, Clone)]
pub struct Filter {
    field: QueryField,
    pattern: Regex,
}

impl Filter {
    /// Builds a filter for a literal, case-insensitive substring.
    pub fn new(field: QueryField, value: impl Into<String>) -> ValidationResult<Self> {
        let pattern = RegexBuilder::new(&regex::escape(&value.into()))
            .case_insensitive(true)
            .build()
            .map_err(|e| ValidationError::invalid(field.as_str(), e.to_string()))?;

        Ok(Filter { field, pattern })
    }

    /// Builds a filter from a request parameter name and value.
    pub fn parse(field: &str, value: impl Into<String>) -> ValidationResult<Self> {
        Filter::new(field.parse()?, value)
    }

    /// Whether `product` satisfies this condition.
    pub fn matches(&self, product: &Product) -> bool {
        match self.field {
            QueryField::Keyword => QueryField::SCALAR
                .iter()
                .any(|field| self.pattern.is_match(&field.text_of(product))),
            field => self.pattern.is_match(&field.text_of(product)),
        }
    }
}

/// Keeps the products that satisfy every filter, in their original order.
///
/// With no filters every product is kept.
pub fn apply_filters(products: Vec<Product>, filters: &[Filter]) -> Vec<Product> {
    if filters.is_empty() {
        return products;
    }

    products
        .into_iter()
        .filter(|product| filters.iter().all(|filter| filter.matches(product)))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
