//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Bad request data (missing/unknown fields)      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── StoreError       - Storage backend failures                       │
//! │                                                                         │
//! │  catalog-api errors (in app)                                           │
//! │  └── ApiError         - What HTTP clients see (JSON + status code)     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / StoreError → ApiError → client    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core catalog errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product carries the requested identifier.
    #[error("Product with id: {0} was not found")]
    ProductNotFound(u64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Request data validation errors.
///
/// Every variant names the offending field so the HTTP layer can return
/// a message the client can act on.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("Missing required field: {field}")]
    Required { field: String },

    /// The payload carries a key that is not a known attribute.
    #[error("Unknown attribute: {attribute}")]
    UnknownAttribute { attribute: String },

    /// A field is present but its value has the wrong shape.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The body is not a JSON object at all.
    #[error("Invalid body: {0}")]
    InvalidBody(String),
}

impl ValidationError {
    /// Creates a Required error for `field`.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an UnknownAttribute error for `attribute`.
    pub fn unknown(attribute: impl Into<String>) -> Self {
        ValidationError::UnknownAttribute {
            attribute: attribute.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
