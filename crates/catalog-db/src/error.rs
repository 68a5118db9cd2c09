//! # Store Error Types
//!
//! Error types for catalog storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  redis::RedisError / serde_json::Error / ValidationError               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in catalog-api) ← Status code + JSON body                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing record is not an error here: `find` returns `Option`.

use catalog_core::ValidationError;
use thiserror::Error;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not be reached.
    ///
    /// ## When This Occurs
    /// - Redis URL is malformed
    /// - Server refused or dropped the connection
    /// - Initial connection at startup failed (fatal, never retried)
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The backend was reached but rejected or failed a command.
    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// Every automatic identifier up to `MAX_PRODUCT_ID` has been issued.
    #[error("No product identifiers left")]
    IdsExhausted,

    /// A stored value could not be decoded as a product.
    #[error("Corrupt record at key '{key}': {reason}")]
    Corrupt { key: String, reason: String },

    /// The record was refused before anything was written.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a Corrupt error for a stored key.
    pub fn corrupt(key: impl Into<String>, reason: impl Into<String>) -> Self {
        StoreError::Corrupt {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Convert redis errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// refused / dropped / io / timeout  → StoreError::ConnectionFailed
/// anything else                     → StoreError::CommandFailed
/// ```
impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_io_error()
            || err.is_timeout()
        {
            StoreError::ConnectionFailed(err.to_string())
        } else {
            StoreError::CommandFailed(err.to_string())
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_message_names_key() {
        let err = StoreError::corrupt("7", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Corrupt record at key '7': expected value at line 1"
        );
    }

    #[test]
    fn test_validation_converts() {
        let err: StoreError = ValidationError::required("name").into();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn test_redis_type_error_is_command_failure() {
        let err: StoreError =
            redis::RedisError::from((redis::ErrorKind::TypeError, "not a string")).into();
        assert!(matches!(err, StoreError::CommandFailed(_)));
    }
}
