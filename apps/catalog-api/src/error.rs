//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Catalog API                        │
//! │                                                                         │
//! │  Handler                                                                │
//! │  Result<T, ApiError>                                                    │
//! │         │                                                               │
//! │         ├── ValidationError ──────────────► 400 VALIDATION_ERROR        │
//! │         ├── CoreError::ProductNotFound ───► 404 NOT_FOUND               │
//! │         ├── StoreError (backend) ─────────► 503 STORE_ERROR (logged)    │
//! │         └── JsonRejection ────────────────► 400 VALIDATION_ERROR        │
//! │                                                                         │
//! │  Response body: { "code": "NOT_FOUND", "message": "..." }               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Backend failures are logged with their cause; the client only sees a
//! generic message.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::{CoreError, ValidationError};
use catalog_db::StoreError;
use serde::Serialize;

/// Error returned from HTTP handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product with id: 7 was not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Request data failed validation (400)
    ValidationError,

    /// Route exists but not for this method (405)
    MethodNotAllowed,

    /// Storage backend failed (503)
    StoreError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP status for this code.
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ErrorCode::StoreError => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a product-not-found error for a raw path segment.
    pub fn product_not_found(id: impl std::fmt::Display) -> Self {
        ApiError::not_found(format!("Product with id: {} was not found", id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::product_not_found(id),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => e.into(),
            StoreError::ConnectionFailed(e) => {
                tracing::error!("Store connection failed: {}", e);
                ApiError::new(ErrorCode::StoreError, "Storage backend unavailable")
            }
            StoreError::CommandFailed(e) => {
                tracing::error!("Store command failed: {}", e);
                ApiError::new(ErrorCode::StoreError, "Storage operation failed")
            }
            StoreError::IdsExhausted => {
                tracing::error!("Product identifiers exhausted");
                ApiError::internal("No product identifiers left")
            }
            StoreError::Corrupt { key, reason } => {
                tracing::error!(key = %key, "Corrupt record: {}", reason);
                ApiError::internal("Stored record could not be read")
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(format!(
            "Invalid body: {}",
            rejection.body_text()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_serialize_screaming_snake_case() {
        let err = ApiError::new(ErrorCode::MethodNotAllowed, "nope");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
        assert_eq!(json["message"], "nope");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::StoreError.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_store_errors_hide_internals() {
        let err: ApiError = StoreError::CommandFailed("WRONGTYPE at key 3".into()).into();
        assert_eq!(err.code, ErrorCode::StoreError);
        assert!(!err.message.contains("WRONGTYPE"));

        let err: ApiError = StoreError::Validation(ValidationError::required("name")).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("name"));
    }

    #[test]
    fn test_exhausted_ids_are_internal() {
        let err: ApiError = StoreError::IdsExhausted.into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.code.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_core_not_found() {
        let err: ApiError = CoreError::ProductNotFound(7).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product with id: 7 was not found");
    }
}
