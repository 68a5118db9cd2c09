//! HTTP handler implementations.
//!
//! Handlers live next to the resource they serve; the fallbacks and URL
//! helpers shared between them live here.

pub mod health_service;
pub mod product_service;

use axum::http::header::HOST;
use axum::http::{HeaderMap, Method, Uri};

use crate::error::{ApiError, ErrorCode};

/// Fallback for paths no route matches.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!(
        "The requested URL {} was not found on the server",
        uri.path()
    ))
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        ErrorCode::MethodNotAllowed,
        format!("Method {} is not allowed for {}", method, uri.path()),
    )
}

/// Absolute URL for `path` when the request names its host, else `path`.
pub fn absolute_url(headers: &HeaderMap, path: &str) -> String {
    match headers.get(HOST).and_then(|h| h.to_str().ok()) {
        Some(host) => format!("http://{}{}", host, path),
        None => path.to_string(),
    }
}
