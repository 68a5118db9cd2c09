//! Service index and health check handlers.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::warn;

use super::absolute_url;
use crate::AppState;

/// Display name of the service.
pub const SERVICE_NAME: &str = "Products REST API Service";

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceIndex {
    pub name: &'static str,
    pub version: &'static str,
    /// Where the product collection lives.
    pub url: String,
}

/// Body of `GET /healthcheck`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: u16,
    pub message: String,
    pub backend: &'static str,
    pub server_time: String,
}

/// `GET /` - names the service and points at the product collection.
pub async fn index(headers: HeaderMap) -> Json<ServiceIndex> {
    Json(ServiceIndex {
        name: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        url: absolute_url(&headers, "/products"),
    })
}

/// `GET /healthcheck` - 200 while the store answers, 503 otherwise.
pub async fn healthcheck(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let backend = state.store.backend();

    let (status, message) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "Healthy".to_string()),
        Err(e) => {
            warn!(backend, error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, format!("Unhealthy: {}", e))
        }
    };

    let payload = HealthResponse {
        status: status.as_u16(),
        message,
        backend,
        server_time: Utc::now().to_rfc3339(),
    };

    (status, Json(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use catalog_core::Product;
    use catalog_db::{CatalogStore, StoreError, StoreResult};

    /// A store whose backend is always down.
    struct UnreachableStore;

    #[async_trait]
    impl CatalogStore for UnreachableStore {
        fn backend(&self) -> &'static str {
            "redis"
        }

        async fn ping(&self) -> StoreResult<()> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }

        async fn next_id(&self) -> StoreResult<u64> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }

        async fn save(&self, _product: Product) -> StoreResult<Product> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }

        async fn find(&self, _id: u64) -> StoreResult<Option<Product>> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }

        async fn delete(&self, _id: u64) -> StoreResult<()> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }

        async fn all(&self) -> StoreResult<Vec<Product>> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }

        async fn remove_all(&self) -> StoreResult<()> {
            Err(StoreError::ConnectionFailed("connection refused".into()))
        }
    }

    #[tokio::test]
    async fn test_healthy_memory_store() {
        let (status, Json(payload)) = healthcheck(State(AppState::in_memory())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, 200);
        assert_eq!(payload.message, "Healthy");
        assert_eq!(payload.backend, "memory");
    }

    #[tokio::test]
    async fn test_unreachable_store_is_unavailable() {
        let state = AppState::new(Arc::new(UnreachableStore));
        let (status, Json(payload)) = healthcheck(State(state)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(payload.status, 503);
        assert!(payload.message.starts_with("Unhealthy"));
        assert_eq!(payload.backend, "redis");
    }

    #[tokio::test]
    async fn test_index_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert("host", "catalog.local".parse().unwrap());

        let Json(body) = index(headers).await;
        assert_eq!(body.name, SERVICE_NAME);
        assert_eq!(body.url, "http://catalog.local/products");
    }
}
