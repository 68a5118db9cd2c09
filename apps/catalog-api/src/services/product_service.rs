//! Product resource handlers.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PUT /products/{id}   {"name": "iPhone X", "price": 999}               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  parse_id("{id}")        non-integer → 404                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  store.update(id, ..)    None → 404                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  product.apply_json()    missing/unknown attribute → 400               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  stored  ──────────────► 200 + product JSON                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use catalog_core::{sort_products, CoreError, Filter, Product, Review, SortKey};
use serde_json::Value;
use tracing::{debug, info};

use super::absolute_url;
use crate::error::ApiError;
use crate::AppState;

/// Name of the query parameter that selects the ordering.
const SORT_PARAM: &str = "sort";

/// Parses a path identifier; anything but a non-negative integer is not found.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse().map_err(|_| ApiError::product_not_found(raw))
}

async fn find_or_404(state: &AppState, id: u64) -> Result<Product, ApiError> {
    state
        .store
        .find(id)
        .await?
        .ok_or_else(|| CoreError::ProductNotFound(id).into())
}

/// `GET /products[?keyword=..&<field>=..&sort=..]`
///
/// Every parameter other than `sort` is a filter; all filters must match.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let mut sort = None;
    let mut filters = Vec::new();
    for (name, value) in &params {
        if name == SORT_PARAM {
            sort = SortKey::parse(value);
        } else {
            filters.push(Filter::parse(name, value.as_str())?);
        }
    }

    let mut products = state.store.filter(&filters).await?;
    if let Some(key) = sort {
        sort_products(&mut products, key);
    }

    debug!(count = products.len(), filters = filters.len(), "Listing products");
    Ok(Json(products))
}

/// `GET /products/{id}`
pub async fn get_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let product = find_or_404(&state, id).await?;
    Ok(Json(product))
}

/// `POST /products` - 201 with a `Location` header.
pub async fn create_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = body?;
    let product = Product::from_json(&payload)?;
    let saved = state.store.save(product).await?;

    let id = saved.id.unwrap_or_default();
    let location = absolute_url(&headers, &format!("/products/{}", id));
    info!(id = %id, name = %saved.name, "Product created");

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(saved)))
}

/// `PUT /products/{id}` - fields absent from the body keep their value.
pub async fn update_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(payload) = body?;

    let saved = state
        .store
        .update(id, &|product: &mut Product| product.apply_json(&payload))
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    info!(id = %id, "Product updated");
    Ok(Json(saved))
}

/// `DELETE /products/{id}` - 204 whether or not the product existed.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if let Ok(id) = raw_id.parse::<u64>() {
        state.store.delete(id).await?;
        info!(id = %id, "Product deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /products/{id}/review` - appends a review, returns the product.
pub async fn add_review(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(payload) = body?;
    let review = Review::from_json(&payload)?;

    let saved = state
        .store
        .update(id, &|product: &mut Product| {
            product.add_review(review.clone());
            Ok(())
        })
        .await?
        .ok_or(CoreError::ProductNotFound(id))?;

    info!(id = %id, reviews = saved.review_list.len(), "Review added");
    Ok(Json(saved))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{router, AppState};
    use catalog_core::Product;

    async fn app() -> (Router, AppState) {
        let state = AppState::in_memory();
        state
            .store
            .save(Product::new("iPhone 8", 649.0).with_id(0))
            .await
            .unwrap();
        state
            .store
            .save(Product::new("MacBook Pro", 1799.0).with_id(1))
            .await
            .unwrap();
        (router(state.clone()), state)
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn with_json(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn names(body: &Value) -> Vec<&str> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|p| p["name"].as_str().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_sorted_by_price() {
        let (app, _) = app().await;

        let (status, body) = send(app.clone(), get("/products?sort=price")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["iPhone 8", "MacBook Pro"]);

        let (_, body) = send(app, get("/products?sort=price-")).await;
        assert_eq!(names(&body), vec!["MacBook Pro", "iPhone 8"]);
    }

    #[tokio::test]
    async fn test_list_by_price_with_or_without_decimals() {
        let (app, _) = app().await;
        for uri in ["/products?price=649", "/products?price=649.0"] {
            let (status, body) = send(app.clone(), get(uri)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(names(&body), vec!["iPhone 8"], "{uri}");
        }
    }

    #[tokio::test]
    async fn test_list_with_keyword() {
        let (app, _) = app().await;
        let (status, body) = send(app, get("/products?keyword=phone")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(names(&body), vec!["iPhone 8"]);
    }

    #[tokio::test]
    async fn test_list_filters_are_anded() {
        let (app, _) = app().await;
        let (_, body) = send(app, get("/products?keyword=o&name=book&sort=name")).await;
        assert_eq!(names(&body), vec!["MacBook Pro"]);
    }

    #[tokio::test]
    async fn test_list_unknown_parameter_is_rejected() {
        let (app, _) = app().await;
        let (status, body) = send(app, get("/products?colour=red")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("colour"));
    }

    #[tokio::test]
    async fn test_get_product() {
        let (app, _) = app().await;
        let (status, body) = send(app, get("/products/1")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "MacBook Pro");
        assert_eq!(body["review_list"], json!([]));
    }

    #[tokio::test]
    async fn test_get_missing_and_malformed_ids() {
        let (app, _) = app().await;

        let (status, body) = send(app.clone(), get("/products/42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Product with id: 42 was not found");

        let (status, _) = send(app, get("/products/abc")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_product() {
        let (app, state) = app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .header("host", "localhost:5000")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"name": "Apple Watch", "price": "399"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers()["location"],
            "http://localhost:5000/products/2"
        );

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["id"], 2);
        assert_eq!(body["price"], 399.0);

        assert!(state.store.find(2).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_requires_name() {
        let (app, state) = app().await;
        let (status, body) = send(app, with_json("POST", "/products", json!({"price": 900}))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("name"));
        assert_eq!(state.store.all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_with_malformed_json() {
        let (app, _) = app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/products")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_create_refuses_oversized_id() {
        let (app, state) = app().await;
        let (status, body) = send(
            app,
            with_json("POST", "/products", json!({"id": u64::MAX, "name": "Max", "price": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("id"));
        assert_eq!(state.store.all().await.unwrap().len(), 2);
        assert_eq!(state.store.next_id().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_update_product() {
        let (app, state) = app().await;
        let (status, body) = send(
            app,
            with_json("PUT", "/products/0", json!({"id": 7, "name": "iPhone X", "price": 999})),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 0);
        assert_eq!(body["name"], "iPhone X");
        assert_eq!(state.store.find(7).await.unwrap(), None);
        assert_eq!(state.store.find(0).await.unwrap().unwrap().price, 999.0);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let (app, _) = app().await;
        let (status, _) = send(
            app,
            with_json("PUT", "/products/9", json!({"name": "x", "price": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_attribute() {
        let (app, state) = app().await;
        let (status, body) = send(
            app,
            with_json("PUT", "/products/0", json!({"name": "x", "price": 1, "bogus": 1})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("bogus"));
        assert_eq!(state.store.find(0).await.unwrap().unwrap().name, "iPhone 8");
    }

    #[tokio::test]
    async fn test_delete_is_always_no_content() {
        let (app, state) = app().await;
        let delete = |uri: &str| {
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        };

        let (status, _) = send(app.clone(), delete("/products/0")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(app.clone(), delete("/products/0")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(app, delete("/products/abc")).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        assert_eq!(state.store.find(0).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_review() {
        let (app, _) = app().await;
        let (status, body) = send(
            app,
            with_json(
                "PUT",
                "/products/1/review",
                json!({"username": "nyu", "score": 5, "detail": "Nice!"}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["review_list"][0]["username"], "nyu");
        assert_eq!(body["review_list"][0]["date"], "");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_reviews_are_all_kept() {
        let (app, state) = app().await;

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let app = app.clone();
                tokio::spawn(async move {
                    let review = json!({"username": format!("user{}", i), "score": 4});
                    send(app, with_json("PUT", "/products/1/review", review)).await.0
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::OK);
        }

        let product = state.store.find(1).await.unwrap().unwrap();
        assert_eq!(product.review_list.len(), 20);
    }

    #[tokio::test]
    async fn test_add_review_requires_score() {
        let (app, _) = app().await;
        let (status, body) = send(
            app,
            with_json("PUT", "/products/1/review", json!({"username": "nyu"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("score"));
    }

    #[tokio::test]
    async fn test_add_review_to_missing_product() {
        let (app, _) = app().await;
        let (status, _) = send(
            app,
            with_json("PUT", "/products/9/review", json!({"username": "a", "score": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_route_and_method() {
        let (app, _) = app().await;

        let (status, body) = send(app.clone(), get("/nowhere")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");

        let request = Request::builder()
            .method("PATCH")
            .uri("/products/0")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_index() {
        let (app, _) = app().await;
        let (status, body) = send(app, get("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Products REST API Service");
        assert_eq!(body["url"], "/products");
    }
}
