//! Integration tests for the HTTP surface: health, fallback, request IDs.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use corner_shop_integration_tests::{
    CatalogStub, get_request, sample_products, send, spawn_catalog, start_state,
};
use corner_shop_storefront::middleware::REQUEST_ID_HEADER;
use corner_shop_storefront::storage::MemoryStorage;

#[tokio::test]
async fn test_health() {
    let url = spawn_catalog(CatalogStub::Products(sample_products())).await;
    let state = start_state(&url, Arc::new(MemoryStorage::new())).await;

    let response = send(&state, get_request("/health")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, "ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let url = spawn_catalog(CatalogStub::Products(sample_products())).await;
    let state = start_state(&url, Arc::new(MemoryStorage::new())).await;

    let response = send(&state, get_request("/products/1")).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert!(response.body.contains("/products/1"));
}

#[tokio::test]
async fn test_request_id_generated_and_echoed() {
    let url = spawn_catalog(CatalogStub::Products(sample_products())).await;
    let state = start_state(&url, Arc::new(MemoryStorage::new())).await;

    let generated = send(&state, get_request("/health")).await;
    assert!(generated.headers.contains_key(REQUEST_ID_HEADER));

    let request = Request::get("/health")
        .header(REQUEST_ID_HEADER, "abc-123")
        .body(Body::empty())
        .expect("valid request");
    let echoed = send(&state, request).await;
    assert_eq!(
        echoed.headers.get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
        Some("abc-123")
    );
}

#[tokio::test]
async fn test_state_keeps_configuration() {
    let url = spawn_catalog(CatalogStub::Products(sample_products())).await;
    let state = start_state(&url, Arc::new(MemoryStorage::new())).await;

    assert_eq!(state.config().catalog.api_url.as_str(), url);
    assert_eq!(state.catalog().endpoint(), url);
    assert_eq!(state.config().socket_addr().port(), 3000);
}
