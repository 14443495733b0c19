//! Integration tests for Corner Shop.
//!
//! The storefront router is driven in-process with `tower::ServiceExt`, and
//! the catalog API is replaced by a stub axum server on an ephemeral port.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p corner-shop-integration-tests
//! ```

use std::sync::Arc;

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use corner_shop_storefront::config::StorefrontConfig;
use corner_shop_storefront::routes;
use corner_shop_storefront::shop::load_products;
use corner_shop_storefront::state::AppState;
use corner_shop_storefront::storage::LocalStorage;
use corner_shop_storefront::view::ViewTargets;
use serde_json::{Value, json};
use tower::ServiceExt;

/// How the stub catalog API answers `GET /products`.
#[derive(Debug, Clone)]
pub enum CatalogStub {
    /// 200 with the given JSON body.
    Products(Value),
    /// The given status with a plain-text body.
    Status(StatusCode),
}

/// Four products across three categories.
///
/// Prices: 1 = 10.00, 2 = 3.00, 3 = 55.99, 4 = 695.00.
#[must_use]
pub fn sample_products() -> Value {
    json!([
        {
            "id": 1,
            "title": "Wireless Headphones Pro",
            "description": "Over-ear headphones with active noise cancelling, thirty hours of battery life, fast charging, and a fold-flat design for travel and daily commuting.",
            "price": 10,
            "image": "https://example.test/1.jpg",
            "category": "electronics",
            "rating": { "rate": 4.1, "count": 120 }
        },
        {
            "id": 2,
            "title": "Cotton Socks",
            "description": "A pair of socks.",
            "price": 3,
            "image": "https://example.test/2.jpg",
            "category": "men's clothing",
            "rating": { "rate": 3.9, "count": 8 }
        },
        {
            "id": 3,
            "title": "Slim Fit Jacket",
            "description": "Light jacket for spring.",
            "price": 55.99,
            "image": "https://example.test/3.jpg",
            "category": "men's clothing"
        },
        {
            "id": 4,
            "title": "Gold Chain Bracelet",
            "description": "Solid gold.",
            "price": 695,
            "image": "https://example.test/4.jpg",
            "category": "jewelery"
        }
    ])
}

/// Serve `stub` on an ephemeral local port and return the products URL.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn spawn_catalog(stub: CatalogStub) -> String {
    let app = Router::new().route(
        "/products",
        get(move || {
            let stub = stub.clone();
            async move {
                match stub {
                    CatalogStub::Products(body) => (StatusCode::OK, Json(body)).into_response(),
                    CatalogStub::Status(status) => (status, "catalog unavailable").into_response(),
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub catalog");
    let addr = listener.local_addr().expect("stub catalog address");

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    format!("http://{addr}/products")
}

/// Storefront configuration pointing at `catalog_url`, defaults elsewhere.
///
/// # Panics
///
/// Panics if `catalog_url` is not a valid http(s) URL.
#[must_use]
pub fn test_config(catalog_url: &str) -> StorefrontConfig {
    let catalog_url = catalog_url.to_string();
    StorefrontConfig::from_lookup(|key| (key == "CATALOG_API_URL").then(|| catalog_url.clone()))
        .expect("valid test configuration")
}

/// Build application state over `storage` and run the startup catalog load.
pub async fn start_state(catalog_url: &str, storage: Arc<dyn LocalStorage>) -> AppState {
    let state = AppState::new(test_config(catalog_url), storage);
    load_products(state.catalog(), state.shop(), &mut ViewTargets::default()).await;
    state
}

/// A response with the body collected as text.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

/// Send `request` through the full storefront app.
///
/// # Panics
///
/// Panics if the body cannot be read.
pub async fn send(state: &AppState, request: Request<Body>) -> TestResponse {
    let response = routes::app(state.clone())
        .oneshot(request)
        .await
        .expect("router is infallible");

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

/// `GET uri`.
///
/// # Panics
///
/// Panics if `uri` is invalid.
#[must_use]
pub fn get_request(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("valid request")
}

/// `POST uri` with a url-encoded form body.
///
/// # Panics
///
/// Panics if `uri` is invalid.
#[must_use]
pub fn form_request(uri: &str, form: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .expect("valid request")
}
