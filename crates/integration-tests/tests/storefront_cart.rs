//! Integration tests for the cart: add, change quantity, totals, persistence.

use std::sync::Arc;

use axum::http::StatusCode;
use corner_shop_core::ProductId;
use corner_shop_integration_tests::{
    CatalogStub, TestResponse, form_request, get_request, sample_products, send, spawn_catalog,
    start_state,
};
use corner_shop_storefront::state::AppState;
use corner_shop_storefront::storage::{FileStorage, LocalStorage, MemoryStorage, keys};

async fn started(storage: Arc<dyn LocalStorage>) -> AppState {
    let url = spawn_catalog(CatalogStub::Products(sample_products())).await;
    start_state(&url, storage).await
}

async fn add(state: &AppState, id: i32) -> TestResponse {
    send(state, form_request("/cart/add", &format!("product_id={id}"))).await
}

async fn change(state: &AppState, id: i32, delta: i32) -> TestResponse {
    send(
        state,
        form_request("/cart/quantity", &format!("product_id={id}&delta={delta}")),
    )
    .await
}

// =============================================================================
// Add To Cart
// =============================================================================

#[tokio::test]
async fn test_add_returns_badge_and_trigger() {
    let state = started(Arc::new(MemoryStorage::new())).await;

    add(&state, 1).await;
    let response = add(&state, 1).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(">2</span>"));
    assert_eq!(
        response.headers.get("HX-Trigger").and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );

    let shop = state.shop().lock().await;
    assert_eq!(shop.cart().cart().lines().len(), 1);
    assert_eq!(shop.cart().cart().line(ProductId::new(1)).map(|l| l.quantity), Some(2));
}

#[tokio::test]
async fn test_add_unknown_product_is_ignored() {
    let storage = Arc::new(MemoryStorage::new());
    let state = started(storage.clone()).await;

    let response = add(&state, 999).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(">0</span>"));
    assert!(state.shop().lock().await.cart().cart().is_empty());
    assert_eq!(storage.get_item(keys::CART).expect("read"), None);
}

#[tokio::test]
async fn test_add_rejects_malformed_form() {
    let state = started(Arc::new(MemoryStorage::new())).await;

    let response = send(&state, form_request("/cart/add", "product_id=abc")).await;

    assert!(response.status.is_client_error());
    assert!(state.shop().lock().await.cart().cart().is_empty());
}

// =============================================================================
// Change Quantity
// =============================================================================

#[tokio::test]
async fn test_decrement_to_zero_removes_line() {
    let state = started(Arc::new(MemoryStorage::new())).await;
    add(&state, 2).await;

    let response = change(&state, 2, -1).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"hx-swap-oob="true">0</span>"#));
    assert!(response.body.contains(r#"class="cart-box d-none""#));
    assert!(state.shop().lock().await.cart().cart().is_empty());
}

#[tokio::test]
async fn test_change_unknown_line_is_ignored() {
    let state = started(Arc::new(MemoryStorage::new())).await;
    add(&state, 2).await;

    let response = change(&state, 4, 1).await;

    assert_eq!(response.status, StatusCode::OK);
    let shop = state.shop().lock().await;
    assert_eq!(shop.cart().cart().lines().len(), 1);
    assert!(shop.cart().cart().line(ProductId::new(4)).is_none());
}

// =============================================================================
// Totals
// =============================================================================

#[tokio::test]
async fn test_cart_page_totals() {
    let state = started(Arc::new(MemoryStorage::new())).await;
    // 2 x 10.00 + 2 x 3.00 = 26.00
    add(&state, 1).await;
    add(&state, 1).await;
    add(&state, 2).await;
    change(&state, 2, 1).await;

    let response = send(&state, get_request("/cart")).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains(r#"id="sum-products">$26.00"#));
    assert!(response.body.contains(r#"id="sum-shipping">$30.00"#));
    assert!(response.body.contains(r#"id="sum-total">$56.00"#));
    assert!(response.body.contains("Wireless ..."));
}

#[tokio::test]
async fn test_empty_cart_page() {
    let state = started(Arc::new(MemoryStorage::new())).await;

    let response = send(&state, get_request("/cart")).await;

    assert!(response.body.contains(r#"class="cart-empty ""#));
    assert!(response.body.contains(r#"class="cart-box d-none""#));
    assert!(response.body.contains(r#"id="sum-total">$0.00"#));
}

#[tokio::test]
async fn test_cart_count_fragment() {
    let state = started(Arc::new(MemoryStorage::new())).await;
    add(&state, 3).await;
    add(&state, 4).await;

    let response = send(&state, get_request("/cart/count")).await;

    assert_eq!(
        response.body.trim(),
        r#"<span id="cart-count" class="badge text-bg-dark">2</span>"#
    );
}

// =============================================================================
// Persistence
// =============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let dir = tempfile::tempdir().expect("scratch dir");
    let path = dir.path().join("local-storage.json");

    let first = started(Arc::new(FileStorage::open(&path).expect("open storage"))).await;
    add(&first, 3).await;
    add(&first, 3).await;
    drop(first);

    let second = started(Arc::new(FileStorage::open(&path).expect("reopen storage"))).await;
    let shop = second.shop().lock().await;
    let line = shop.cart().cart().line(ProductId::new(3)).expect("line restored");
    assert_eq!(line.quantity, 2);
    assert_eq!(line.title, "Slim Fit Jacket");
}

#[tokio::test]
async fn test_corrupt_cart_starts_empty() {
    let storage = Arc::new(MemoryStorage::with_item(keys::CART, "{not json"));
    let state = started(storage).await;

    assert!(state.shop().lock().await.cart().cart().is_empty());

    add(&state, 1).await;
    assert_eq!(state.shop().lock().await.cart().cart().item_count(), 1);
}
