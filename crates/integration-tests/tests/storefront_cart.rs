//! End-to-end tests for the storefront cart and checkout flow.
//!
//! Each test builds its own storefront (with its own in-memory session store)
//! and talks to it through [`TestClient`], which carries the session cookie.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use axum::http::StatusCode;
use festify_core::{Catalog, Price, ProductId};
use festify_integration_tests::TestClient;
use festify_storefront::{catalog::bundled_catalog, config::StorefrontConfig};

/// Catalog price of a bundled product.
fn price_of(id: i32) -> Price {
    bundled_catalog()
        .unwrap()
        .lookup_product(ProductId::new(id))
        .unwrap()
        .price
}

async fn cart_count(client: &mut TestClient) -> String {
    let resp = client.get("/cart/count").await;
    assert_eq!(resp.status, StatusCode::OK);
    resp.body.trim().to_string()
}

#[tokio::test]
async fn test_health() {
    let mut client = TestClient::new();
    let resp = client.get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");
}

#[tokio::test]
async fn test_home_lists_catalog_in_order() {
    let mut client = TestClient::new();
    let resp = client.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    let diyas = resp.body.find("Diwali Diyas").unwrap();
    let colors = resp.body.find("Holi Colors Pack").unwrap();
    let thali = resp.body.find("Pooja Thali Set").unwrap();
    assert!(diyas < colors && colors < thali);
    assert!(resp.body.contains(&price_of(1).to_string()));
}

#[tokio::test]
async fn test_add_same_product_twice() {
    let mut client = TestClient::new();

    for _ in 0..2 {
        let resp = client.post_form("/cart/add", "product_id=1").await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER);
        assert_eq!(resp.location(), Some("/cart"));
    }

    let cart = client.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert_eq!(cart.body.matches("<span>2</span>").count(), 1);
    assert_eq!((price_of(1) * 2).to_string(), "₹398");
    assert!(cart.body.contains("₹398"));
    assert!(cart.body.contains("₹99"));
    assert!(cart.body.contains("₹40"));
    assert!(cart.body.contains("₹457"));

    assert_eq!(
        cart_count(&mut client).await,
        r#"<span class="cart-count">2</span>"#
    );
}

#[tokio::test]
async fn test_add_unknown_product_redirects_home() {
    let mut client = TestClient::new();

    let resp = client.post_form("/cart/add", "product_id=999").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/"));
    assert!(client.get("/cart").await.body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_add_malformed_product_id_rejected() {
    let mut client = TestClient::new();
    let resp = client.post_form("/cart/add", "product_id=diya").await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body.starts_with("Bad request"));
}

#[tokio::test]
async fn test_free_delivery_above_threshold() {
    let mut client = TestClient::new();
    // Pooja Thali Set
    assert!(price_of(6) > Price::from_rupees(999));
    client.post_form("/cart/add", "product_id=6").await;

    let cart = client.get("/cart").await;

    assert!(cart.body.contains("Free"));
    assert!(cart.body.contains("₹130"));
    assert!(cart.body.contains("₹1169"));
}

#[tokio::test]
async fn test_decrease_at_one_keeps_item() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=2").await;

    let resp = client
        .post_form("/cart/update", "product_id=2&action=decrease")
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    let cart = client.get("/cart").await;
    assert!(cart.body.contains("Holi Colors Pack"));
    assert!(cart.body.contains("<span>1</span>"));
}

#[tokio::test]
async fn test_increase_then_decrease() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=3").await;

    client
        .post_form("/cart/update", "product_id=3&action=increase")
        .await;
    client
        .post_form("/cart/update", "product_id=3&action=increase")
        .await;
    assert!(cart_count(&mut client).await.contains(">3<"));

    client
        .post_form("/cart/update", "product_id=3&action=decrease")
        .await;
    assert!(cart_count(&mut client).await.contains(">2<"));
}

#[tokio::test]
async fn test_update_with_unknown_action_rejected() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=3").await;

    let resp = client
        .post_form("/cart/update", "product_id=3&action=double")
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(cart_count(&mut client).await.contains(">1<"));
}

#[tokio::test]
async fn test_remove_last_item_empties_cart() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=4").await;

    let resp = client.post_form("/cart/remove", "product_id=4").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location(), Some("/cart"));

    assert!(client.get("/cart").await.body.contains("Your cart is empty"));
    assert!(cart_count(&mut client).await.contains(">0<"));
}

#[tokio::test]
async fn test_remove_absent_item_is_noop() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=1").await;

    let resp = client.post_form("/cart/remove", "product_id=5").await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(cart_count(&mut client).await.contains(">1<"));
}

#[tokio::test]
async fn test_suggestions_exclude_carted_products() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=1").await;

    let cart = client.get("/cart").await;

    // Limit 4 over the remaining catalog: products 2-5, not 6.
    assert!(cart.body.contains("You may also like"));
    assert!(cart.body.contains("Eid Lantern"));
    assert!(!cart.body.contains("Pooja Thali Set"));
}

#[tokio::test]
async fn test_suggestion_limit_is_configurable() {
    let config = StorefrontConfig {
        suggestion_limit: 1,
        ..StorefrontConfig::default()
    };
    let mut client = TestClient::with_config(config);
    client.post_form("/cart/add", "product_id=1").await;

    let cart = client.get("/cart").await;

    assert!(cart.body.contains("Holi Colors Pack"));
    assert!(!cart.body.contains("Christmas Tree"));
}

#[tokio::test]
async fn test_checkout_with_empty_cart_redirects() {
    let mut client = TestClient::new();

    let show = client.get("/checkout").await;
    assert_eq!(show.status, StatusCode::SEE_OTHER);
    assert_eq!(show.location(), Some("/cart"));

    let place = client.post_form("/checkout", "").await;
    assert_eq!(place.status, StatusCode::SEE_OTHER);
    assert_eq!(place.location(), Some("/cart"));
}

#[tokio::test]
async fn test_place_order_clears_cart() {
    let mut client = TestClient::new();
    client.post_form("/cart/add", "product_id=1").await;
    client.post_form("/cart/add", "product_id=1").await;

    let summary = client.get("/checkout").await;
    assert_eq!(summary.status, StatusCode::OK);
    assert!(summary.body.contains("Place order"));
    assert!(summary.body.contains("₹457"));

    let placed = client.post_form("/checkout", "").await;
    assert_eq!(placed.status, StatusCode::OK);
    assert!(placed.body.contains("Thank you for your order"));
    assert!(placed.body.contains("₹457"));

    assert!(cart_count(&mut client).await.contains(">0<"));
    let after = client.get("/checkout").await;
    assert_eq!(after.location(), Some("/cart"));
}

#[tokio::test]
async fn test_product_page() {
    let mut client = TestClient::new();

    let resp = client.get("/products/5").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("Eid Lantern"));
    assert!(resp.body.contains("Noor Lights"));
    assert!(!resp.body.contains("in your"));

    client.post_form("/cart/add", "product_id=5").await;
    let resp = client.get("/products/5").await;
    assert!(resp.body.contains("in your"));
}

#[tokio::test]
async fn test_product_images_are_served() {
    let mut client = TestClient::new();

    for product in bundled_catalog().unwrap().products() {
        let resp = client.get(&product.image).await;
        assert_eq!(resp.status, StatusCode::OK, "image for {}", product.name);
        assert_eq!(resp.header("content-type"), Some("image/svg+xml"));
    }
}

#[tokio::test]
async fn test_unknown_product_page_is_not_found() {
    let mut client = TestClient::new();
    let resp = client.get("/products/404").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_sessions_on_one_store_keep_separate_carts() {
    let mut alice = TestClient::new();
    let mut bob = alice.fork();

    alice.post_form("/cart/add", "product_id=1").await;
    assert!(cart_count(&mut bob).await.contains(">0<"));

    bob.post_form("/cart/add", "product_id=6").await;
    bob.post_form("/cart/add", "product_id=6").await;

    assert_ne!(alice.cookie(), bob.cookie());
    assert_eq!(alice.state().session_store().len().await, 2);

    assert!(cart_count(&mut alice).await.contains(">1<"));
    assert!(cart_count(&mut bob).await.contains(">2<"));

    // Two thali sets alone: ₹2598 subtotal, free delivery, ₹260 off
    let bob_cart = bob.get("/cart").await.body;
    assert!(bob_cart.contains("₹2598"));
    assert!(bob_cart.contains("₹2338"));

    alice.post_form("/cart/remove", "product_id=1").await;
    assert!(cart_count(&mut alice).await.contains(">0<"));
    assert!(cart_count(&mut bob).await.contains(">2<"));
}

#[tokio::test]
async fn test_expired_session_loses_cart_and_leaves_store() {
    let config = StorefrontConfig {
        session_ttl_seconds: 1,
        ..StorefrontConfig::default()
    };
    let mut client = TestClient::with_config(config);
    client.post_form("/cart/add", "product_id=1").await;
    assert_eq!(client.state().session_store().len().await, 1);

    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert!(cart_count(&mut client).await.contains(">0<"));
    assert!(client.state().session_store().is_empty().await);
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let mut client = TestClient::new();

    let resp = client.get("/").await;
    assert_eq!(resp.header("x-frame-options"), Some("DENY"));
    assert_eq!(resp.header("x-content-type-options"), Some("nosniff"));
    assert!(resp.header("content-security-policy").is_some());
    assert!(resp.header("x-request-id").is_some_and(|id| !id.is_empty()));
}
