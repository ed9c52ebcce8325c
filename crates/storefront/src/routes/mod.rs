//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (product listing)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products/{id}          - Product detail (404 for unknown ids)
//!
//! # Cart
//! GET  /cart                   - Cart page with totals and suggestions
//! POST /cart/add               - Add one unit (redirects to /cart, or / for unknown ids)
//! POST /cart/update            - Increase/decrease quantity (redirects to /cart)
//! POST /cart/remove            - Remove line item (redirects to /cart)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Order summary (redirects to /cart when empty)
//! POST /checkout               - Place order, empty the cart
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::place))
}
