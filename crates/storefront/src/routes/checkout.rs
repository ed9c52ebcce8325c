//! Checkout route handlers.
//!
//! Placing an order only empties the cart. There is no payment step and the
//! order is not recorded anywhere.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::{IntoResponse, Redirect, Response};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::models::{load_cart, save_cart};
use crate::routes::cart::CartView;

/// Checkout summary template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub order: CartView,
    pub cart_count: u32,
}

/// Order confirmation template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/placed.html")]
pub struct OrderPlacedTemplate {
    /// The cart as it was when the order was placed.
    pub order: CartView,
    pub cart_count: u32,
}

/// Display the checkout summary. An empty cart redirects to the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/cart").into_response();
    }

    CheckoutTemplate {
        cart_count: cart.item_count(),
        order: CartView::from(&cart),
    }
    .into_response()
}

/// Place the order and show a confirmation. An empty cart redirects to the
/// cart page.
///
/// # Errors
///
/// Returns an error if the emptied cart cannot be written to the session.
#[instrument(skip(session))]
pub async fn place(session: Session) -> Result<Response> {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let order = CartView::from(&cart);
    let cart = cart.place_order();
    save_cart(&session, &cart).await?;

    add_breadcrumb("checkout", "Placed order", None);
    tracing::info!(
        items = order.item_count,
        total = %order.totals.final_total,
        "Order placed"
    );

    Ok(OrderPlacedTemplate {
        order,
        cart_count: cart.item_count(),
    }
    .into_response())
}
