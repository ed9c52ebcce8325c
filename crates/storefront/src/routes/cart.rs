//! Cart route handlers.
//!
//! Every mutation follows the same shape: load the cart from the session, run
//! one ledger operation, save the result, then redirect back to a page
//! (post/redirect/get). The ledger never sees the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{FromRequest, State},
    response::{IntoResponse, Redirect, Response},
};
use festify_core::{Cart, CartError, Direction, LineItem, OrderTotals, ProductId};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::models::{load_cart, save_cart};
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: i32,
    pub name: String,
    pub brand: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// Whether the decrease button does anything (quantity above 1).
    pub can_decrease: bool,
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        let product = line.product();
        Self {
            product_id: product.id.as_i32(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            quantity: line.quantity(),
            price: product.price.to_string(),
            line_price: line.line_total().to_string(),
            can_decrease: line.quantity() > 1,
        }
    }
}

/// Order totals display data for templates.
#[derive(Clone)]
pub struct TotalsView {
    pub subtotal: String,
    pub delivery_fee: String,
    pub discount: String,
    pub final_total: String,
    pub free_delivery: bool,
}

impl From<OrderTotals> for TotalsView {
    fn from(totals: OrderTotals) -> Self {
        Self {
            subtotal: totals.subtotal.to_string(),
            delivery_fee: totals.delivery_fee.to_string(),
            discount: totals.discount.to_string(),
            final_total: totals.final_total.to_string(),
            free_delivery: totals.delivery_fee.is_zero(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub totals: TotalsView,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            totals: TotalsView::from(cart.totals()),
            item_count: cart.item_count(),
        }
    }
}

/// A urlencoded cart form; malformed bodies become [`AppError::BadRequest`].
#[derive(FromRequest)]
#[from_request(via(Form), rejection(AppError))]
pub struct CartForm<T>(pub T);

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub action: Direction,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    pub suggestions: Vec<ProductView>,
    pub cart_count: u32,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page with totals and suggested products.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    let suggestions = cart
        .suggest_products(state.catalog(), state.config().suggestion_limit)
        .into_iter()
        .map(ProductView::from)
        .collect();

    CartShowTemplate {
        cart_count: cart.item_count(),
        cart: CartView::from(&cart),
        suggestions,
    }
}

/// Add one unit of a product to the cart.
///
/// Unknown products redirect to the home page without touching the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    CartForm(form): CartForm<AddToCartForm>,
) -> Result<Response> {
    let cart = load_cart(&session).await;

    let cart = match cart.add(form.product_id, state.catalog()) {
        Ok(cart) => cart,
        Err(CartError::ProductNotFound(id)) => {
            tracing::warn!(product_id = %id, "Add to cart for unknown product");
            return Ok(Redirect::to("/").into_response());
        }
    };

    save_cart(&session, &cart).await?;
    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Added product",
        Some(&[("product_id", product_id.as_str())]),
    );
    tracing::info!(product_id = %form.product_id, items = cart.item_count(), "Cart updated");

    Ok(Redirect::to("/cart").into_response())
}

/// Step a line item's quantity up or down.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    CartForm(form): CartForm<UpdateCartForm>,
) -> Result<Redirect> {
    let cart = load_cart(&session)
        .await
        .update_quantity(form.product_id, form.action);

    save_cart(&session, &cart).await?;
    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Updated quantity",
        Some(&[("product_id", product_id.as_str())]),
    );

    Ok(Redirect::to("/cart"))
}

/// Remove a line item from the cart.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    CartForm(form): CartForm<RemoveFromCartForm>,
) -> Result<Redirect> {
    let cart = load_cart(&session).await.remove(form.product_id);

    save_cart(&session, &cart).await?;
    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Removed product",
        Some(&[("product_id", product_id.as_str())]),
    );

    Ok(Redirect::to("/cart"))
}

/// Get cart count badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: load_cart(&session).await.item_count(),
    }
}
