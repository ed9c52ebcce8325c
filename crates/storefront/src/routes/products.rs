//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use festify_core::{Catalog, Product, ProductId};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::models::load_cart;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub price: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
        }
    }
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    /// Units of this product already in the cart.
    pub in_cart: u32,
    pub cart_count: u32,
}

/// Display product detail page.
///
/// # Errors
///
/// Returns `AppError::NotFound` for ids missing from the catalog.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let product = state
        .catalog()
        .lookup_product(id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let cart = load_cart(&session).await;

    Ok(ProductShowTemplate {
        product: ProductView::from(product),
        in_cart: cart.get(id).map_or(0, |line| line.quantity()),
        cart_count: cart.item_count(),
    })
}
