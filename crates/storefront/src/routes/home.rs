//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use festify_core::Catalog;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::models::load_cart;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Home page template: the full catalog, in catalog order.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart_count: u32,
}

/// Display the home page.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;

    HomeTemplate {
        products: state
            .catalog()
            .products()
            .iter()
            .map(ProductView::from)
            .collect(),
        cart_count: cart.item_count(),
    }
}
