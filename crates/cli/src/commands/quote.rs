//! Price a cart from the command line.
//!
//! Runs the same ledger operations as the storefront: each id is added to an
//! empty cart in turn, so repeating an id raises its quantity.
//!
//! # Usage
//!
//! ```bash
//! festify-cli quote 1 1 3
//! ```

use std::path::Path;

use festify_core::{Cart, CartError, Catalog, OrderTotals, ProductId};
use festify_storefront::catalog::{CatalogLoadError, load_catalog};
use thiserror::Error;

/// Errors that can occur while quoting.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Catalog(#[from] CatalogLoadError),
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Build a cart from `product_ids` and print its lines and totals.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or an id is not in it.
pub fn quote(path: Option<&Path>, product_ids: &[ProductId]) -> Result<(), QuoteError> {
    let catalog = load_catalog(path)?;
    let cart = build_cart(&catalog, product_ids)?;

    for line in cart.items() {
        tracing::info!(
            "{} x {} @ {} = {}",
            line.quantity(),
            line.product().name,
            line.product().price,
            line.line_total()
        );
    }
    for row in totals_rows(&cart.totals()) {
        tracing::info!("{row}");
    }
    Ok(())
}

/// Add each id to an empty cart, in order.
fn build_cart<C: Catalog>(catalog: &C, product_ids: &[ProductId]) -> Result<Cart, CartError> {
    product_ids
        .iter()
        .try_fold(Cart::new(), |cart, &id| cart.add(id, catalog))
}

fn totals_rows(totals: &OrderTotals) -> [String; 4] {
    [
        format!("Subtotal: {}", totals.subtotal),
        format!("Delivery: {}", totals.delivery_fee),
        format!("Discount: -{}", totals.discount),
        format!("Total:    {}", totals.final_total),
    ]
}
