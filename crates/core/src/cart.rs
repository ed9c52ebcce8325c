//! The cart ledger.
//!
//! A [`Cart`] is an ordered list of line items, unique by product id. Each
//! operation consumes the cart and returns the updated one; the caller owns
//! persistence (the storefront keeps it in the visitor's session).
//!
//! ```text
//! Empty ──add──▶ NonEmpty ──add / update / remove (items left)──▶ NonEmpty
//!   ▲                │
//!   └── remove last / place_order
//! ```
//!
//! No transition leaves a line item below quantity 1: decreasing at 1 is a
//! no-op, and [`Cart::remove`] is the only way to drop a line.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{Catalog, Product};
use crate::totals::{OrderTotals, compute_totals};
use crate::types::{Price, ProductId};

/// Number of products suggested on the cart page when no limit is configured.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 4;

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Which way to move a line item's quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increase,
    Decrease,
}

/// A product snapshot and how many of it are in the cart.
///
/// The snapshot is taken when the product is first added, so later catalog
/// price changes do not affect carts already holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    product: Product,
    quantity: NonZeroU32,
}

impl LineItem {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: NonZeroU32::MIN,
        }
    }

    /// The product as it was when added.
    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity.get()
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.quantity()
    }

    fn increase(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    fn decrease(&mut self) {
        if let Some(lower) = NonZeroU32::new(self.quantity.get() - 1) {
            self.quantity = lower;
        }
    }
}

/// A visitor's shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add one unit of a catalog product.
    ///
    /// Increments the existing line if the product is already in the cart,
    /// otherwise appends a new line with quantity 1.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the catalog has no such product.
    /// The cart is dropped in that case; callers keep their stored copy.
    pub fn add<C: Catalog + ?Sized>(
        mut self,
        product_id: ProductId,
        catalog: &C,
    ) -> Result<Self, CartError> {
        let product = catalog
            .lookup_product(product_id)
            .ok_or(CartError::ProductNotFound(product_id))?;

        match self.line_mut(product_id) {
            Some(line) => line.increase(),
            None => self.items.push(LineItem::new(product.clone())),
        }
        Ok(self)
    }

    /// Drop the line for `product_id`, if any.
    #[must_use]
    pub fn remove(mut self, product_id: ProductId) -> Self {
        self.items.retain(|line| line.product_id() != product_id);
        self
    }

    /// Step a line's quantity up or down by one.
    ///
    /// Decreasing a line at quantity 1 leaves it unchanged. Unknown ids are
    /// ignored.
    #[must_use]
    pub fn update_quantity(mut self, product_id: ProductId, direction: Direction) -> Self {
        if let Some(line) = self.line_mut(product_id) {
            match direction {
                Direction::Increase => line.increase(),
                Direction::Decrease => line.decrease(),
            }
        }
        self
    }

    /// Totals for the current contents.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        compute_totals(self)
    }

    /// Up to `limit` catalog products not already in the cart, in catalog order.
    #[must_use]
    pub fn suggest_products<'a, C: Catalog + ?Sized>(
        &self,
        catalog: &'a C,
        limit: usize,
    ) -> Vec<&'a Product> {
        catalog
            .products()
            .iter()
            .filter(|product| !self.contains(product.id))
            .take(limit)
            .collect()
    }

    /// Place the order. Nothing is charged or recorded; the cart is emptied.
    #[must_use]
    pub fn place_order(self) -> Self {
        Self::new()
    }

    /// Line items in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|line| line.product_id() == product_id)
    }

    #[must_use]
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(LineItem::quantity).sum()
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }
}
