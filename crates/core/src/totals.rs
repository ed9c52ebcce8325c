//! Order totals derived from a cart.
//!
//! Totals are never stored. They are recomputed from the cart on every read,
//! so they cannot go stale.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::cart::{Cart, LineItem};
use crate::types::Price;

/// Subtotals strictly above this ship free.
pub const FREE_DELIVERY_THRESHOLD: u32 = 999;

/// Delivery fee charged at or below the threshold.
pub const DELIVERY_FEE: u32 = 99;

/// Discount applied to every order, in percent of the subtotal.
pub const DISCOUNT_PERCENT: u32 = 10;

/// Figures shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    pub subtotal: Price,
    pub delivery_fee: Price,
    pub discount: Price,
    pub final_total: Price,
}

/// Compute totals for a cart.
///
/// - `subtotal` is the sum of every line's price times quantity
/// - `delivery_fee` is 0 when the subtotal exceeds 999, otherwise 99
/// - `discount` is 10% of the subtotal, rounded half-up to whole rupees
/// - `final_total` is `subtotal + delivery_fee - discount`
#[must_use]
pub fn compute_totals(cart: &Cart) -> OrderTotals {
    let subtotal: Price = cart.items().iter().map(LineItem::line_total).sum();

    let delivery_fee = if subtotal > Price::from_rupees(FREE_DELIVERY_THRESHOLD) {
        Price::ZERO
    } else {
        Price::from_rupees(DELIVERY_FEE)
    };

    let discount = discount_for(subtotal);
    let final_total = (subtotal + delivery_fee).saturating_sub(discount);

    OrderTotals {
        subtotal,
        delivery_fee,
        discount,
        final_total,
    }
}

fn discount_for(subtotal: Price) -> Price {
    let rate = Decimal::from(DISCOUNT_PERCENT) / Decimal::ONE_HUNDRED;
    let raw = subtotal.amount().checked_mul(rate).unwrap_or(Decimal::MAX);
    // subtotal is non-negative, so away-from-zero is half-up
    Price::from_non_negative(raw.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}
