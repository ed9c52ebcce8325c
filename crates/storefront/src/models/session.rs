//! Session-stored cart.
//!
//! The session is the cart's only persistence. Handlers load the cart, pass it
//! through a ledger operation and save the result back.

use festify_core::Cart;
use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";
}

/// Load the visitor's cart, or an empty one if none is stored.
///
/// A stored value that no longer deserializes is logged and discarded.
pub async fn load_cart(session: &Session) -> Cart {
    match session.get::<Cart>(keys::CART).await {
        Ok(cart) => cart.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Discarding unreadable cart in session: {e}");
            Cart::new()
        }
    }
}

/// Store the visitor's cart. An empty cart clears the key.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    if cart.is_empty() {
        session.remove_value(keys::CART).await?;
    } else {
        session.insert(keys::CART, cart).await?;
    }
    Ok(())
}
