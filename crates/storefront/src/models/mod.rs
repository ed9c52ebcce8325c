//! Domain models for storefront.
//!
//! The cart itself lives in `festify-core`; this module holds what the
//! storefront keeps in the session around it.

pub mod session;

pub use session::{keys, load_cart, save_cart};
