//! Festify Core - Cart ledger and catalog types.
//!
//! This crate holds the storefront's business rules:
//! - `storefront` - Public-facing web site, persists carts in the session
//! - `cli` - Command-line tools for catalog checks and order quotes
//!
//! # Architecture
//!
//! The core crate contains only types, traits and pure functions - no I/O, no
//! session access, no HTTP. Every cart operation takes a [`Cart`] by value and
//! returns the updated cart, so callers decide where it is stored.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and prices
//! - [`catalog`] - Products and the read-only catalog they are looked up in
//! - [`cart`] - The cart ledger: line items and their transitions
//! - [`totals`] - Order totals derived from a cart

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod totals;
pub mod types;

pub use cart::{Cart, CartError, Direction, LineItem};
pub use catalog::{Catalog, CatalogError, Product, StaticCatalog};
pub use totals::{OrderTotals, compute_totals};
pub use types::*;
