//! Type-safe price representation using decimal arithmetic.
//!
//! All storefront prices are in Indian rupees. A [`Price`] can never be
//! negative: construction from a negative amount fails, and subtraction
//! saturates at zero. Addition and multiplication saturate at [`Price::MAX`].

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative amount of rupees.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable price.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: u32) -> Self {
        Self(Decimal::from(rupees))
    }

    /// Wrap an amount already known to be non-negative.
    pub(crate) const fn from_non_negative(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is exactly zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract `other`, clamping at zero.
    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        if other.0 >= self.0 {
            Self::ZERO
        } else {
            Self(self.0 - other.0)
        }
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self::Output {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    /// Whole amounts render without decimals (`₹199`), others with two (`₹12.50`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.fract().is_zero() {
            write!(f, "₹{}", self.0.trunc().normalize())
        } else {
            write!(f, "₹{:.2}", self.0)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_price_rejected() {
        let err = Price::new(Decimal::new(-1, 0)).unwrap_err();
        assert_eq!(err, PriceError::Negative(Decimal::new(-1, 0)));
        assert!(Price::new(Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_rupees(199).to_string(), "₹199");
        assert_eq!(Price::new(Decimal::new(1250, 2)).unwrap().to_string(), "₹12.50");
        assert_eq!(Price::new(Decimal::new(39900, 2)).unwrap().to_string(), "₹399");
        assert_eq!(Price::ZERO.to_string(), "₹0");
    }

    #[test]
    fn test_arithmetic() {
        let diya = Price::from_rupees(199);
        assert_eq!(diya * 2, Price::from_rupees(398));
        assert_eq!(diya + Price::from_rupees(1), Price::from_rupees(200));
        assert_eq!(
            [diya, diya, Price::from_rupees(2)].into_iter().sum::<Price>(),
            Price::from_rupees(400)
        );
        assert_eq!(diya.saturating_sub(Price::from_rupees(500)), Price::ZERO);
    }

    #[test]
    fn test_arithmetic_saturates_at_max() {
        assert_eq!(Price::MAX + Price::from_rupees(1), Price::MAX);
        assert_eq!(Price::MAX * 3, Price::MAX);
        assert_eq!([Price::MAX, Price::MAX].into_iter().sum::<Price>(), Price::MAX);
    }

    #[test]
    fn test_deserialize_rejects_negative() {
        let ok: Price = serde_json::from_str("249").unwrap();
        assert_eq!(ok, Price::from_rupees(249));
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }
}
