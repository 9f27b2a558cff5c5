//! Type-safe price representation using decimal arithmetic.
//!
//! The canteen trades in a single currency, so a price is a non-negative
//! decimal amount. Totals are plain [`Decimal`] sums of `price * qty`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A non-negative price in the canteen's currency unit.
///
/// Wire format is the decimal string form (e.g. `"3.50"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// The line total for `qty` units at this price.
    #[must_use]
    pub fn times(&self, qty: u32) -> Decimal {
        self.0 * Decimal::from(qty)
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

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(Price::new(Decimal::new(-1, 2)).is_err());
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert!(Price::new(Decimal::new(425, 2)).is_ok());
    }

    #[test]
    fn test_times() {
        let price = Price::new(Decimal::new(250, 2)).unwrap();
        assert_eq!(price.times(3), Decimal::new(750, 2));
        assert_eq!(price.times(0), Decimal::ZERO);
    }

    #[test]
    fn test_serde_rejects_negative() {
        let parsed: Result<Price, _> = serde_json::from_str("\"-1.00\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::new(Decimal::new(350, 2)).unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let parsed: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, price);
    }
}
