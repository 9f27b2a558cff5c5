//! Stock counter with an unlimited sentinel.
//!
//! The wire format is a single integer: `-1` means unlimited, any other
//! value must be a non-negative remaining count. The out-of-stock flag is
//! always derived from the counter ([`Stock::is_out`]), never stored
//! independently.

use serde::{Deserialize, Serialize};

/// Errors produced by stock arithmetic and parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum StockError {
    /// A wire value other than `-1` or a non-negative integer.
    #[error("invalid stock value {0}: must be -1 (unlimited) or >= 0")]
    InvalidValue(i64),
    /// An adjustment would drive finite stock below zero.
    #[error("stock adjustment by {delta} would drop below zero (remaining {remaining})")]
    Underflow {
        /// Stock remaining before the adjustment.
        remaining: u32,
        /// The requested delta.
        delta: i64,
    },
    /// Unlimited stock is not a counter and cannot be adjusted.
    #[error("stock is unlimited and cannot be adjusted")]
    Unlimited,
}

/// Remaining stock for a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Stock {
    /// The item is never depleted (`-1` on the wire).
    Unlimited,
    /// A finite remaining count.
    Finite(u32),
}

impl Stock {
    /// True iff the item is sold out (finite stock of exactly zero).
    #[must_use]
    pub const fn is_out(self) -> bool {
        matches!(self, Self::Finite(0))
    }

    /// True if `qty` units can currently be served.
    #[must_use]
    pub const fn can_serve(self, qty: u32) -> bool {
        match self {
            Self::Unlimited => true,
            Self::Finite(remaining) => qty <= remaining,
        }
    }

    /// Remaining stock after reserving `qty` units.
    ///
    /// Unlimited stock is never decremented.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Underflow`] if `qty` exceeds finite stock.
    pub const fn reserve(self, qty: u32) -> Result<Self, StockError> {
        match self {
            Self::Unlimited => Ok(Self::Unlimited),
            Self::Finite(remaining) => {
                if qty > remaining {
                    Err(StockError::Underflow {
                        remaining,
                        delta: -(qty as i64),
                    })
                } else {
                    Ok(Self::Finite(remaining - qty))
                }
            }
        }
    }

    /// Remaining stock after applying a signed adjustment.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::Unlimited`] for unlimited items and
    /// [`StockError::Underflow`] if the delta would drop finite stock
    /// below zero.
    pub fn adjust(self, delta: i64) -> Result<Self, StockError> {
        match self {
            Self::Unlimited => Err(StockError::Unlimited),
            Self::Finite(remaining) => {
                let next = i64::from(remaining) + delta;
                u32::try_from(next)
                    .map(Self::Finite)
                    .map_err(|_| StockError::Underflow { remaining, delta })
            }
        }
    }
}

impl TryFrom<i64> for Stock {
    type Error = StockError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Unlimited),
            v if v >= 0 => u32::try_from(v)
                .map(Self::Finite)
                .map_err(|_| StockError::InvalidValue(value)),
            v => Err(StockError::InvalidValue(v)),
        }
    }
}

impl From<Stock> for i64 {
    fn from(stock: Stock) -> Self {
        match stock {
            Stock::Unlimited => -1,
            Stock::Finite(remaining) => Self::from(remaining),
        }
    }
}

impl std::fmt::Display for Stock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unlimited => write!(f, "unlimited"),
            Self::Finite(remaining) => write!(f, "{remaining}"),
        }
    }
}
