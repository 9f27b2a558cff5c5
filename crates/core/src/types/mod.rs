//! Core types for Mensa.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod email;
pub mod id;
pub mod price;
pub mod status;
pub mod stock;

pub use customer::CustomerRef;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use status::*;
pub use stock::{Stock, StockError};
