//! Domain services.
//!
//! Each service borrows the shared [`Store`](crate::store::Store) and owns
//! one slice of the domain:
//!
//! - [`catalog`] - menu management and stock adjustment
//! - [`reservation`] - all-or-nothing stock reservation for order lines
//! - [`orders`] - order creation, lifecycle transitions, listings, reports
//! - [`feedback`] - order feedback
//! - [`migration`] - guest sessions and guest-to-account migration

pub mod catalog;
pub mod feedback;
pub mod migration;
pub mod orders;
pub mod reservation;

pub use catalog::{CatalogError, CatalogService};
pub use feedback::{FeedbackError, FeedbackService};
pub use migration::{MigrationError, MigrationService};
pub use orders::{OrderError, OrderService};
pub use reservation::{LineRequest, Reservation, ReservationError};
