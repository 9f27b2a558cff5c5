//! Domain models.
//!
//! These types represent validated domain objects, separate from the
//! request/response DTOs defined beside the route handlers.

pub mod account;
pub mod feedback;
pub mod guest;
pub mod menu;
pub mod order;

pub use account::{Account, GuestMigration};
pub use feedback::Feedback;
pub use guest::{ConversionStats, GuestSession, UpgradePrompts};
pub use menu::{DEFAULT_PREP_TIME_MINUTES, MenuItem};
pub use order::{Order, OrderLine};
