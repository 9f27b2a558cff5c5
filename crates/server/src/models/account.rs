//! Account domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use mensa_core::{AccountId, AccountRole, Email, GuestId, MenuItemId, OrderId};

/// Record of the guest session an account was migrated from.
///
/// Stamped once during migration and never updated afterwards.
#[derive(Debug, Clone)]
pub struct GuestMigration {
    /// The guest session this account absorbed.
    pub original_guest_id: GuestId,
    /// When the migration ran.
    pub migrated_at: DateTime<Utc>,
    /// The orders whose ownership moved to this account.
    pub migrated_orders: Vec<OrderId>,
    /// Orders placed while still a guest.
    pub orders_as_guest: u32,
    /// Total spent while still a guest.
    pub spent_as_guest: Decimal,
}

/// A durable, credentialed account.
#[derive(Debug, Clone)]
pub struct Account {
    /// Unique account ID.
    pub id: AccountId,
    /// Display name.
    pub username: String,
    /// Unique login identity.
    pub email: Email,
    /// Argon2 password hash; never serialized.
    pub password_hash: String,
    /// Permission level.
    pub role: AccountRole,
    /// Contact phone carried over from the guest profile, if any.
    pub phone: Option<String>,
    /// Favorite menu item references.
    pub favorite_items: Vec<MenuItemId>,
    /// Present iff this account was created by migrating a guest session.
    pub guest_migration: Option<GuestMigration>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
