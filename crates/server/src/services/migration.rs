//! Guest sessions and guest-to-account migration.
//!
//! Guest sessions accumulate history and preferences anonymously; at most
//! once per session they can be migrated into a durable account. The
//! migration re-attributes historical orders and destroys the session in
//! the same store transaction, so re-invoking it observes `GuestNotFound`
//! instead of minting a duplicate account.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use mensa_core::{CustomerRef, Email, EmailError, GuestId, MenuItemId, OrderId};

use crate::models::{Account, GuestMigration, GuestSession};
use crate::store::Store;

/// Minimum password length for migrated accounts.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during guest operations and migration.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// No guest session exists for the given ID.
    #[error("guest not found")]
    GuestNotFound,

    /// An account already exists with the requested email identity.
    #[error("account already exists with this email")]
    AlreadyExists,

    /// A tracked order does not exist.
    #[error("order not found: {0}")]
    OrderNotFound(OrderId),

    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Password too weak.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Credentials for the account a guest upgrades into.
#[derive(Debug, Clone)]
pub struct NewCredentials {
    /// Unique login identity.
    pub email: String,
    /// Plaintext password; hashed before anything is stored.
    pub password: String,
    /// Optional display name override; defaults to the guest's name.
    pub username: Option<String>,
}

/// Partial update to a guest's profile. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct GuestPreferences {
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite_items: Option<Vec<MenuItemId>>,
}

/// The result of a successful migration.
#[derive(Debug, Clone)]
pub struct MigrationOutcome {
    /// The newly created account.
    pub account: Account,
    /// How many historical orders were re-attributed.
    pub migrated_orders: usize,
}

/// Guest session and migration service.
pub struct MigrationService<'a> {
    store: &'a Store,
}

impl<'a> MigrationService<'a> {
    /// Create a new migration service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Fetch an existing guest session or create one on first contact.
    ///
    /// A missing `guest_id` gets a server-generated one. Existing sessions
    /// only have their `last_active` refreshed.
    pub async fn get_or_create(
        &self,
        guest_id: Option<GuestId>,
        customer_name: Option<String>,
    ) -> GuestSession {
        let guest_id = guest_id.unwrap_or_else(|| GuestId::new(format!("guest-{}", Uuid::new_v4())));
        let mut inner = self.store.write().await;

        if let Some(guest) = inner.guest_mut(&guest_id) {
            guest.last_active = Utc::now();
            return guest.clone();
        }

        let guest = GuestSession::new(
            guest_id.clone(),
            customer_name.unwrap_or_else(|| "Guest".to_owned()),
            Utc::now(),
        );
        inner.insert_guest(guest.clone());
        info!(guest_id = %guest_id, "guest session created");
        guest
    }

    /// Apply a partial profile update to a guest session.
    ///
    /// # Errors
    ///
    /// [`MigrationError::GuestNotFound`] if the session does not exist,
    /// [`MigrationError::InvalidEmail`] if the volunteered email is bad.
    pub async fn update_preferences(
        &self,
        guest_id: &GuestId,
        prefs: GuestPreferences,
    ) -> Result<GuestSession, MigrationError> {
        let email = prefs.email.as_deref().map(Email::parse).transpose()?;

        let mut inner = self.store.write().await;
        let guest = inner.guest_mut(guest_id).ok_or(MigrationError::GuestNotFound)?;

        if let Some(customer_name) = prefs.customer_name {
            guest.customer_name = customer_name;
        }
        if let Some(email) = email {
            guest.email = Some(email);
        }
        if let Some(phone) = prefs.phone {
            guest.phone = Some(phone);
        }
        if let Some(favorite_items) = prefs.favorite_items {
            guest.favorite_items = favorite_items;
        }
        guest.last_active = Utc::now();

        Ok(guest.clone())
    }

    /// Record a placed order in the guest's history and conversion
    /// counters. The order total is read from the order itself, never
    /// trusted from the caller.
    ///
    /// # Errors
    ///
    /// [`MigrationError::GuestNotFound`] if the session does not exist,
    /// [`MigrationError::OrderNotFound`] if the order does not.
    pub async fn track_order(
        &self,
        guest_id: &GuestId,
        order_id: OrderId,
    ) -> Result<GuestSession, MigrationError> {
        let mut inner = self.store.write().await;
        let total = inner
            .order(order_id)
            .map(|order| order.total)
            .ok_or(MigrationError::OrderNotFound(order_id))?;

        let guest = inner.guest_mut(guest_id).ok_or(MigrationError::GuestNotFound)?;
        guest.record_order(order_id, total);
        guest.last_active = Utc::now();

        Ok(guest.clone())
    }

    /// Record that the upgrade prompt was shown to this guest.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::GuestNotFound`] if the session does not
    /// exist.
    pub async fn record_prompt_shown(
        &self,
        guest_id: &GuestId,
    ) -> Result<GuestSession, MigrationError> {
        let mut inner = self.store.write().await;
        let guest = inner.guest_mut(guest_id).ok_or(MigrationError::GuestNotFound)?;
        guest.upgrade_prompts.shown += 1;
        guest.upgrade_prompts.last_shown = Some(Utc::now());
        Ok(guest.clone())
    }

    /// Record that the guest dismissed the upgrade prompt for good.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::GuestNotFound`] if the session does not
    /// exist.
    pub async fn dismiss_prompt(&self, guest_id: &GuestId) -> Result<GuestSession, MigrationError> {
        let mut inner = self.store.write().await;
        let guest = inner.guest_mut(guest_id).ok_or(MigrationError::GuestNotFound)?;
        guest.upgrade_prompts.dismissed = true;
        Ok(guest.clone())
    }

    /// Migrate a guest session into a durable account.
    ///
    /// Creates the account from the guest profile, stamps the migration
    /// record, re-attributes every order in the guest's history to the new
    /// account ID, and deletes the session - all under one write guard.
    /// Deleting the session is the commit point: a crash cannot leave
    /// orders re-attributed while the session remains migratable, and a
    /// repeat invocation fails with `GuestNotFound`.
    ///
    /// # Errors
    ///
    /// [`MigrationError::AlreadyExists`] if the email is taken,
    /// [`MigrationError::GuestNotFound`] if the session does not exist,
    /// plus credential validation errors. Validation all happens before
    /// the first write, so a failed migration changes nothing.
    pub async fn migrate(
        &self,
        guest_id: &GuestId,
        credentials: NewCredentials,
    ) -> Result<MigrationOutcome, MigrationError> {
        let email = Email::parse(&credentials.email)?;
        if credentials.password.len() < MIN_PASSWORD_LENGTH {
            return Err(MigrationError::WeakPassword(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }
        // Hash before taking the write guard; hashing is CPU-bound and
        // must not serialize unrelated requests.
        let password_hash = hash_password(&credentials.password)?;

        let mut inner = self.store.write().await;

        if inner.account_by_email(&email).is_some() {
            return Err(MigrationError::AlreadyExists);
        }
        let guest = inner.guest(guest_id).cloned().ok_or(MigrationError::GuestNotFound)?;

        let account_id = inner.next_account_id();
        let account = Account {
            id: account_id,
            username: credentials
                .username
                .unwrap_or_else(|| guest.customer_name.clone()),
            email,
            password_hash,
            role: mensa_core::AccountRole::Customer,
            phone: guest.phone.clone(),
            favorite_items: guest.favorite_items.clone(),
            guest_migration: Some(GuestMigration {
                original_guest_id: guest.guest_id.clone(),
                migrated_at: Utc::now(),
                migrated_orders: guest.order_history.clone(),
                orders_as_guest: guest.conversion.total_orders,
                spent_as_guest: guest.conversion.total_spent,
            }),
            created_at: Utc::now(),
        };

        // Bulk ownership change: every historical order now belongs to
        // the account.
        let mut migrated_orders = 0;
        for order_id in &guest.order_history {
            if let Some(order) = inner.order_mut(*order_id) {
                order.customer = CustomerRef::Account(account_id);
                migrated_orders += 1;
            }
        }

        inner.insert_account(account.clone());
        inner.remove_guest(guest_id);

        info!(
            guest_id = %guest_id,
            account_id = %account_id,
            migrated_orders,
            "guest migrated to account"
        );
        Ok(MigrationOutcome {
            account,
            migrated_orders,
        })
    }
}

/// Hash a password using Argon2id with default parameters.
fn hash_password(password: &str) -> Result<String, MigrationError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| MigrationError::PasswordHash)
}
