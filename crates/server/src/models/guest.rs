//! Guest session domain types.
//!
//! A guest session is an anonymous, device-local identity tracked
//! server-side. It exists from first contact until it is either abandoned
//! or migrated into a durable account, at which point it is destroyed.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use mensa_core::{Email, GuestId, MenuItemId, OrderId};

/// Upgrade-prompt bookkeeping for a guest session.
#[derive(Debug, Clone, Default)]
pub struct UpgradePrompts {
    /// How many times the upgrade prompt has been shown.
    pub shown: u32,
    /// When it was last shown.
    pub last_shown: Option<DateTime<Utc>>,
    /// Whether the guest dismissed the prompt for good.
    pub dismissed: bool,
}

/// Conversion counters accumulated while ordering as a guest.
#[derive(Debug, Clone, Default)]
pub struct ConversionStats {
    /// Orders placed in this session.
    pub total_orders: u32,
    /// Total spent across those orders.
    pub total_spent: Decimal,
    /// `total_spent / total_orders`, kept current on every tracked order.
    pub avg_order_value: Decimal,
}

/// Maximum number of upgrade prompts before the guest is left alone.
const MAX_UPGRADE_PROMPTS: u32 = 3;

/// Orders placed before a guest is worth prompting to upgrade.
const UPGRADE_ORDER_THRESHOLD: u32 = 2;

/// Favorites saved before a guest is worth prompting to upgrade.
const UPGRADE_FAVORITES_THRESHOLD: usize = 3;

/// An anonymous guest session.
#[derive(Debug, Clone)]
pub struct GuestSession {
    /// Opaque session identifier.
    pub guest_id: GuestId,
    /// Display name used on orders.
    pub customer_name: String,
    /// Contact email, if the guest volunteered one.
    pub email: Option<Email>,
    /// Contact phone, if the guest volunteered one.
    pub phone: Option<String>,
    /// Favorite menu item references.
    pub favorite_items: Vec<MenuItemId>,
    /// Orders placed during this session, oldest first.
    pub order_history: Vec<OrderId>,
    /// When the session was first seen.
    pub created_at: DateTime<Utc>,
    /// Last request that touched this session.
    pub last_active: DateTime<Utc>,
    /// Upgrade-prompt counters.
    pub upgrade_prompts: UpgradePrompts,
    /// Conversion counters.
    pub conversion: ConversionStats,
}

impl GuestSession {
    /// Create a fresh session for a first contact.
    #[must_use]
    pub fn new(guest_id: GuestId, customer_name: String, now: DateTime<Utc>) -> Self {
        Self {
            guest_id,
            customer_name,
            email: None,
            phone: None,
            favorite_items: Vec::new(),
            order_history: Vec::new(),
            created_at: now,
            last_active: now,
            upgrade_prompts: UpgradePrompts::default(),
            conversion: ConversionStats::default(),
        }
    }

    /// Record a placed order in the session history and counters.
    pub fn record_order(&mut self, order_id: OrderId, order_total: Decimal) {
        self.order_history.push(order_id);
        self.conversion.total_orders += 1;
        self.conversion.total_spent += order_total;
        self.conversion.avg_order_value =
            self.conversion.total_spent / Decimal::from(self.conversion.total_orders);
    }

    /// Whether the UI should offer upgrading this guest to an account.
    ///
    /// Dismissed or over-prompted guests are never asked again; otherwise
    /// a guest qualifies once they have ordered twice or saved three
    /// favorites.
    #[must_use]
    pub fn should_show_upgrade_prompt(&self) -> bool {
        if self.upgrade_prompts.dismissed || self.upgrade_prompts.shown >= MAX_UPGRADE_PROMPTS {
            return false;
        }
        self.conversion.total_orders >= UPGRADE_ORDER_THRESHOLD
            || self.favorite_items.len() >= UPGRADE_FAVORITES_THRESHOLD
    }
}
