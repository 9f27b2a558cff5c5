//! Menu item domain type.

use chrono::{DateTime, Utc};

use mensa_core::{Category, MenuItemId, Price, Stock};

/// Default preparation time when a menu item does not specify one.
pub const DEFAULT_PREP_TIME_MINUTES: u32 = 5;

/// A menu item owned by the catalog store.
///
/// The out-of-stock flag is derived from [`Stock`] on every read; it is
/// deliberately not a field so it can never disagree with the counter.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Unique menu item ID.
    pub id: MenuItemId,
    /// Display name.
    pub name: String,
    /// Longer description for menu listings.
    pub description: String,
    /// Unit price; snapshotted into order lines at order time.
    pub price: Price,
    /// Optional image URL for the menu UI.
    pub image_url: String,
    /// Menu category.
    pub category: Category,
    /// Today's special flag; specials sort first in listings.
    pub is_special: bool,
    /// Remaining stock (`-1` sentinel on the wire means unlimited).
    pub stock: Stock,
    /// Preparation time per unit, in minutes.
    pub prep_time_minutes: u32,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// True iff the item is sold out (finite stock of exactly zero).
    #[must_use]
    pub const fn is_out_of_stock(&self) -> bool {
        self.stock.is_out()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn item(stock: Stock) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(1),
            name: "Iced Tea".to_owned(),
            description: String::new(),
            price: Price::new(Decimal::new(150, 2)).expect("non-negative"),
            image_url: String::new(),
            category: Category::Drinks,
            is_special: false,
            stock,
            prep_time_minutes: DEFAULT_PREP_TIME_MINUTES,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_out_of_stock_is_derived() {
        assert!(item(Stock::Finite(0)).is_out_of_stock());
        assert!(!item(Stock::Finite(2)).is_out_of_stock());
        assert!(!item(Stock::Unlimited).is_out_of_stock());
    }
}
