//! Catalog accessors over the store.

use chrono::Utc;

use mensa_core::{Category, MenuItemId};

use super::StoreInner;
use crate::models::MenuItem;

/// Filters for menu listings.
#[derive(Debug, Clone, Default)]
pub struct MenuFilter {
    /// Restrict to one category.
    pub category: Option<Category>,
    /// Case-insensitive substring match on name or description.
    pub search: Option<String>,
    /// Only today's specials.
    pub specials_only: bool,
}

/// A new menu item, before the store assigns an ID.
#[derive(Debug, Clone)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: String,
    pub price: mensa_core::Price,
    pub image_url: String,
    pub category: Category,
    pub is_special: bool,
    pub stock: mensa_core::Stock,
    pub prep_time_minutes: u32,
}

impl StoreInner {
    /// Look up a menu item by ID.
    pub fn menu_item(&self, id: MenuItemId) -> Option<&MenuItem> {
        self.menu.get(&id)
    }

    pub(crate) fn menu_item_mut(&mut self, id: MenuItemId) -> Option<&mut MenuItem> {
        self.menu.get_mut(&id)
    }

    /// Insert a new menu item and return it.
    pub fn insert_menu_item(&mut self, draft: MenuItemDraft) -> MenuItem {
        let now = Utc::now();
        let id = self.next_menu_item_id();
        let item = MenuItem {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            image_url: draft.image_url,
            category: draft.category,
            is_special: draft.is_special,
            stock: draft.stock,
            prep_time_minutes: draft.prep_time_minutes,
            created_at: now,
            updated_at: now,
        };
        self.menu.insert(id, item.clone());
        item
    }

    /// Remove a menu item, returning it if it existed.
    pub fn remove_menu_item(&mut self, id: MenuItemId) -> Option<MenuItem> {
        self.menu.remove(&id)
    }

    /// List menu items matching a filter, specials first, then newest.
    pub fn list_menu(&self, filter: &MenuFilter) -> Vec<MenuItem> {
        let needle = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut items: Vec<MenuItem> = self
            .menu
            .values()
            .filter(|item| {
                filter
                    .category
                    .is_none_or(|category| item.category == category)
            })
            .filter(|item| !filter.specials_only || item.is_special)
            .filter(|item| {
                needle.as_ref().is_none_or(|needle| {
                    item.name.to_lowercase().contains(needle)
                        || item.description.to_lowercase().contains(needle)
                })
            })
            .cloned()
            .collect();

        items.sort_by(|a, b| {
            b.is_special
                .cmp(&a.is_special)
                .then(b.created_at.cmp(&a.created_at))
                .then(b.id.cmp(&a.id))
        });
        items
    }
}
