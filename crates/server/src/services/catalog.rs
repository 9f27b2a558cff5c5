//! Catalog service: menu management and stock adjustment.

use thiserror::Error;
use tracing::info;

use mensa_core::{Category, MenuItemId, Price, Stock, StockError};

use crate::models::MenuItem;
use crate::store::Store;
use crate::store::catalog::{MenuFilter, MenuItemDraft};

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Referenced menu item does not exist.
    #[error("menu item not found")]
    NotFound,

    /// A stock adjustment was refused (underflow or unlimited item).
    #[error("invalid stock adjustment: {0}")]
    InvalidStock(#[from] StockError),
}

/// Fields of a menu item an admin may change. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    pub category: Option<Category>,
    pub is_special: Option<bool>,
    pub stock: Option<Stock>,
    pub prep_time_minutes: Option<u32>,
}

/// Catalog service.
pub struct CatalogService<'a> {
    store: &'a Store,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// List menu items matching a filter, specials first, then newest.
    pub async fn list(&self, filter: &MenuFilter) -> Vec<MenuItem> {
        self.store.read().await.list_menu(filter)
    }

    /// Get a menu item by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the item does not exist.
    pub async fn get(&self, id: MenuItemId) -> Result<MenuItem, CatalogError> {
        self.store
            .read()
            .await
            .menu_item(id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }

    /// Create a new menu item.
    pub async fn create(&self, draft: MenuItemDraft) -> MenuItem {
        let item = self.store.write().await.insert_menu_item(draft);
        info!(item_id = %item.id, name = %item.name, "menu item created");
        item
    }

    /// Apply a partial update to a menu item.
    ///
    /// Setting `stock` replaces the counter outright; the out-of-stock
    /// flag follows it automatically because it is derived.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the item does not exist.
    pub async fn update(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, CatalogError> {
        let mut inner = self.store.write().await;
        let item = inner.menu_item_mut(id).ok_or(CatalogError::NotFound)?;

        if let Some(name) = update.name {
            item.name = name;
        }
        if let Some(description) = update.description {
            item.description = description;
        }
        if let Some(price) = update.price {
            item.price = price;
        }
        if let Some(image_url) = update.image_url {
            item.image_url = image_url;
        }
        if let Some(category) = update.category {
            item.category = category;
        }
        if let Some(is_special) = update.is_special {
            item.is_special = is_special;
        }
        if let Some(stock) = update.stock {
            item.stock = stock;
        }
        if let Some(prep_time_minutes) = update.prep_time_minutes {
            item.prep_time_minutes = prep_time_minutes;
        }
        item.updated_at = chrono::Utc::now();

        Ok(item.clone())
    }

    /// Delete a menu item.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the item does not exist.
    pub async fn delete(&self, id: MenuItemId) -> Result<(), CatalogError> {
        self.store
            .write()
            .await
            .remove_menu_item(id)
            .map(|item| info!(item_id = %id, name = %item.name, "menu item deleted"))
            .ok_or(CatalogError::NotFound)
    }

    /// Adjust an item's finite stock by a signed delta.
    ///
    /// Refuses to drive finite stock below zero and refuses to adjust
    /// unlimited items. The update and the derived out-of-stock recompute
    /// happen under one write guard.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the item does not exist, or
    /// [`CatalogError::InvalidStock`] if the adjustment is refused.
    pub async fn adjust_stock(
        &self,
        id: MenuItemId,
        delta: i64,
    ) -> Result<MenuItem, CatalogError> {
        let mut inner = self.store.write().await;
        let item = inner.menu_item_mut(id).ok_or(CatalogError::NotFound)?;

        item.stock = item.stock.adjust(delta)?;
        item.updated_at = chrono::Utc::now();
        info!(item_id = %id, delta, stock = %item.stock, "stock adjusted");

        Ok(item.clone())
    }
}
