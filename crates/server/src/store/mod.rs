//! In-memory store backing the canteen service.
//!
//! The persistence contract the domain needs is narrow: per-entity
//! get/put/delete plus a transactional boundary for the three multi-step
//! operations (reservation commit, status transition, guest migration).
//! This module satisfies it with a single `RwLock` over all entity maps:
//! a write guard *is* the transaction. Everything mutated while a guard is
//! held commits together or not at all, and writers for the same row are
//! trivially serialized.
//!
//! A SQL backend would map each write-guard scope onto one database
//! transaction with row locks; the service layer would not change shape.
//!
//! Per-entity accessors live beside the entity:
//!
//! - [`catalog`] - menu items
//! - [`orders`] - orders
//! - [`guests`] - guest sessions
//! - [`accounts`] - accounts
//! - [`feedback`] - order feedback

pub mod accounts;
pub mod catalog;
pub mod feedback;
pub mod guests;
pub mod orders;

use std::collections::HashMap;

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use mensa_core::{AccountId, FeedbackId, GuestId, MenuItemId, OrderId};

use crate::models::{Account, Feedback, GuestSession, MenuItem, Order};

/// All entity state, guarded by the store lock.
#[derive(Debug, Default)]
pub struct StoreInner {
    pub(crate) menu: HashMap<MenuItemId, MenuItem>,
    pub(crate) orders: HashMap<OrderId, Order>,
    pub(crate) guests: HashMap<GuestId, GuestSession>,
    pub(crate) accounts: HashMap<AccountId, Account>,
    pub(crate) feedback: HashMap<FeedbackId, Feedback>,
    next_menu_item_id: i32,
    next_order_id: i32,
    next_account_id: i32,
    next_feedback_id: i32,
}

impl StoreInner {
    pub(crate) fn next_menu_item_id(&mut self) -> MenuItemId {
        self.next_menu_item_id += 1;
        MenuItemId::new(self.next_menu_item_id)
    }

    pub(crate) fn next_order_id(&mut self) -> OrderId {
        self.next_order_id += 1;
        OrderId::new(self.next_order_id)
    }

    pub(crate) fn next_account_id(&mut self) -> AccountId {
        self.next_account_id += 1;
        AccountId::new(self.next_account_id)
    }

    pub(crate) fn next_feedback_id(&mut self) -> FeedbackId {
        self.next_feedback_id += 1;
        FeedbackId::new(self.next_feedback_id)
    }
}

/// Shared store handle.
///
/// Cheap to share behind the application state's `Arc`; guards must not be
/// held across `.await` points that leave the service layer.
#[derive(Debug, Default)]
pub struct Store {
    inner: RwLock<StoreInner>,
}

impl Store {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a shared read guard.
    pub async fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().await
    }

    /// Acquire an exclusive write guard - the transactional boundary for
    /// every multi-step mutation.
    pub async fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().await
    }
}
