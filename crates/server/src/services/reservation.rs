//! Stock reservation engine.
//!
//! Validates a candidate order's lines against the catalog and commits the
//! stock decrements as a single unit. The caller must hold the store's
//! write guard for the whole call; that guard is what makes validation and
//! commit one atomic step, so two concurrent reservations can never jointly
//! exceed an item's remaining stock.

use std::collections::HashMap;

use mensa_core::{MenuItemId, Stock};
use thiserror::Error;

use crate::models::OrderLine;
use crate::store::StoreInner;

/// Errors produced by a reservation attempt.
///
/// Both are expected, recoverable-by-caller conditions; a failed
/// reservation leaves stock untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// A line references a menu item that does not exist.
    #[error("invalid menu item: {0}")]
    InvalidItem(MenuItemId),

    /// An item is sold out or has less stock than requested. Carries the
    /// item's display name for user-facing messaging.
    #[error("item out of stock: {0}")]
    OutOfStock(String),
}

/// One requested line of a candidate order.
#[derive(Debug, Clone, Copy)]
pub struct LineRequest {
    /// The referenced menu item.
    pub menu_item_id: MenuItemId,
    /// Requested quantity; non-positive input is clamped to 1.
    pub qty: i64,
}

impl LineRequest {
    /// The effective quantity after defensive clamping.
    #[must_use]
    pub fn effective_qty(&self) -> u32 {
        u32::try_from(self.qty.clamp(1, i64::from(u32::MAX))).unwrap_or(1)
    }
}

/// A committed reservation: the snapshotted lines plus the bottleneck
/// preparation time across them (`max(prep_i * qty_i)`, unfloored).
#[derive(Debug, Clone)]
pub struct Reservation {
    /// Order lines with name and price captured at reservation time.
    pub lines: Vec<OrderLine>,
    /// The slowest line's total preparation time, in minutes.
    pub bottleneck_minutes: u32,
}

/// Validate every line and, only if all pass, commit the decrements.
///
/// Resolution is batch-style: any missing item fails the whole request
/// before any stock check runs. Stock validation fails fast on the first
/// offending line. Unlimited items are never decremented.
///
/// # Errors
///
/// [`ReservationError::InvalidItem`] if any referenced item is missing,
/// [`ReservationError::OutOfStock`] if any line cannot be served.
pub fn reserve(
    inner: &mut StoreInner,
    requests: &[LineRequest],
) -> Result<Reservation, ReservationError> {
    // Resolve every line first; an unknown item fails the request before
    // any stock is examined.
    let mut resolved = Vec::with_capacity(requests.len());
    for request in requests {
        let item = inner
            .menu_item(request.menu_item_id)
            .ok_or(ReservationError::InvalidItem(request.menu_item_id))?;
        resolved.push((item, request.effective_qty()));
    }

    // Validate stock and compute the post-commit value for each line
    // without touching the catalog. The working map makes repeated lines
    // for the same item draw down one shared counter.
    let mut working: HashMap<MenuItemId, Stock> = HashMap::new();
    let mut lines: Vec<OrderLine> = Vec::with_capacity(requests.len());
    let mut bottleneck_minutes = 0u32;

    for (item, qty) in resolved {
        let stock = working.get(&item.id).copied().unwrap_or(item.stock);
        if stock.is_out() || !stock.can_serve(qty) {
            return Err(ReservationError::OutOfStock(item.name.clone()));
        }

        let remaining = stock
            .reserve(qty)
            .map_err(|_| ReservationError::OutOfStock(item.name.clone()))?;

        working.insert(item.id, remaining);
        bottleneck_minutes = bottleneck_minutes.max(item.prep_time_minutes.saturating_mul(qty));
        lines.push(OrderLine {
            menu_item_id: item.id,
            name: item.name.clone(),
            price: item.price,
            qty,
        });
    }

    // Phase 2: commit. The write guard held by the caller spans both
    // phases, so the precomputed stock values are still valid.
    for (item_id, remaining) in working {
        if let Some(item) = inner.menu_item_mut(item_id) {
            item.stock = remaining;
            item.updated_at = chrono::Utc::now();
        }
    }

    Ok(Reservation {
        lines,
        bottleneck_minutes,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::Store;
    use crate::store::catalog::tests::draft;
    use mensa_core::Category;

    fn line(id: MenuItemId, qty: i64) -> LineRequest {
        LineRequest {
            menu_item_id: id,
            qty,
        }
    }

    #[tokio::test]
    async fn test_reserve_decrements_finite_stock() {
        let store = Store::new();
        let mut inner = store.write().await;
        let tea = inner.insert_menu_item(draft("Iced Tea", Category::Drinks, Stock::Finite(3)));

        let reservation = reserve(&mut inner, &[line(tea.id, 2)]).unwrap();
        assert_eq!(reservation.lines.len(), 1);
        assert_eq!(reservation.lines[0].qty, 2);
        assert_eq!(inner.menu_item(tea.id).unwrap().stock, Stock::Finite(1));
    }

    #[tokio::test]
    async fn test_reserve_never_decrements_unlimited() {
        let store = Store::new();
        let mut inner = store.write().await;
        let coffee = inner.insert_menu_item(draft("Coffee", Category::Drinks, Stock::Unlimited));

        reserve(&mut inner, &[line(coffee.id, 50)]).unwrap();
        assert_eq!(inner.menu_item(coffee.id).unwrap().stock, Stock::Unlimited);
    }

    #[tokio::test]
    async fn test_invalid_item_fails_whole_request() {
        let store = Store::new();
        let mut inner = store.write().await;
        let tea = inner.insert_menu_item(draft("Iced Tea", Category::Drinks, Stock::Finite(3)));

        let err = reserve(
            &mut inner,
            &[line(tea.id, 1), line(MenuItemId::new(999), 1)],
        )
        .unwrap_err();
        assert_eq!(err, ReservationError::InvalidItem(MenuItemId::new(999)));
        // All-or-nothing: the valid line must not have committed.
        assert_eq!(inner.menu_item(tea.id).unwrap().stock, Stock::Finite(3));
    }

    #[tokio::test]
    async fn test_out_of_stock_names_the_item_and_commits_nothing() {
        let store = Store::new();
        let mut inner = store.write().await;
        let tea = inner.insert_menu_item(draft("Iced Tea", Category::Drinks, Stock::Finite(3)));
        let samosa = inner.insert_menu_item(draft("Samosa", Category::Snacks, Stock::Finite(1)));

        let err = reserve(&mut inner, &[line(tea.id, 2), line(samosa.id, 2)]).unwrap_err();
        assert_eq!(err, ReservationError::OutOfStock("Samosa".to_owned()));
        assert_eq!(inner.menu_item(tea.id).unwrap().stock, Stock::Finite(3));
        assert_eq!(inner.menu_item(samosa.id).unwrap().stock, Stock::Finite(1));
    }

    #[tokio::test]
    async fn test_sold_out_item_rejected() {
        let store = Store::new();
        let mut inner = store.write().await;
        let tea = inner.insert_menu_item(draft("Iced Tea", Category::Drinks, Stock::Finite(0)));

        let err = reserve(&mut inner, &[line(tea.id, 1)]).unwrap_err();
        assert_eq!(err, ReservationError::OutOfStock("Iced Tea".to_owned()));
    }

    #[tokio::test]
    async fn test_non_positive_qty_clamped_to_one() {
        let store = Store::new();
        let mut inner = store.write().await;
        let tea = inner.insert_menu_item(draft("Iced Tea", Category::Drinks, Stock::Finite(3)));

        let reservation = reserve(&mut inner, &[line(tea.id, -4)]).unwrap();
        assert_eq!(reservation.lines[0].qty, 1);
        assert_eq!(inner.menu_item(tea.id).unwrap().stock, Stock::Finite(2));
    }

    #[tokio::test]
    async fn test_repeated_lines_share_one_counter() {
        let store = Store::new();
        let mut inner = store.write().await;
        let tea = inner.insert_menu_item(draft("Iced Tea", Category::Drinks, Stock::Finite(3)));

        // 2 + 2 exceeds the stock of 3 even though each line alone fits.
        let err = reserve(&mut inner, &[line(tea.id, 2), line(tea.id, 2)]).unwrap_err();
        assert_eq!(err, ReservationError::OutOfStock("Iced Tea".to_owned()));
        assert_eq!(inner.menu_item(tea.id).unwrap().stock, Stock::Finite(3));

        // 2 + 1 exactly drains it.
        reserve(&mut inner, &[line(tea.id, 2), line(tea.id, 1)]).unwrap();
        assert_eq!(inner.menu_item(tea.id).unwrap().stock, Stock::Finite(0));
    }

    #[tokio::test]
    async fn test_bottleneck_minutes_is_max_not_sum() {
        let store = Store::new();
        let mut inner = store.write().await;
        let mut slow = draft("Masala Dosa", Category::Lunch, Stock::Unlimited);
        slow.prep_time_minutes = 8;
        let slow = inner.insert_menu_item(slow);
        let fast = inner.insert_menu_item(draft("Iced Tea", Category::Drinks, Stock::Unlimited));

        let reservation = reserve(&mut inner, &[line(slow.id, 2), line(fast.id, 3)]).unwrap();
        // max(8*2, 5*3) = 16, not 16 + 15.
        assert_eq!(reservation.bottleneck_minutes, 16);
    }
}
