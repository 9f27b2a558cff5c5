//! Order and order line domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use mensa_core::{CustomerRef, MenuItemId, OrderId, OrderStatus, Price};

/// A single line of an order.
///
/// Name and price are snapshots taken at order time, not live joins:
/// later menu edits must not change what a placed order shows or costs.
#[derive(Debug, Clone)]
pub struct OrderLine {
    /// The menu item this line refers to.
    pub menu_item_id: MenuItemId,
    /// Item name at order time.
    pub name: String,
    /// Unit price at order time.
    pub price: Price,
    /// Quantity ordered (always >= 1).
    pub qty: u32,
}

impl OrderLine {
    /// The line total (`price * qty`).
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.price.times(self.qty)
    }
}

/// A placed order.
///
/// Invariants maintained by the order service:
/// - `total` is computed at creation and never recomputed.
/// - `status` only moves along the state machine in
///   [`OrderStatus::can_transition_to`].
/// - `cancelled_at` and `collected_at` are mutually exclusive, each set at
///   most once, exactly on entry to the corresponding terminal state.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Who the order belongs to; rewritten once if a guest migrates.
    pub customer: CustomerRef,
    /// Display name snapshot taken when the order was placed.
    pub customer_name: String,
    /// Ordered lines, owned by value.
    pub lines: Vec<OrderLine>,
    /// Sum of line totals, fixed at creation.
    pub total: Decimal,
    /// Current lifecycle status.
    pub status: OrderStatus,
    /// Canonical order event time.
    pub placed_at: DateTime<Utc>,
    /// Derived readiness estimate (bottleneck line, floor 5 minutes).
    pub estimated_ready_at: DateTime<Utc>,
    /// Set exactly once, on entry to `Cancelled`.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// Set exactly once, on entry to `Collected`.
    pub collected_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            menu_item_id: MenuItemId::new(1),
            name: "Bagel".to_owned(),
            price: Price::new(Decimal::new(225, 2)).expect("non-negative"),
            qty: 4,
        };
        assert_eq!(line.total(), Decimal::new(900, 2));
    }
}
