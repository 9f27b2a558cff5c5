//! Order accessors over the store.

use chrono::{DateTime, Utc};

use mensa_core::{CustomerRef, OrderId, OrderStatus};

use super::StoreInner;
use crate::models::Order;

impl StoreInner {
    /// Look up an order by ID.
    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(&id)
    }

    pub(crate) fn order_mut(&mut self, id: OrderId) -> Option<&mut Order> {
        self.orders.get_mut(&id)
    }

    /// Insert a fully-built order.
    pub fn insert_order(&mut self, order: Order) {
        self.orders.insert(order.id, order);
    }

    /// Orders belonging to a customer reference, newest first.
    pub fn orders_by_customer(&self, customer: &CustomerRef) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| &order.customer == customer)
            .cloned()
            .collect();
        sort_newest_first(&mut orders);
        orders
    }

    /// Orders still moving through the kitchen, newest first, optionally
    /// narrowed to a single status.
    pub fn active_orders(&self, status: Option<OrderStatus>) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| match status {
                Some(wanted) => order.status == wanted,
                None => order.status.is_active(),
            })
            .cloned()
            .collect();
        sort_newest_first(&mut orders);
        orders
    }

    /// Non-cancelled orders placed inside a time window, for reporting.
    /// Windows anchor on `placed_at`, the canonical order event time.
    pub fn orders_placed_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|order| order.status != OrderStatus::Cancelled)
            .filter(|order| order.placed_at >= start && order.placed_at <= end)
            .cloned()
            .collect();
        sort_newest_first(&mut orders);
        orders
    }
}

fn sort_newest_first(orders: &mut [Order]) {
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at).then(b.id.cmp(&a.id)));
}
