//! Order lifecycle service.
//!
//! Owns order creation (delegating stock reservation), the status state
//! machine with its transition timestamps, customer/active listings, and
//! the daily report.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use mensa_core::{CustomerRef, MenuItemId, OrderId, OrderStatus};

use super::reservation::{self, LineRequest, ReservationError};
use crate::models::Order;
use crate::store::Store;

/// Minimum readiness estimate, in minutes.
const ESTIMATE_FLOOR_MINUTES: u32 = 5;

/// How many top-selling items the daily report lists.
const TOP_SELLING_LIMIT: usize = 5;

/// How many top-selling items the date-range sales report lists.
const SALES_TOP_SELLING_LIMIT: usize = 10;

/// Errors that can occur during order operations.
///
/// All variants are expected, recoverable-by-caller conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// No line items were submitted.
    #[error("no items in order")]
    EmptyOrder,

    /// A line references a menu item that does not exist.
    #[error("invalid menu item: {0}")]
    InvalidItem(MenuItemId),

    /// An item is sold out or under-stocked; carries its display name.
    #[error("item out of stock: {0}")]
    OutOfStock(String),

    /// Referenced order does not exist.
    #[error("order not found")]
    NotFound,

    /// The requested status change is not reachable from the current
    /// status.
    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: OrderStatus,
        to: OrderStatus,
    },
}

impl From<ReservationError> for OrderError {
    fn from(err: ReservationError) -> Self {
        match err {
            ReservationError::InvalidItem(id) => Self::InvalidItem(id),
            ReservationError::OutOfStock(name) => Self::OutOfStock(name),
        }
    }
}

/// Sales count for one item in the daily report.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ItemSales {
    /// Item name as snapshotted on order lines.
    pub name: String,
    /// Units sold.
    pub qty: u32,
}

/// Aggregates for one day of non-cancelled orders, windowed on
/// `placed_at`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct DailyReport {
    /// The UTC date the report covers.
    pub date: chrono::NaiveDate,
    /// Number of non-cancelled orders placed.
    pub total_orders: usize,
    /// Revenue across those orders.
    pub revenue: Decimal,
    /// Best sellers by unit count, descending.
    pub top_selling: Vec<ItemSales>,
}

/// Aggregates for an inclusive date range of non-cancelled orders,
/// windowed on `placed_at`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SalesReport {
    /// First UTC date of the window.
    pub start: chrono::NaiveDate,
    /// Last UTC date of the window, inclusive.
    pub end: chrono::NaiveDate,
    /// Number of non-cancelled orders placed.
    pub total_orders: usize,
    /// Revenue across those orders.
    pub revenue: Decimal,
    /// Best sellers by unit count, descending.
    pub top_selling: Vec<ItemSales>,
}

/// Order lifecycle service.
pub struct OrderService<'a> {
    store: &'a Store,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Place an order: validate and reserve stock, snapshot lines, compute
    /// the readiness estimate, and persist in `Pending`.
    ///
    /// The reservation and the order insert happen under one write guard;
    /// either everything commits or nothing does.
    ///
    /// # Errors
    ///
    /// [`OrderError::EmptyOrder`] for an empty line list,
    /// [`OrderError::InvalidItem`] / [`OrderError::OutOfStock`] from the
    /// reservation engine.
    pub async fn create(
        &self,
        customer: CustomerRef,
        customer_name: String,
        requests: &[LineRequest],
    ) -> Result<Order, OrderError> {
        if requests.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let mut inner = self.store.write().await;
        let reservation = reservation::reserve(&mut inner, requests)?;

        let total: Decimal = reservation.lines.iter().map(crate::models::OrderLine::total).sum();
        let placed_at = Utc::now();
        let estimate_minutes = reservation.bottleneck_minutes.max(ESTIMATE_FLOOR_MINUTES);
        let estimated_ready_at = placed_at + Duration::minutes(i64::from(estimate_minutes));

        let order = Order {
            id: inner.next_order_id(),
            customer,
            customer_name,
            lines: reservation.lines,
            total,
            status: OrderStatus::Pending,
            placed_at,
            estimated_ready_at,
            cancelled_at: None,
            collected_at: None,
        };
        inner.insert_order(order.clone());

        info!(
            order_id = %order.id,
            customer = %order.customer,
            total = %order.total,
            "order placed"
        );
        Ok(order)
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::NotFound`] if the order does not exist.
    pub async fn get(&self, id: OrderId) -> Result<Order, OrderError> {
        self.store
            .read()
            .await
            .order(id)
            .cloned()
            .ok_or(OrderError::NotFound)
    }

    /// Drive an order to a new status, if the state machine permits it.
    ///
    /// Entering `Collected` stamps `collected_at`; entering `Cancelled`
    /// stamps `cancelled_at`; no other status sets a timestamp. The check
    /// and the write share one guard, so two racing transitions from the
    /// same state have at most one winner.
    ///
    /// # Errors
    ///
    /// [`OrderError::NotFound`] if the order does not exist,
    /// [`OrderError::InvalidTransition`] for an illegal edge.
    pub async fn transition(
        &self,
        id: OrderId,
        new_status: OrderStatus,
    ) -> Result<Order, OrderError> {
        let mut inner = self.store.write().await;
        let order = inner.order_mut(id).ok_or(OrderError::NotFound)?;

        let from = order.status;
        if !from.can_transition_to(new_status) {
            return Err(OrderError::InvalidTransition {
                from,
                to: new_status,
            });
        }

        order.status = new_status;
        match new_status {
            OrderStatus::Collected => order.collected_at = Some(Utc::now()),
            OrderStatus::Cancelled => order.cancelled_at = Some(Utc::now()),
            OrderStatus::Pending | OrderStatus::Preparing | OrderStatus::Ready => {}
        }

        info!(order_id = %id, %from, to = %new_status, "order status changed");
        Ok(order.clone())
    }

    /// Self-service cancellation: permitted only while the order is still
    /// at the front of the queue (`Pending`). Staff force-cancellation of
    /// a `Preparing` order goes through [`Self::transition`] instead.
    ///
    /// # Errors
    ///
    /// [`OrderError::NotFound`] if the order does not exist,
    /// [`OrderError::InvalidTransition`] once preparation has begun.
    pub async fn cancel(&self, id: OrderId) -> Result<Order, OrderError> {
        let mut inner = self.store.write().await;
        let order = inner.order_mut(id).ok_or(OrderError::NotFound)?;

        if order.status != OrderStatus::Pending {
            return Err(OrderError::InvalidTransition {
                from: order.status,
                to: OrderStatus::Cancelled,
            });
        }

        order.status = OrderStatus::Cancelled;
        order.cancelled_at = Some(Utc::now());

        info!(order_id = %id, "order cancelled by customer");
        Ok(order.clone())
    }

    /// Orders belonging to a customer, newest first.
    pub async fn list_by_customer(&self, customer: &CustomerRef) -> Vec<Order> {
        self.store.read().await.orders_by_customer(customer)
    }

    /// Orders still in the kitchen queue, newest first, optionally
    /// narrowed to one status.
    pub async fn list_active(&self, status: Option<OrderStatus>) -> Vec<Order> {
        self.store.read().await.active_orders(status)
    }

    /// Aggregate the given day's non-cancelled orders into a report.
    pub async fn daily_report(&self, day: DateTime<Utc>) -> DailyReport {
        let date = day.date_naive();
        let start = date.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let end = start + Duration::days(1) - Duration::nanoseconds(1);

        let orders = self.store.read().await.orders_placed_between(start, end);
        let (revenue, top_selling) = tally(&orders, TOP_SELLING_LIMIT);

        DailyReport {
            date,
            total_orders: orders.len(),
            revenue,
            top_selling,
        }
    }

    /// Aggregate an inclusive date range of non-cancelled orders into a
    /// sales report. Both bounds are whole UTC days.
    pub async fn sales_report(
        &self,
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    ) -> SalesReport {
        let from = start.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc();
        let to = end.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc() + Duration::days(1)
            - Duration::nanoseconds(1);

        let orders = self.store.read().await.orders_placed_between(from, to);
        let (revenue, top_selling) = tally(&orders, SALES_TOP_SELLING_LIMIT);

        SalesReport {
            start,
            end,
            total_orders: orders.len(),
            revenue,
            top_selling,
        }
    }
}

/// Revenue and best sellers across a set of orders.
fn tally(orders: &[Order], top_limit: usize) -> (Decimal, Vec<ItemSales>) {
    let revenue: Decimal = orders.iter().map(|order| order.total).sum();

    let mut counts: std::collections::HashMap<String, u32> = std::collections::HashMap::new();
    for order in orders {
        for line in &order.lines {
            *counts.entry(line.name.clone()).or_insert(0) += line.qty;
        }
    }
    let mut top_selling: Vec<ItemSales> = counts
        .into_iter()
        .map(|(name, qty)| ItemSales { name, qty })
        .collect();
    top_selling.sort_by(|a, b| b.qty.cmp(&a.qty).then(a.name.cmp(&b.name)));
    top_selling.truncate(top_limit);

    (revenue, top_selling)
}
