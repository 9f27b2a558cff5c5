//! Order routes.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mensa_core::{CustomerRef, MenuItemId, OrderId, OrderStatus, Price};

use crate::error::{AppError, Result};
use crate::middleware::Requester;
use crate::models::{Order, OrderLine};
use crate::services::{LineRequest, OrderService};
use crate::state::AppState;

/// One line of an order placement request.
#[derive(Debug, Deserialize)]
pub struct LineItemRequest {
    pub menu_item_id: MenuItemId,
    /// Requested quantity; non-positive values are clamped to 1.
    pub qty: i64,
}

/// Body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    /// Display name for walk-up guests without identity headers.
    pub customer_name: Option<String>,
    pub items: Vec<LineItemRequest>,
}

/// Wire representation of an order line.
#[derive(Debug, Serialize)]
pub struct OrderLineResponse {
    pub menu_item_id: MenuItemId,
    pub name: String,
    pub price: Price,
    pub qty: u32,
    pub line_total: Decimal,
}

impl From<OrderLine> for OrderLineResponse {
    fn from(line: OrderLine) -> Self {
        let line_total = line.total();
        Self {
            menu_item_id: line.menu_item_id,
            name: line.name,
            price: line.price,
            qty: line.qty,
            line_total,
        }
    }
}

/// Wire representation of an order.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub customer: CustomerRef,
    pub customer_name: String,
    pub lines: Vec<OrderLineResponse>,
    pub total: Decimal,
    pub status: OrderStatus,
    pub placed_at: DateTime<Utc>,
    pub estimated_ready_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
    pub collected_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            customer: order.customer,
            customer_name: order.customer_name,
            lines: order.lines.into_iter().map(OrderLineResponse::from).collect(),
            total: order.total,
            status: order.status,
            placed_at: order.placed_at,
            estimated_ready_at: order.estimated_ready_at,
            cancelled_at: order.cancelled_at,
            collected_at: order.collected_at,
        }
    }
}

/// POST /orders
///
/// The caller's identity headers win over the body name; a request with
/// neither is rejected.
///
/// # Errors
///
/// 400 for empty orders, unknown items, insufficient stock, or a caller
/// with no identity at all.
pub async fn create(
    State(state): State<AppState>,
    requester: Requester,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>)> {
    let customer = requester
        .customer_ref()
        .or_else(|| body.customer_name.clone().map(CustomerRef::Guest))
        .ok_or_else(|| AppError::BadRequest("customer identity required".to_owned()))?;
    // Display name: explicit name wins; an account caller without one gets
    // their stored username, or blank if the account is unknown here.
    let customer_name = match requester.customer_name.clone().or(body.customer_name) {
        Some(name) => name,
        None => match customer {
            CustomerRef::Account(id) => state
                .store()
                .read()
                .await
                .account(id)
                .map(|account| account.username.clone())
                .unwrap_or_default(),
            CustomerRef::Guest(ref name) => name.clone(),
        },
    };

    let requests: Vec<LineRequest> = body
        .items
        .iter()
        .map(|item| LineRequest {
            menu_item_id: item.menu_item_id,
            qty: item.qty,
        })
        .collect();

    let order = OrderService::new(state.store())
        .create(customer, customer_name, &requests)
        .await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /orders/{id}
///
/// # Errors
///
/// 404 if the order does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let order = OrderService::new(state.store()).get(id).await?;
    Ok(Json(order.into()))
}

/// POST /orders/{id}/cancel
///
/// # Errors
///
/// 404 if the order does not exist, 400 once preparation has begun.
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>> {
    let order = OrderService::new(state.store()).cancel(id).await?;
    Ok(Json(order.into()))
}

/// Query parameters for order history listings.
#[derive(Debug, Deserialize, Default)]
pub struct OrderHistoryQuery {
    /// Guest name to list for, when no identity headers are present.
    pub customer_name: Option<String>,
}

/// GET /orders
///
/// # Errors
///
/// 400 if no customer identity can be derived from headers or query.
pub async fn index(
    State(state): State<AppState>,
    requester: Requester,
    Query(query): Query<OrderHistoryQuery>,
) -> Result<Json<Vec<OrderResponse>>> {
    let customer = requester
        .customer_ref()
        .or_else(|| query.customer_name.map(CustomerRef::Guest))
        .ok_or_else(|| AppError::BadRequest("customer identity required".to_owned()))?;

    let orders = OrderService::new(state.store())
        .list_by_customer(&customer)
        .await;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}
