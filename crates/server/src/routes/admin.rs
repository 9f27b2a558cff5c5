//! Admin routes.
//!
//! Staff-role callers may work the kitchen queue and read reports; menu
//! management needs the admin role.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use mensa_core::{Category, MenuItemId, OrderId, OrderStatus, Price, Stock};

use super::menu::MenuItemResponse;
use super::orders::OrderResponse;
use crate::error::{AppError, Result};
use crate::middleware::{RequireAdmin, RequireStaff};
use crate::services::catalog::MenuItemUpdate;
use crate::services::orders::{DailyReport, SalesReport};
use crate::services::{CatalogService, OrderService};
use crate::state::AppState;
use crate::store::catalog::MenuItemDraft;

/// Query parameters for the kitchen queue listing.
#[derive(Debug, Deserialize, Default)]
pub struct ActiveOrdersQuery {
    pub status: Option<OrderStatus>,
}

/// GET /admin/orders/active
///
/// # Errors
///
/// 403 without a staff role.
pub async fn active_orders(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Query(query): Query<ActiveOrdersQuery>,
) -> Result<Json<Vec<OrderResponse>>> {
    let orders = OrderService::new(state.store())
        .list_active(query.status)
        .await;
    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

/// Body for `PATCH /admin/orders/{id}/status`.
///
/// The status arrives as a raw string so an unrecognized value gets the
/// same JSON error body as every other bad request instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PATCH /admin/orders/{id}/status
///
/// # Errors
///
/// 403 without a staff role, 404 for a missing order, 400 for an unknown
/// status or an illegal transition.
pub async fn update_status(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Path(id): Path<OrderId>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<OrderResponse>> {
    let status: OrderStatus = body.status.parse().map_err(AppError::BadRequest)?;
    let order = OrderService::new(state.store()).transition(id, status).await?;
    Ok(Json(order.into()))
}

/// Query parameters for the daily report.
#[derive(Debug, Deserialize, Default)]
pub struct DailyReportQuery {
    /// UTC day to report on; defaults to today.
    pub date: Option<DateTime<Utc>>,
}

/// GET /admin/reports/daily
///
/// # Errors
///
/// 403 without a staff role.
pub async fn daily_report(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Query(query): Query<DailyReportQuery>,
) -> Result<Json<DailyReport>> {
    let report = OrderService::new(state.store())
        .daily_report(query.date.unwrap_or_else(Utc::now))
        .await;
    Ok(Json(report))
}

/// Query parameters for the date-range sales report. Both bounds are
/// required, inclusive UTC dates.
#[derive(Debug, Deserialize, Default)]
pub struct SalesReportQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

/// GET /admin/reports/sales
///
/// # Errors
///
/// 403 without a staff role, 400 when either bound is missing.
pub async fn sales_report(
    State(state): State<AppState>,
    RequireStaff(_): RequireStaff,
    Query(query): Query<SalesReportQuery>,
) -> Result<Json<SalesReport>> {
    let (Some(start), Some(end)) = (query.start, query.end) else {
        return Err(AppError::BadRequest(
            "start and end dates are required".to_owned(),
        ));
    };

    let report = OrderService::new(state.store()).sales_report(start, end).await;
    Ok(Json(report))
}

/// Body for `POST /admin/menu`.
#[derive(Debug, Deserialize)]
pub struct CreateMenuItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub image_url: String,
    pub category: Category,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default)]
    pub stock: Option<Stock>,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
}

/// POST /admin/menu
///
/// # Errors
///
/// 403 without an admin role.
pub async fn create_menu_item(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Json(body): Json<CreateMenuItemRequest>,
) -> Result<(StatusCode, Json<MenuItemResponse>)> {
    let item = CatalogService::new(state.store())
        .create(MenuItemDraft {
            name: body.name,
            description: body.description,
            price: body.price,
            image_url: body.image_url,
            category: body.category,
            is_special: body.is_special,
            stock: body.stock.unwrap_or(Stock::Unlimited),
            prep_time_minutes: body
                .prep_time_minutes
                .unwrap_or(crate::models::DEFAULT_PREP_TIME_MINUTES),
        })
        .await;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Body for `PUT /admin/menu/{id}`. Absent fields are left unchanged.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub image_url: Option<String>,
    pub category: Option<Category>,
    pub is_special: Option<bool>,
    pub stock: Option<Stock>,
    pub prep_time_minutes: Option<u32>,
}

/// PUT /admin/menu/{id}
///
/// # Errors
///
/// 403 without an admin role, 404 for a missing item.
pub async fn update_menu_item(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MenuItemId>,
    Json(body): Json<UpdateMenuItemRequest>,
) -> Result<Json<MenuItemResponse>> {
    let item = CatalogService::new(state.store())
        .update(
            id,
            MenuItemUpdate {
                name: body.name,
                description: body.description,
                price: body.price,
                image_url: body.image_url,
                category: body.category,
                is_special: body.is_special,
                stock: body.stock,
                prep_time_minutes: body.prep_time_minutes,
            },
        )
        .await?;
    Ok(Json(item.into()))
}

/// DELETE /admin/menu/{id}
///
/// # Errors
///
/// 403 without an admin role, 404 for a missing item.
pub async fn delete_menu_item(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MenuItemId>,
) -> Result<StatusCode> {
    CatalogService::new(state.store()).delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Body for `POST /admin/menu/{id}/stock`.
#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    /// Signed delta; restocks are positive, corrections negative.
    pub delta: i64,
}

/// POST /admin/menu/{id}/stock
///
/// # Errors
///
/// 403 without an admin role, 404 for a missing item, 400 for underflow
/// or an unlimited item.
pub async fn adjust_stock(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MenuItemId>,
    Json(body): Json<AdjustStockRequest>,
) -> Result<Json<MenuItemResponse>> {
    let item = CatalogService::new(state.store())
        .adjust_stock(id, body.delta)
        .await?;
    Ok(Json(item.into()))
}
