//! Guest session routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mensa_core::{AccountId, AccountRole, GuestId, MenuItemId, OrderId};

use crate::error::Result;
use crate::models::{Account, GuestSession};
use crate::services::MigrationService;
use crate::services::migration::{GuestPreferences, NewCredentials};
use crate::state::AppState;

/// Wire representation of a guest session.
#[derive(Debug, Serialize)]
pub struct GuestResponse {
    pub guest_id: GuestId,
    pub customer_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite_items: Vec<MenuItemId>,
    pub order_history: Vec<OrderId>,
    pub total_orders: u32,
    pub total_spent: Decimal,
    pub avg_order_value: Decimal,
    /// Whether the client should offer the account-upgrade prompt now.
    pub show_upgrade_prompt: bool,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl From<GuestSession> for GuestResponse {
    fn from(guest: GuestSession) -> Self {
        let show_upgrade_prompt = guest.should_show_upgrade_prompt();
        Self {
            guest_id: guest.guest_id,
            customer_name: guest.customer_name,
            email: guest.email.map(|email| email.to_string()),
            phone: guest.phone,
            favorite_items: guest.favorite_items,
            order_history: guest.order_history,
            total_orders: guest.conversion.total_orders,
            total_spent: guest.conversion.total_spent,
            avg_order_value: guest.conversion.avg_order_value,
            show_upgrade_prompt,
            created_at: guest.created_at,
            last_active: guest.last_active,
        }
    }
}

/// Body for `POST /guests`.
#[derive(Debug, Deserialize, Default)]
pub struct GetOrCreateRequest {
    pub guest_id: Option<String>,
    pub customer_name: Option<String>,
}

/// POST /guests
pub async fn get_or_create(
    State(state): State<AppState>,
    Json(body): Json<GetOrCreateRequest>,
) -> Json<GuestResponse> {
    let guest = MigrationService::new(state.store())
        .get_or_create(body.guest_id.map(GuestId::new), body.customer_name)
        .await;
    Json(guest.into())
}

/// Body for `PUT /guests/{guest_id}/preferences`.
#[derive(Debug, Deserialize, Default)]
pub struct PreferencesRequest {
    pub customer_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub favorite_items: Option<Vec<MenuItemId>>,
}

/// PUT /guests/{guest_id}/preferences
///
/// # Errors
///
/// 404 if the session does not exist, 400 for a malformed email.
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
    Json(body): Json<PreferencesRequest>,
) -> Result<Json<GuestResponse>> {
    let guest = MigrationService::new(state.store())
        .update_preferences(
            &GuestId::new(guest_id),
            GuestPreferences {
                customer_name: body.customer_name,
                email: body.email,
                phone: body.phone,
                favorite_items: body.favorite_items,
            },
        )
        .await?;
    Ok(Json(guest.into()))
}

/// Body for `POST /guests/{guest_id}/track-order`.
#[derive(Debug, Deserialize)]
pub struct TrackOrderRequest {
    pub order_id: OrderId,
}

/// POST /guests/{guest_id}/track-order
///
/// # Errors
///
/// 404 if the session or order does not exist.
pub async fn track_order(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
    Json(body): Json<TrackOrderRequest>,
) -> Result<Json<GuestResponse>> {
    let guest = MigrationService::new(state.store())
        .track_order(&GuestId::new(guest_id), body.order_id)
        .await?;
    Ok(Json(guest.into()))
}

/// POST /guests/{guest_id}/prompt-shown
///
/// # Errors
///
/// 404 if the session does not exist.
pub async fn prompt_shown(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
) -> Result<Json<GuestResponse>> {
    let guest = MigrationService::new(state.store())
        .record_prompt_shown(&GuestId::new(guest_id))
        .await?;
    Ok(Json(guest.into()))
}

/// POST /guests/{guest_id}/prompt-dismissed
///
/// # Errors
///
/// 404 if the session does not exist.
pub async fn prompt_dismissed(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
) -> Result<Json<GuestResponse>> {
    let guest = MigrationService::new(state.store())
        .dismiss_prompt(&GuestId::new(guest_id))
        .await?;
    Ok(Json(guest.into()))
}

/// Body for `POST /guests/{guest_id}/upgrade`.
#[derive(Debug, Deserialize)]
pub struct UpgradeRequest {
    pub email: String,
    pub password: String,
    pub username: Option<String>,
}

/// Wire representation of a migrated account. The password hash stays
/// server-side.
#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub id: AccountId,
    pub username: String,
    pub email: String,
    pub role: AccountRole,
    pub phone: Option<String>,
    pub favorite_items: Vec<MenuItemId>,
    pub orders_as_guest: u32,
    pub spent_as_guest: Decimal,
    pub migrated_orders: usize,
    pub created_at: DateTime<Utc>,
}

impl AccountResponse {
    fn from_migration(account: Account, migrated_orders: usize) -> Self {
        let (orders_as_guest, spent_as_guest) = account
            .guest_migration
            .as_ref()
            .map_or((0, Decimal::ZERO), |migration| {
                (migration.orders_as_guest, migration.spent_as_guest)
            });
        Self {
            id: account.id,
            username: account.username,
            email: account.email.to_string(),
            role: account.role,
            phone: account.phone,
            favorite_items: account.favorite_items,
            orders_as_guest,
            spent_as_guest,
            migrated_orders,
            created_at: account.created_at,
        }
    }
}

/// POST /guests/{guest_id}/upgrade
///
/// # Errors
///
/// 404 if the session does not exist (including an already-migrated one),
/// 409 if the email is taken, 400 for credential validation failures.
pub async fn upgrade(
    State(state): State<AppState>,
    Path(guest_id): Path<String>,
    Json(body): Json<UpgradeRequest>,
) -> Result<(StatusCode, Json<AccountResponse>)> {
    let outcome = MigrationService::new(state.store())
        .migrate(
            &GuestId::new(guest_id),
            NewCredentials {
                email: body.email,
                password: body.password,
                username: body.username,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(AccountResponse::from_migration(
            outcome.account,
            outcome.migrated_orders,
        )),
    ))
}
