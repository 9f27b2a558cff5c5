//! Public menu routes.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mensa_core::{Category, MenuItemId, Price, Stock};

use crate::error::Result;
use crate::models::MenuItem;
use crate::services::CatalogService;
use crate::state::AppState;
use crate::store::catalog::MenuFilter;

/// Wire representation of a menu item.
///
/// `is_out_of_stock` is derived from the stock counter at serialization
/// time; clients must not treat it as independent state.
#[derive(Debug, Serialize)]
pub struct MenuItemResponse {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub category: Category,
    pub is_special: bool,
    pub stock: Stock,
    pub is_out_of_stock: bool,
    pub prep_time_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MenuItem> for MenuItemResponse {
    fn from(item: MenuItem) -> Self {
        let is_out_of_stock = item.is_out_of_stock();
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            image_url: item.image_url,
            category: item.category,
            is_special: item.is_special,
            stock: item.stock,
            is_out_of_stock,
            prep_time_minutes: item.prep_time_minutes,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Query parameters for menu listings.
#[derive(Debug, Deserialize, Default)]
pub struct MenuQuery {
    pub category: Option<Category>,
    pub search: Option<String>,
    #[serde(default)]
    pub specials: bool,
}

/// GET /menu
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<MenuQuery>,
) -> Json<Vec<MenuItemResponse>> {
    let filter = MenuFilter {
        category: query.category,
        search: query.search,
        specials_only: query.specials,
    };
    let items = CatalogService::new(state.store()).list(&filter).await;
    Json(items.into_iter().map(MenuItemResponse::from).collect())
}

/// GET /menu/{id}
///
/// # Errors
///
/// 404 if the item does not exist.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<MenuItemId>,
) -> Result<Json<MenuItemResponse>> {
    let item = CatalogService::new(state.store()).get(id).await?;
    Ok(Json(item.into()))
}
