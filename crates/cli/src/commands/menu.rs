//! List the menu of a running server.

use serde::Deserialize;
use tracing::info;

use mensa_core::{Category, MenuItemId, Price, Stock};

/// The subset of the menu item wire format the listing shows.
#[derive(Debug, Deserialize)]
pub struct MenuItemRow {
    pub id: MenuItemId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub is_special: bool,
    pub stock: Stock,
    pub is_out_of_stock: bool,
}

/// List menu items, optionally narrowed to one category.
///
/// # Errors
///
/// Returns an error if the server is unreachable or responds with an
/// error status.
pub async fn list(server: &str, category: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let mut request = client.get(format!("{server}/menu"));
    if let Some(category) = category {
        request = request.query(&[("category", category)]);
    }

    let items: Vec<MenuItemRow> = request.send().await?.error_for_status()?.json().await?;

    info!("Menu ({} items)", items.len());
    for item in &items {
        let special = if item.is_special { " *special*" } else { "" };
        let availability = if item.is_out_of_stock {
            "SOLD OUT".to_owned()
        } else {
            item.stock.to_string()
        };
        info!(
            "  [{}] {} - {} ({}, stock: {}){}",
            item.id, item.name, item.price, item.category, availability, special
        );
    }

    Ok(())
}
