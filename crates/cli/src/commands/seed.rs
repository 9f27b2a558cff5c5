//! Seed a running server's menu from a YAML file.
//!
//! The file holds a list of menu items:
//!
//! ```yaml
//! - name: Iced Tea
//!   price: "1.50"
//!   category: Drinks
//!   stock: 30
//! - name: Masala Dosa
//!   price: "3.50"
//!   category: Lunch
//!   is_special: true
//!   prep_time_minutes: 12
//! ```
//!
//! A missing `stock` means unlimited (`-1` on the wire).

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use mensa_core::{Category, Price, Stock};

/// One menu item as written in the seed file.
#[derive(Debug, Deserialize, Serialize)]
pub struct SeedItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub image_url: String,
    pub category: Category,
    #[serde(default)]
    pub is_special: bool,
    #[serde(default = "unlimited")]
    pub stock: Stock,
    #[serde(default)]
    pub prep_time_minutes: Option<u32>,
}

const fn unlimited() -> Stock {
    Stock::Unlimited
}

/// Seed the menu from a YAML file.
///
/// Items are created one at a time; a failed item is reported and skipped
/// so the rest of the file still loads.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// server is unreachable.
pub async fn menu_from_file(server: &str, file_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading menu from file");

    let content = tokio::fs::read_to_string(path).await?;
    let items: Vec<SeedItem> = serde_yaml::from_str(&content)?;

    info!(items = items.len(), "Parsed menu file");

    let client = reqwest::Client::new();
    let mut created = 0usize;
    let mut failed = 0usize;

    for item in items {
        let name = item.name.clone();
        let response = client
            .post(format!("{server}/admin/menu"))
            .header("x-role", "admin")
            .json(&item)
            .send()
            .await?;

        if response.status().is_success() {
            created += 1;
            info!(%name, "Created");
        } else {
            failed += 1;
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(%name, %status, %body, "Failed to create");
        }
    }

    info!("Seeding complete!");
    info!("  Items created: {created}");
    if failed > 0 {
        error!("  Items failed: {failed}");
        return Err(format!("{failed} items failed to seed").into());
    }

    Ok(())
}
