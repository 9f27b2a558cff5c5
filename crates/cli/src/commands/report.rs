//! Fetch the daily sales report from a running server.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct ItemSalesRow {
    pub name: String,
    pub qty: u32,
}

#[derive(Debug, Deserialize)]
pub struct DailyReportRow {
    pub date: chrono::NaiveDate,
    pub total_orders: usize,
    pub revenue: Decimal,
    pub top_selling: Vec<ItemSalesRow>,
}

/// Show today's sales report.
///
/// # Errors
///
/// Returns an error if the server is unreachable or responds with an
/// error status.
pub async fn daily(server: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let report: DailyReportRow = client
        .get(format!("{server}/admin/reports/daily"))
        .header("x-role", "staff")
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    info!("Daily report for {}", report.date);
    info!("  Orders: {}", report.total_orders);
    info!("  Revenue: {}", report.revenue);
    info!("  Top selling:");
    for item in &report.top_selling {
        info!("    {} x{}", item.name, item.qty);
    }

    Ok(())
}
