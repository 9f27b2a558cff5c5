//! Admin surface tests: role gates, menu management, kitchen queue,
//! and the daily report.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use mensa_integration_tests::TestApp;

const STAFF: &[(&str, &str)] = &[("x-role", "staff")];
const ADMIN: &[(&str, &str)] = &[("x-role", "admin")];

#[tokio::test]
async fn test_menu_management_requires_admin_role() {
    let app = TestApp::seeded().await;
    let body = json!({ "name": "Poha", "price": "1.75", "category": "Breakfast" });

    let (status, _) = app.post_with("/admin/menu", &[], &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Staff can work the queue but not the menu.
    let (status, _) = app.post_with("/admin/menu", STAFF, &body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app.post_with("/admin/menu", ADMIN, &body).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Poha");
    // Stock defaults to unlimited.
    assert_eq!(created["stock"], -1);
    assert_eq!(created["prep_time_minutes"], 5);
}

#[tokio::test]
async fn test_update_and_delete_menu_item() {
    let app = TestApp::seeded().await;
    let uri = format!("/admin/menu/{}", app.menu.samosa);

    let (status, updated) = app
        .put_with(&uri, ADMIN, &json!({ "price": "1.25", "description": "Extra crispy" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], "1.25");
    assert_eq!(updated["description"], "Extra crispy");
    // Untouched fields survive the partial update.
    assert_eq!(updated["name"], "Samosa");

    let (status, _) = app.delete_with(&uri, ADMIN).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.delete_with(&uri, ADMIN).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_stock_adjustment() {
    let app = TestApp::seeded().await;
    let uri = format!("/admin/menu/{}/stock", app.menu.iced_tea);

    let (status, item) = app.post_with(&uri, ADMIN, &json!({ "delta": 10 })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["stock"], 13);

    // Underflow is refused and changes nothing.
    let (status, body) = app.post_with(&uri, ADMIN, &json!({ "delta": -20 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "got: {body}");
    let (_, item) = app.get(&format!("/menu/{}", app.menu.iced_tea)).await;
    assert_eq!(item["stock"], 13);

    // Unlimited items have no counter to adjust.
    let (status, _) = app
        .post_with(
            &format!("/admin/menu/{}/stock", app.menu.dosa),
            ADMIN,
            &json!({ "delta": 5 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_active_orders_listing() {
    let app = TestApp::seeded().await;

    for name in ["A", "B"] {
        let (status, _) = app
            .post(
                "/orders",
                &json!({
                    "customer_name": name,
                    "items": [{ "menu_item_id": app.menu.dosa, "qty": 1 }],
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get_with("/admin/orders/active", STAFF).await;
    assert_eq!(status, StatusCode::OK);
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 2);

    // Move one along and filter by status.
    let id = orders[0]["id"].as_i64().unwrap();
    app.patch_with(
        &format!("/admin/orders/{id}/status"),
        STAFF,
        &json!({ "status": "Preparing" }),
    )
    .await;

    let (_, preparing) = app
        .get_with("/admin/orders/active?status=Preparing", STAFF)
        .await;
    assert_eq!(preparing.as_array().unwrap().len(), 1);
    assert_eq!(preparing.as_array().unwrap()[0]["id"], id);

    let (status, _) = app.get_with("/admin/orders/active", &[]).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_daily_report_excludes_cancelled_orders() {
    let app = TestApp::seeded().await;

    let (_, kept) = app
        .post(
            "/orders",
            &json!({
                "customer_name": "A",
                "items": [{ "menu_item_id": app.menu.dosa, "qty": 3 }],
            }),
        )
        .await;
    assert_eq!(kept["total"], "10.50");

    let (_, cancelled) = app
        .post(
            "/orders",
            &json!({
                "customer_name": "B",
                "items": [{ "menu_item_id": app.menu.samosa, "qty": 1 }],
            }),
        )
        .await;
    let cancelled_id = cancelled["id"].as_i64().unwrap();
    app.post_empty(&format!("/orders/{cancelled_id}/cancel")).await;

    let (status, report) = app.get_with("/admin/reports/daily", STAFF).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_orders"], 1);
    assert_eq!(report["revenue"], "10.50");
    assert_eq!(report["top_selling"][0]["name"], "Masala Dosa");
    assert_eq!(report["top_selling"][0]["qty"], 3);
}

#[tokio::test]
async fn test_unknown_status_string_gets_json_error() {
    let app = TestApp::seeded().await;
    let (_, order) = app
        .post(
            "/orders",
            &json!({
                "customer_name": "Sam",
                "items": [{ "menu_item_id": app.menu.dosa, "qty": 1 }],
            }),
        )
        .await;
    let id = order["id"].as_i64().unwrap();

    let (status, body) = app
        .patch_with(
            &format!("/admin/orders/{id}/status"),
            STAFF,
            &json!({ "status": "Done" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid order status: Done");

    // The order is untouched.
    let (_, body) = app.get(&format!("/orders/{id}")).await;
    assert_eq!(body["status"], "Pending");
}

#[tokio::test]
async fn test_sales_report_over_date_range() {
    let app = TestApp::seeded().await;

    app.post(
        "/orders",
        &json!({
            "customer_name": "A",
            "items": [{ "menu_item_id": app.menu.dosa, "qty": 2 }],
        }),
    )
    .await;
    app.post(
        "/orders",
        &json!({
            "customer_name": "B",
            "items": [{ "menu_item_id": app.menu.samosa, "qty": 1 }],
        }),
    )
    .await;

    let today = Utc::now().date_naive();
    let start = today - Duration::days(6);
    let uri = format!("/admin/reports/sales?start={start}&end={today}");

    let (status, report) = app.get_with(&uri, STAFF).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_orders"], 2);
    // 2 * 3.50 + 1 * 1.00
    assert_eq!(report["revenue"], "8.00");
    assert_eq!(report["start"], start.to_string());
    assert_eq!(report["end"], today.to_string());
    assert_eq!(report["top_selling"][0]["name"], "Masala Dosa");

    // A window that predates every order is empty.
    let before = today - Duration::days(30);
    let early = today - Duration::days(20);
    let (_, report) = app
        .get_with(&format!("/admin/reports/sales?start={before}&end={early}"), STAFF)
        .await;
    assert_eq!(report["total_orders"], 0);

    let (status, _) = app.get_with(&uri, &[]).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_sales_report_requires_both_bounds() {
    let app = TestApp::seeded().await;
    let today = Utc::now().date_naive();

    let (status, body) = app
        .get_with(&format!("/admin/reports/sales?start={today}"), STAFF)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "start and end dates are required");
}
