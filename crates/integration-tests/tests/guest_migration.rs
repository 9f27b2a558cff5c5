//! Guest session and account migration tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::{Value, json};

use mensa_integration_tests::TestApp;

async fn create_guest(app: &TestApp, name: &str) -> String {
    let (status, body) = app
        .post("/guests", &json!({ "customer_name": name }))
        .await;
    assert_eq!(status, StatusCode::OK);
    body["guest_id"].as_str().unwrap().to_owned()
}

/// Place an order under the guest's name and track it in the session.
async fn order_and_track(app: &TestApp, guest_id: &str, name: &str) -> Value {
    let (status, order) = app
        .post(
            "/orders",
            &json!({
                "customer_name": name,
                "items": [{ "menu_item_id": app.menu.dosa, "qty": 1 }],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, guest) = app
        .post(
            &format!("/guests/{guest_id}/track-order"),
            &json!({ "order_id": order["id"] }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    guest
}

#[tokio::test]
async fn test_get_or_create_assigns_id_and_is_idempotent() {
    let app = TestApp::new();
    let (status, first) = app.post("/guests", &json!({ "customer_name": "Sam" })).await;
    assert_eq!(status, StatusCode::OK);
    let guest_id = first["guest_id"].as_str().unwrap();
    assert!(guest_id.starts_with("guest-"));

    let (_, second) = app
        .post("/guests", &json!({ "guest_id": guest_id, "customer_name": "Other" }))
        .await;
    // Existing sessions keep their profile.
    assert_eq!(second["customer_name"], "Sam");
}

#[tokio::test]
async fn test_preferences_update() {
    let app = TestApp::seeded().await;
    let guest_id = create_guest(&app, "Sam").await;

    let (status, guest) = app
        .put_with(
            &format!("/guests/{guest_id}/preferences"),
            &[],
            &json!({
                "email": "sam@example.com",
                "favorite_items": [app.menu.dosa, app.menu.samosa],
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(guest["email"], "sam@example.com");
    assert_eq!(guest["favorite_items"].as_array().unwrap().len(), 2);

    let (status, body) = app
        .put_with(
            &format!("/guests/{guest_id}/preferences"),
            &[],
            &json!({ "email": "not-an-email" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "got: {body}");
}

#[tokio::test]
async fn test_upgrade_prompt_after_second_order() {
    let app = TestApp::seeded().await;
    let guest_id = create_guest(&app, "Sam").await;

    let guest = order_and_track(&app, &guest_id, "Sam").await;
    assert_eq!(guest["show_upgrade_prompt"], false);
    assert_eq!(guest["total_orders"], 1);

    let guest = order_and_track(&app, &guest_id, "Sam").await;
    assert_eq!(guest["show_upgrade_prompt"], true);
    assert_eq!(guest["total_orders"], 2);
    assert_eq!(guest["total_spent"], "7.00");
    assert_eq!(guest["avg_order_value"], "3.50");
}

#[tokio::test]
async fn test_dismissed_prompt_never_returns() {
    let app = TestApp::seeded().await;
    let guest_id = create_guest(&app, "Sam").await;
    order_and_track(&app, &guest_id, "Sam").await;
    order_and_track(&app, &guest_id, "Sam").await;

    let (status, guest) = app
        .post_empty(&format!("/guests/{guest_id}/prompt-dismissed"))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(guest["show_upgrade_prompt"], false);
}

#[tokio::test]
async fn test_prompt_suppressed_after_three_impressions() {
    let app = TestApp::seeded().await;
    let guest_id = create_guest(&app, "Sam").await;
    order_and_track(&app, &guest_id, "Sam").await;
    order_and_track(&app, &guest_id, "Sam").await;

    let mut last = Value::Null;
    for _ in 0..3 {
        let (_, guest) = app
            .post_empty(&format!("/guests/{guest_id}/prompt-shown"))
            .await;
        last = guest;
    }
    assert_eq!(last["show_upgrade_prompt"], false);
}

#[tokio::test]
async fn test_upgrade_migrates_orders_and_destroys_session() {
    let app = TestApp::seeded().await;
    let guest_id = create_guest(&app, "Sam").await;
    order_and_track(&app, &guest_id, "Sam").await;
    order_and_track(&app, &guest_id, "Sam").await;

    let (status, account) = app
        .post(
            &format!("/guests/{guest_id}/upgrade"),
            &json!({ "email": "sam@example.com", "password": "correct horse battery" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "got: {account}");
    assert_eq!(account["username"], "Sam");
    assert_eq!(account["role"], "customer");
    assert_eq!(account["orders_as_guest"], 2);
    assert_eq!(account["spent_as_guest"], "7.00");
    assert_eq!(account["migrated_orders"], 2);

    // Orders now belong to the account.
    let account_id = account["id"].as_i64().unwrap().to_string();
    let (_, orders) = app
        .get_with("/orders", &[("x-account-id", account_id.as_str())])
        .await;
    assert_eq!(orders.as_array().unwrap().len(), 2);

    // A fresh order under the bare account identity picks up the stored
    // username as its display name.
    let (status, order) = app
        .post_with(
            "/orders",
            &[("x-account-id", account_id.as_str())],
            &json!({ "items": [{ "menu_item_id": app.menu.dosa, "qty": 1 }] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["customer_name"], "Sam");

    // The session is gone; repeating the migration cannot duplicate it.
    let (status, _) = app
        .post(
            &format!("/guests/{guest_id}/upgrade"),
            &json!({ "email": "sam2@example.com", "password": "correct horse battery" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_upgrade_rejects_duplicate_email() {
    let app = TestApp::seeded().await;
    let first = create_guest(&app, "Sam").await;
    let second = create_guest(&app, "Alex").await;

    let (status, _) = app
        .post(
            &format!("/guests/{first}/upgrade"),
            &json!({ "email": "taken@example.com", "password": "correct horse battery" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            &format!("/guests/{second}/upgrade"),
            &json!({ "email": "taken@example.com", "password": "correct horse battery" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "account already exists with this email");

    // The rejected session survives for a retry.
    let (status, _) = app
        .post("/guests", &json!({ "guest_id": second }))
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_upgrade_rejects_weak_password_and_bad_email() {
    let app = TestApp::seeded().await;
    let guest_id = create_guest(&app, "Sam").await;

    let (status, _) = app
        .post(
            &format!("/guests/{guest_id}/upgrade"),
            &json!({ "email": "sam@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            &format!("/guests/{guest_id}/upgrade"),
            &json!({ "email": "nope", "password": "correct horse battery" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_track_order_for_unknown_guest() {
    let app = TestApp::seeded().await;
    let (status, _) = app
        .post("/guests/guest-missing/track-order", &json!({ "order_id": 1 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
