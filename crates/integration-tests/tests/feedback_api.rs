//! Order feedback tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use mensa_integration_tests::TestApp;

async fn place(app: &TestApp, name: &str) -> i64 {
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
    order["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_leave_feedback_on_order() {
    let app = TestApp::seeded().await;
    let order_id = place(&app, "Sam").await;

    let (status, feedback) = app
        .post(
            "/feedback",
            &json!({ "order_id": order_id, "rating": 4, "comment": "Crispy dosa" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(feedback["order_id"], order_id);
    assert_eq!(feedback["rating"], 4);
    assert_eq!(feedback["comment"], "Crispy dosa");
    assert!(!feedback["created_at"].is_null());

    // Comment is optional and defaults to empty.
    let (status, feedback) = app
        .post("/feedback", &json!({ "order_id": order_id, "rating": 5 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(feedback["comment"], "");
}

#[tokio::test]
async fn test_rating_outside_scale_rejected() {
    let app = TestApp::seeded().await;
    let order_id = place(&app, "Sam").await;

    let (status, body) = app
        .post("/feedback", &json!({ "order_id": order_id, "rating": 6 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "rating must be between 1 and 5 (got 6)");
}

#[tokio::test]
async fn test_feedback_for_unknown_order_rejected() {
    let app = TestApp::seeded().await;
    let (status, body) = app
        .post("/feedback", &json!({ "order_id": 999, "rating": 3 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "order not found");
}

#[tokio::test]
async fn test_listing_filters_by_order_newest_first() {
    let app = TestApp::seeded().await;
    let first = place(&app, "Sam").await;
    let second = place(&app, "Alex").await;

    app.post("/feedback", &json!({ "order_id": first, "rating": 2 })).await;
    app.post("/feedback", &json!({ "order_id": second, "rating": 5 })).await;
    app.post("/feedback", &json!({ "order_id": first, "rating": 4 })).await;

    let (status, body) = app.get("/feedback").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (status, body) = app.get(&format!("/feedback?order_id={first}")).await;
    assert_eq!(status, StatusCode::OK);
    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(
        entries.iter().map(|f| f["rating"].as_i64().unwrap()).collect::<Vec<_>>(),
        vec![4, 2]
    );
}
