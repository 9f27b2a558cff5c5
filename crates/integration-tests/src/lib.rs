//! Integration test harness for Mensa.
//!
//! Tests drive the full axum router in-process via `tower::ServiceExt`,
//! so they exercise routing, extractors, role gates, and JSON codecs
//! without binding a socket.
//!
//! ```rust,no_run
//! # use mensa_integration_tests::TestApp;
//! # async fn example() {
//! let app = TestApp::seeded().await;
//! let (status, body) = app.get("/menu").await;
//! assert_eq!(status, axum::http::StatusCode::OK);
//! assert!(body.is_array());
//! # }
//! ```

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use mensa_core::{MenuItemId, Price, Stock};
use mensa_server::config::MensaConfig;
use mensa_server::routes;
use mensa_server::state::AppState;
use mensa_server::store::catalog::MenuItemDraft;

/// Menu item IDs assigned by [`TestApp::seeded`], in insertion order.
#[derive(Debug, Clone, Copy)]
pub struct SeededMenu {
    /// "Iced Tea", finite stock of 3, 2 minute prep.
    pub iced_tea: MenuItemId,
    /// "Masala Dosa", unlimited, 12 minute prep.
    pub dosa: MenuItemId,
    /// "Samosa", finite stock of 10, 4 minute prep.
    pub samosa: MenuItemId,
}

/// An in-process application under test.
pub struct TestApp {
    router: Router,
    state: AppState,
    /// IDs of the pre-seeded menu; only meaningful after [`TestApp::seeded`].
    pub menu: SeededMenu,
}

fn draft(
    name: &str,
    category: mensa_core::Category,
    price_cents: i64,
    stock: Stock,
    prep: u32,
) -> MenuItemDraft {
    MenuItemDraft {
        name: name.to_owned(),
        description: String::new(),
        price: Price::new(rust_decimal::Decimal::new(price_cents, 2))
            .expect("seed prices are non-negative"),
        image_url: String::new(),
        category,
        is_special: false,
        stock,
        prep_time_minutes: prep,
    }
}

impl TestApp {
    /// Build an app over an empty store.
    #[must_use]
    pub fn new() -> Self {
        let state = AppState::new(MensaConfig::default());
        Self {
            router: routes::app(state.clone()),
            state,
            menu: SeededMenu {
                iced_tea: MenuItemId::new(0),
                dosa: MenuItemId::new(0),
                samosa: MenuItemId::new(0),
            },
        }
    }

    /// Build an app with a small seeded menu.
    pub async fn seeded() -> Self {
        use mensa_core::Category;

        let mut app = Self::new();
        let mut inner = app.state.store().write().await;
        let iced_tea =
            inner.insert_menu_item(draft("Iced Tea", Category::Drinks, 150, Stock::Finite(3), 2));
        let dosa =
            inner.insert_menu_item(draft("Masala Dosa", Category::Lunch, 350, Stock::Unlimited, 12));
        let samosa =
            inner.insert_menu_item(draft("Samosa", Category::Snacks, 100, Stock::Finite(10), 4));
        drop(inner);

        app.menu = SeededMenu {
            iced_tea: iced_tea.id,
            dosa: dosa.id,
            samosa: samosa.id,
        };
        app
    }

    /// Direct access to the shared state, for assertions against the store.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Send a request and return the status plus the parsed JSON body
    /// (`Value::Null` for empty or non-JSON bodies).
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        headers: &[(&str, &str)],
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request must build");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("application/json"));
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body must collect")
            .to_bytes();
        let json = if bytes.is_empty() || !is_json {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response body must be JSON")
        };
        (status, json)
    }

    /// GET without headers.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, &[], None).await
    }

    /// GET with headers.
    pub async fn get_with(&self, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
        self.request(Method::GET, uri, headers, None).await
    }

    /// POST a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, &[], Some(body)).await
    }

    /// POST a JSON body with headers.
    pub async fn post_with(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> (StatusCode, Value) {
        self.request(Method::POST, uri, headers, Some(body)).await
    }

    /// POST with no body.
    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, &[], None).await
    }

    /// PUT a JSON body with headers.
    pub async fn put_with(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, headers, Some(body)).await
    }

    /// PATCH a JSON body with headers.
    pub async fn patch_with(
        &self,
        uri: &str,
        headers: &[(&str, &str)],
        body: &Value,
    ) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, headers, Some(body)).await
    }

    /// DELETE with headers.
    pub async fn delete_with(&self, uri: &str, headers: &[(&str, &str)]) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, headers, None).await
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
