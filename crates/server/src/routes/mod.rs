//! HTTP route handlers for the canteen server.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                        - Health check
//!
//! # Menu (public)
//! GET    /menu                          - Menu listing (category/search/specials filters)
//! GET    /menu/{id}                     - Menu item detail
//!
//! # Orders
//! POST   /orders                        - Place an order
//! GET    /orders                        - Caller's order history
//! GET    /orders/{id}                   - Order detail
//! POST   /orders/{id}/cancel            - Self-service cancellation (Pending only)
//!
//! # Guest sessions
//! POST   /guests                        - Get or create a guest session
//! PUT    /guests/{guest_id}/preferences - Update guest profile
//! POST   /guests/{guest_id}/track-order - Record an order in the session
//! POST   /guests/{guest_id}/prompt-shown     - Record an upgrade prompt impression
//! POST   /guests/{guest_id}/prompt-dismissed - Dismiss the upgrade prompt for good
//! POST   /guests/{guest_id}/upgrade     - Migrate the session into an account
//!
//! # Feedback
//! POST   /feedback                      - Leave feedback on an order
//! GET    /feedback                      - List feedback (optional order_id filter)
//!
//! # Admin (role-gated via x-role header)
//! GET    /admin/orders/active           - Kitchen queue (staff)
//! PATCH  /admin/orders/{id}/status      - Drive an order's status (staff)
//! GET    /admin/reports/daily           - Daily sales report (staff)
//! GET    /admin/reports/sales           - Date-range sales report (staff)
//! POST   /admin/menu                    - Create a menu item (admin)
//! PUT    /admin/menu/{id}               - Update a menu item (admin)
//! DELETE /admin/menu/{id}               - Delete a menu item (admin)
//! POST   /admin/menu/{id}/stock         - Adjust finite stock by a delta (admin)
//! ```

pub mod admin;
pub mod feedback;
pub mod guests;
pub mod menu;
pub mod orders;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Create the public menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index))
        .route("/{id}", get(menu::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::create).get(orders::index))
        .route("/{id}", get(orders::show))
        .route("/{id}/cancel", post(orders::cancel))
}

/// Create the guest session routes router.
pub fn guest_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(guests::get_or_create))
        .route("/{guest_id}/preferences", put(guests::update_preferences))
        .route("/{guest_id}/track-order", post(guests::track_order))
        .route("/{guest_id}/prompt-shown", post(guests::prompt_shown))
        .route("/{guest_id}/prompt-dismissed", post(guests::prompt_dismissed))
        .route("/{guest_id}/upgrade", post(guests::upgrade))
}

/// Create the feedback routes router.
pub fn feedback_routes() -> Router<AppState> {
    Router::new().route("/", post(feedback::create).get(feedback::index))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    use axum::routing::patch;

    Router::new()
        .route("/orders/active", get(admin::active_orders))
        .route("/orders/{id}/status", patch(admin::update_status))
        .route("/reports/daily", get(admin::daily_report))
        .route("/reports/sales", get(admin::sales_report))
        .route("/menu", post(admin::create_menu_item))
        .route(
            "/menu/{id}",
            put(admin::update_menu_item).delete(admin::delete_menu_item),
        )
        .route("/menu/{id}/stock", post(admin::adjust_stock))
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Create all routes for the canteen server.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/menu", menu_routes())
        .nest("/orders", order_routes())
        .nest("/guests", guest_routes())
        .nest("/feedback", feedback_routes())
        .nest("/admin", admin_routes())
}

/// Build the full application with middleware layers applied. Shared by
/// the binary and the in-process integration tests.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
