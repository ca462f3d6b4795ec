//! # HTTP Routes
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Route                              Handler                  Session?   │
//! │  ─────                              ───────                  ────────   │
//! │  GET    /health                     health                   no         │
//! │  GET    /menu                       menu::search_menu        no         │
//! │  GET    /cart                       cart::get_cart           yes        │
//! │  DELETE /cart                       cart::clear_cart         yes        │
//! │  POST   /cart/items                 cart::add_item           yes        │
//! │  POST   /cart/menu/{menu_item_id}   cart::add_menu_item      yes        │
//! │  PATCH  /cart/items/{product_id}    cart::update_item        yes        │
//! │  DELETE /cart/items/{product_id}    cart::remove_item        yes        │
//! │  POST   /cart/discount              cart::apply_discount     yes        │
//! │  POST   /checkout                   checkout::checkout       yes        │
//! │  GET    /orders                     orders::list_orders      no         │
//! │  GET    /orders/summary             orders::order_summary    no         │
//! │  GET    /orders/{id}                orders::get_order        no         │
//! │  POST   /orders/{id}/events         orders::apply_event      no         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod menu;
pub mod orders;

use axum::extract::State;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/menu", get(menu::search_menu))
        .route("/cart", get(cart::get_cart).delete(cart::clear_cart))
        .route("/cart/items", post(cart::add_item))
        .route("/cart/menu/{menu_item_id}", post(cart::add_menu_item))
        .route(
            "/cart/items/{product_id}",
            patch(cart::update_item).delete(cart::remove_item),
        )
        .route("/cart/discount", post(cart::apply_discount))
        .route("/checkout", post(checkout::checkout))
        .route("/orders", get(orders::list_orders))
        .route("/orders/summary", get(orders::order_summary))
        .route("/orders/{id}", get(orders::get_order))
        .route("/orders/{id}/events", post(orders::apply_event))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub store: String,
    pub open_sessions: usize,
    pub orders: usize,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        store: state.config.store.name.clone(),
        open_sessions: state.sessions.session_count().await,
        orders: state.orders.read().await.len(),
    })
}
