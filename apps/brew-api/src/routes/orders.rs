//! # Order Handlers
//!
//! Barista queue and admin dashboard views over the order book.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /orders/{id}/events { "event": "start_preparing" }               │
//! │                                                                         │
//! │  pending ──start_preparing──► preparing ──mark_ready──► ready           │
//! │     │                            │                        │             │
//! │   cancel                       cancel                  complete         │
//! │     ▼                            ▼                        ▼             │
//! │  cancelled                    cancelled               completed         │
//! │                                                                         │
//! │  Anything else ──► 409 INVALID_TRANSITION                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use brew_core::validation::validate_uuid;
use brew_core::{Order, OrderEvent, OrderStatus, OrderSummary};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<OrderStatus>,
}

#[derive(Debug, Deserialize)]
pub struct OrderEventRequest {
    pub event: OrderEvent,
}

/// `GET /orders?status=pending`, newest first.
pub async fn list_orders(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<OrderListQuery>,
) -> Json<Vec<Order>> {
    debug!(status = ?query.status, "list_orders");

    let orders = state.orders.read().await;
    Json(orders.list(query.status).into_iter().cloned().collect())
}

/// `GET /orders/summary`
pub async fn order_summary(State(state): State<AppState>) -> Json<OrderSummary> {
    Json(state.orders.read().await.summary())
}

/// `GET /orders/{id}`
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    validate_uuid(&id)?;

    let orders = state.orders.read().await;
    Ok(Json(orders.get(&id)?.clone()))
}

/// `POST /orders/{id}/events`
pub async fn apply_event(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<OrderEventRequest>,
) -> Result<Json<Order>, ApiError> {
    validate_uuid(&id)?;
    debug!(order_id = %id, event = %request.event, "apply_event");

    let mut orders = state.orders.write().await;
    let order = orders.advance(&id, request.event, Utc::now())?.clone();

    info!(
        order_id = %order.id,
        order_number = order.order_number,
        status = %order.status,
        "Order status changed"
    );

    Ok(Json(order))
}
