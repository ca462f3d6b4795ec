//! # Checkout Handler
//!
//! ```text
//! POST /checkout { method, tenderedCents? }
//!      │
//!      ├── session lock: Ledger::checkout(payment, now) ──► Order, ledger cleared
//!      │
//!      └── order book lock: OrderBook::record(order) ──► 201 Created
//! ```

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use tracing::{debug, info};

use brew_core::{Order, PaymentInput};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::{AppState, SessionId};

/// `POST /checkout`
///
/// Snapshots the session's ledger into a pending order and records it.
/// The ledger is left empty with the next order number.
pub async fn checkout(
    session: SessionId,
    State(state): State<AppState>,
    ApiJson(payment): ApiJson<PaymentInput>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    debug!(session = %session, method = ?payment.method, "checkout");

    let order = state
        .sessions
        .with_ledger(&session, |ledger| ledger.checkout(payment, Utc::now()))
        .await?;

    state.orders.write().await.record(order.clone());

    info!(
        session = %session,
        order_id = %order.id,
        order_number = order.order_number,
        total = %order.total(),
        "Order placed"
    );

    Ok((StatusCode::CREATED, Json(order)))
}
