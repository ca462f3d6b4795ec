//! # Cart Handlers
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Ledger  │     │          │     │          │     │  Book    │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_item / update_item / remove_item / discount       │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   DELETE /cart ─────► empty, order number + 1           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use brew_core::{CoreError, DiscountInput, Ledger, LedgerTotals, LineItem, NewLineItem};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::{AppState, SessionId};

/// Cart response including items and totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: LedgerTotals,
}

impl From<&Ledger> for CartResponse {
    fn from(ledger: &Ledger) -> Self {
        CartResponse {
            items: ledger.items().to_vec(),
            totals: ledger.totals(),
        }
    }
}

/// Body of `PATCH /cart/items/{product_id}`.
///
/// `notes: ""` clears the notes; `quantity: 0` removes the line.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub quantity: Option<i64>,
    pub notes: Option<String>,
}

/// `GET /cart`
///
/// Reading never opens a ledger; an unknown session sees an empty cart.
pub async fn get_cart(session: SessionId, State(state): State<AppState>) -> Json<CartResponse> {
    debug!(session = %session, "get_cart");
    Json(state.sessions.view(&session, |ledger| CartResponse::from(ledger)).await)
}

/// `POST /cart/items`
///
/// Re-adding a product bumps its quantity and keeps the first notes/addons.
pub async fn add_item(
    session: SessionId,
    State(state): State<AppState>,
    ApiJson(item): ApiJson<NewLineItem>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session, product_id = %item.product_id, "add_item");

    let response = state
        .sessions
        .with_ledger(&session, |ledger| -> Result<_, ApiError> {
            ledger.add_item(item)?;
            Ok(CartResponse::from(&*ledger))
        })
        .await?;

    Ok(Json(response))
}

/// `POST /cart/menu/{menu_item_id}`
///
/// Adds a menu item at its current list price.
pub async fn add_menu_item(
    session: SessionId,
    State(state): State<AppState>,
    Path(menu_item_id): Path<String>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session, menu_item_id = %menu_item_id, "add_menu_item");

    let item = state.catalog.orderable(&menu_item_id)?.to_line_item();

    let response = state
        .sessions
        .with_ledger(&session, |ledger| -> Result<_, ApiError> {
            ledger.add_item(item)?;
            Ok(CartResponse::from(&*ledger))
        })
        .await?;

    Ok(Json(response))
}

/// `PATCH /cart/items/{product_id}`
///
/// Both fields are applied to a scratch copy first, so a rejected quantity
/// never leaves updated notes behind.
pub async fn update_item(
    session: SessionId,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    ApiJson(request): ApiJson<UpdateCartItemRequest>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session, product_id = %product_id, ?request, "update_item");

    if request.quantity.is_none() && request.notes.is_none() {
        return Err(ApiError::validation("quantity or notes is required"));
    }

    let response = state
        .sessions
        .with_ledger(&session, |ledger| -> Result<_, ApiError> {
            if ledger.line(&product_id).is_none() {
                return Err(CoreError::LineNotFound(product_id.clone()).into());
            }

            let mut draft = ledger.clone();
            if let Some(notes) = request.notes.as_deref() {
                draft.set_notes(&product_id, Some(notes))?;
            }
            if let Some(quantity) = request.quantity {
                draft.set_quantity(&product_id, quantity)?;
            }
            *ledger = draft;

            Ok(CartResponse::from(&*ledger))
        })
        .await?;

    Ok(Json(response))
}

/// `DELETE /cart/items/{product_id}`
///
/// Removing an absent line is not an error.
pub async fn remove_item(
    session: SessionId,
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> StatusCode {
    let removed = state
        .sessions
        .with_ledger(&session, |ledger| ledger.remove_item(&product_id))
        .await;

    debug!(session = %session, product_id = %product_id, removed, "remove_item");
    StatusCode::NO_CONTENT
}

/// `POST /cart/discount`
pub async fn apply_discount(
    session: SessionId,
    State(state): State<AppState>,
    ApiJson(discount): ApiJson<DiscountInput>,
) -> Result<Json<CartResponse>, ApiError> {
    debug!(session = %session, ?discount, "apply_discount");

    let response = state
        .sessions
        .with_ledger(&session, |ledger| -> Result<_, ApiError> {
            let amount = ledger.apply_discount(discount)?;
            info!(session = %session, amount = %amount, "Discount applied");
            Ok(CartResponse::from(&*ledger))
        })
        .await?;

    Ok(Json(response))
}

/// `DELETE /cart`
///
/// Abandons the in-progress order; the next one gets a fresh number.
pub async fn clear_cart(session: SessionId, State(state): State<AppState>) -> Json<CartResponse> {
    debug!(session = %session, "clear_cart");

    Json(
        state
            .sessions
            .with_ledger(&session, |ledger| {
                ledger.clear();
                CartResponse::from(&*ledger)
            })
            .await,
    )
}
