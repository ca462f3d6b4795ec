//! # Menu Handler

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use brew_core::{Category, MenuItem};

use crate::error::ApiError;
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct MenuQuery {
    pub q: Option<String>,
    pub category: Option<Category>,
}

/// `GET /menu?q=latte&category=coffee`
///
/// Sold-out items are listed with `available: false` so the storefront can
/// grey them out.
pub async fn search_menu(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MenuQuery>,
) -> Result<Json<Vec<MenuItem>>, ApiError> {
    debug!(?query, "search_menu");

    let items = state
        .catalog
        .search(query.q.as_deref().unwrap_or(""), query.category)?
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(items))
}
