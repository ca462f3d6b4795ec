//! # State Module
//!
//! Shared application state handed to every handler.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │  SessionStore    │ │  OrderBook       │ │  Catalog + Config    │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  Mutex<HashMap<  │ │  RwLock<         │ │  read-only after     │    │
//! │  │   session,       │ │   OrderBook>     │ │  startup             │    │
//! │  │   Ledger>>       │ │                  │ │                      │    │
//! │  │  idle expiry +   │ │                  │ │                      │    │
//! │  │  capacity cap    │ │                  │ │                      │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  Checkout takes the session lock, releases it, then takes the order    │
//! │  book lock. The two are never held together.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod sessions;

use std::sync::Arc;

use tokio::sync::RwLock;

use brew_core::{Catalog, OrderBook};

use crate::config::ApiConfig;

pub use sessions::{SessionId, SessionLimits, SessionStore, SESSION_HEADER};

#[derive(Debug, Clone)]
pub struct AppState {
    pub sessions: SessionStore,
    pub orders: Arc<RwLock<OrderBook>>,
    pub catalog: Arc<Catalog>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    /// State with the house menu and an empty order book.
    pub fn new(config: ApiConfig) -> Self {
        Self::with_catalog(config, Catalog::house_menu())
    }

    pub fn with_catalog(config: ApiConfig, catalog: Catalog) -> Self {
        AppState {
            sessions: SessionStore::new(config.ledger_settings(), config.session_limits()),
            orders: Arc::new(RwLock::new(OrderBook::new())),
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
