//! # brew-api: HTTP Surface for Brew POS
//!
//! Serves the storefront, the cashier till and the admin dashboard from one
//! process. Each client session gets its own ledger; checked-out orders land
//! in a shared order book.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP request                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer (tower-http) ── span per request                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  routes::* handler                                                      │
//! │       │    SessionId extractor (X-Session-Id)                           │
//! │       │    State<AppState>                                              │
//! │       ▼                                                                 │
//! │  brew-core (Ledger / OrderBook / Catalog)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Json<T>  or  ApiError { code, message }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use config::ApiConfig;
pub use error::{ApiError, ErrorCode};
pub use routes::build_router;
pub use state::AppState;

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=brew=trace` - Show trace for brew crates only
/// - Default: INFO, with DEBUG for brew crates
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,brew=debug,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
