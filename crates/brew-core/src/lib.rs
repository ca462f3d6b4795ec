//! # brew-core: Pure Business Logic for Brew POS
//!
//! The ledger, order lifecycle and menu behind the storefront, cashier and
//! admin apps. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Brew POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Storefront  /  Cashier POS  /  Admin Dashboard        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ HTTP + JSON                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    brew-api (axum)                              │   │
//! │  │    /cart, /checkout, /orders, /menu      session-scoped ledgers │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ brew-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌───────────┐ ┌─────────┐ ┌────────┐  │   │
//! │  │   │  money  │ │ ledger  │ │ lifecycle │ │ catalog │ │ orders │  │   │
//! │  │   └─────────┘ └─────────┘ └───────────┘ └─────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO GLOBAL STATE                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Integer-cent `Money` with tax and percentage helpers
//! - [`types`] - Line items, discounts, payments, orders
//! - [`ledger`] - The in-progress order and its totals
//! - [`lifecycle`] - Order status transition table
//! - [`catalog`] - Static menu and search
//! - [`orders`] - In-memory order book
//! - [`validation`] - Input guards
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use brew_core::{Ledger, Money, NewLineItem, DiscountInput};
//!
//! let mut ledger = Ledger::default();
//! ledger.add_item(NewLineItem::new("a", "Americano", Money::from_cents(50000))).unwrap();
//! ledger.apply_discount(DiscountInput::Fixed { amount_cents: 5000 }).unwrap();
//!
//! // 500.00 + 60.00 tax - 50.00 discount
//! assert_eq!(ledger.total().cents(), 51000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod money;
pub mod orders;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{Catalog, Category, MenuItem};
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{Ledger, LedgerSettings, LedgerTotals};
pub use lifecycle::{OrderEvent, OrderStatus};
pub use money::Money;
pub use orders::{OrderBook, OrderSummary};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines in a single ledger.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single line.
///
/// Catches a fat-fingered 100 where 10 was meant.
pub const MAX_ITEM_QUANTITY: i64 = 999;
