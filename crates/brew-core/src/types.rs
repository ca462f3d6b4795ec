//! # Domain Types
//!
//! Core domain types shared by the ledger, the order book and the API.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │      Order      │   │    Payment      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  id (UUID)      │   │  method         │       │
//! │  │  name (frozen)  │   │  order_number   │   │  amount_cents   │       │
//! │  │  unit_price     │   │  status         │   │  tendered_cents │       │
//! │  │  quantity       │   │  total_cents    │   │  change_cents   │       │
//! │  │  addons, notes  │   │  items (frozen) │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │  DiscountInput  │   │ PaymentMethod   │       │
//! │  │  bps (u32)      │   │  Percentage     │   │  Cash           │       │
//! │  │  1200 = 12%     │   │  Fixed          │   │  Card, EWallet  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Names and prices are copied into the line item when it is added, so a
//! later menu price change never reaches an item already in the ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::lifecycle::OrderStatus;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate in basis points. 1200 bps = 12%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// The shop's VAT rate.
    pub const STANDARD: TaxRate = TaxRate(1200);

    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::STANDARD
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// A priced modifier on a line item (extra shot, oat milk, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Addon {
    pub name: String,
    pub price_cents: i64,
}

impl Addon {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Addon {
            name: name.into(),
            price_cents: price.cents(),
        }
    }

    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// One product entry in the ledger.
///
/// ## Invariants
/// - `quantity` is always within `1..=MAX_ITEM_QUANTITY`
/// - `product_id` is unique within a ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Opaque product identifier.
    pub product_id: String,

    /// Product name at time of adding (frozen).
    pub name: String,

    /// Base unit price in cents at time of adding (frozen).
    pub unit_price_cents: i64,

    /// Image reference, passed through for display.
    pub image: Option<String>,

    pub quantity: i64,

    /// Free-text customer instructions ("less ice").
    pub notes: Option<String>,

    /// Ordered list of priced addons.
    pub addons: Vec<Addon>,
}

impl LineItem {
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Unit price plus every addon.
    pub fn unit_total(&self) -> Money {
        self.unit_price() + self.addons.iter().map(Addon::price).sum::<Money>()
    }

    /// `unit_total × quantity`.
    pub fn line_total(&self) -> Money {
        self.unit_total().multiply_quantity(self.quantity)
    }
}

/// Input for [`crate::ledger::Ledger::add_item`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewLineItem {
    pub product_id: String,
    pub name: String,
    pub unit_price_cents: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub addons: Vec<Addon>,
}

impl NewLineItem {
    /// Plain line with no image, notes or addons.
    pub fn new(product_id: impl Into<String>, name: impl Into<String>, unit_price: Money) -> Self {
        NewLineItem {
            product_id: product_id.into(),
            name: name.into(),
            unit_price_cents: unit_price.cents(),
            ..Default::default()
        }
    }

    pub fn with_addon(mut self, addon: Addon) -> Self {
        self.addons.push(addon);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}

// =============================================================================
// Discounts
// =============================================================================

/// A discount request.
///
/// Either kind is converted to a flat amount when applied; the ledger never
/// stores the rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum DiscountInput {
    /// Share of the current subtotal, in basis points (1000 = 10%).
    Percentage { bps: u32 },
    /// Flat amount off.
    Fixed {
        #[serde(rename = "amountCents")]
        amount_cents: i64,
    },
}

// =============================================================================
// Payment
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentMethod {
    Cash,
    Card,
    EWallet,
}

/// What the cashier enters at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentInput {
    pub method: PaymentMethod,
    /// Cash handed over. Required for cash, ignored otherwise.
    #[serde(default)]
    pub tendered_cents: Option<i64>,
}

impl PaymentInput {
    pub fn cash(tendered: Money) -> Self {
        PaymentInput {
            method: PaymentMethod::Cash,
            tendered_cents: Some(tendered.cents()),
        }
    }

    pub fn card() -> Self {
        PaymentInput {
            method: PaymentMethod::Card,
            tendered_cents: None,
        }
    }
}

/// Payment captured with an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Payment {
    pub method: PaymentMethod,
    pub amount_cents: i64,
    pub tendered_cents: i64,
    pub change_cents: i64,
}

// =============================================================================
// Order
// =============================================================================

/// A checked-out order. Monetary fields are a snapshot and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// UUID v4, stable identity in the order book.
    pub id: String,
    /// Human-facing number called out at the counter.
    pub order_number: u64,
    pub status: OrderStatus,
    pub items: Vec<LineItem>,
    pub subtotal_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub payment: Payment,
    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_default_is_twelve_percent() {
        let rate = TaxRate::default();
        assert_eq!(rate.bps(), 1200);
    }

    #[test]
    fn test_line_total_includes_addons() {
        let item = LineItem {
            product_id: "latte".to_string(),
            name: "Latte".to_string(),
            unit_price_cents: 18000,
            image: None,
            quantity: 2,
            notes: None,
            addons: vec![
                Addon::new("Extra shot", Money::from_cents(4000)),
                Addon::new("Oat milk", Money::from_cents(3000)),
            ],
        };

        assert_eq!(item.unit_total().cents(), 25000);
        assert_eq!(item.line_total().cents(), 50000);
    }

    #[test]
    fn test_discount_input_json_shape() {
        let pct: DiscountInput = serde_json::from_str(r#"{"kind":"percentage","bps":1000}"#).unwrap();
        assert_eq!(pct, DiscountInput::Percentage { bps: 1000 });

        let fixed: DiscountInput =
            serde_json::from_str(r#"{"kind":"fixed","amountCents":5000}"#).unwrap();
        assert_eq!(fixed, DiscountInput::Fixed { amount_cents: 5000 });
    }

    #[test]
    fn test_payment_method_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&PaymentMethod::EWallet).unwrap(), "\"e_wallet\"");
    }
}
