//! # Order/Cart Ledger
//!
//! The in-progress order: line items, a frozen discount, and the counter for
//! the next order number.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Operation              Effect                                          │
//! │  ─────────              ──────                                          │
//! │  add_item ────────────► new line (qty 1) or existing line qty += 1      │
//! │  set_quantity(0) ─────► same as remove_item                             │
//! │  set_quantity(n) ─────► line.qty = n                                    │
//! │  set_notes ───────────► line.notes = notes                              │
//! │  remove_item ─────────► line dropped (no-op if absent)                  │
//! │  apply_discount ──────► discount = flat amount, frozen                  │
//! │  clear ───────────────► items = [], discount = 0, order number += 1     │
//! │  checkout ────────────► Order snapshot, then clear                      │
//! │                                                                         │
//! │  subtotal = Σ (unit_price + Σ addons) × qty                             │
//! │  tax      = subtotal × tax_rate                                         │
//! │  total    = max(0, subtotal + tax − discount)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use brew_core::ledger::Ledger;
//! use brew_core::money::Money;
//! use brew_core::types::NewLineItem;
//!
//! let mut ledger = Ledger::default();
//! ledger.add_item(NewLineItem::new("a", "Americano", Money::from_cents(21000))).unwrap();
//! ledger.add_item(NewLineItem::new("b", "Spanish Latte", Money::from_cents(27000))).unwrap();
//!
//! assert_eq!(ledger.subtotal().cents(), 48000);
//! assert_eq!(ledger.tax().cents(), 5760);
//! assert_eq!(ledger.total().cents(), 53760);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::lifecycle::OrderStatus;
use crate::money::Money;
use crate::types::{
    DiscountInput, LineItem, NewLineItem, Order, Payment, PaymentInput, PaymentMethod, TaxRate,
};
use crate::validation::{
    normalize_notes, validate_addon_count, validate_addon_price_cents, validate_bps,
    validate_cart_size, validate_item_name, validate_non_negative, validate_price_cents,
    validate_product_id,
};
use crate::MAX_ITEM_QUANTITY;

/// Per-ledger settings, normally taken from the store configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerSettings {
    pub tax_rate: TaxRate,
    /// Number given to the first order taken by a fresh ledger.
    pub first_order_number: u64,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        LedgerSettings {
            tax_rate: TaxRate::STANDARD,
            first_order_number: 1,
        }
    }
}

/// The in-progress order.
///
/// ## Invariants
/// - Lines are unique by `product_id`
/// - Every line has `1 <= quantity <= MAX_ITEM_QUANTITY`
/// - `discount` is a flat amount and never rescales with the subtotal
#[derive(Debug, Clone)]
pub struct Ledger {
    items: Vec<LineItem>,
    discount: Money,
    tax_rate: TaxRate,
    next_order_number: u64,
}

impl Default for Ledger {
    fn default() -> Self {
        Ledger::new(LedgerSettings::default())
    }
}

impl Ledger {
    pub fn new(settings: LedgerSettings) -> Self {
        Ledger {
            items: Vec::new(),
            discount: Money::zero(),
            tax_rate: settings.tax_rate,
            next_order_number: settings.first_order_number,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds one unit of a product.
    ///
    /// An existing line keeps its notes and addons; only the quantity moves.
    pub fn add_item(&mut self, item: NewLineItem) -> CoreResult<&LineItem> {
        validate_product_id(&item.product_id)?;
        validate_item_name(&item.name)?;
        validate_price_cents(item.unit_price_cents)?;
        validate_addon_count(item.addons.len())?;
        for addon in &item.addons {
            validate_item_name(&addon.name)?;
            validate_addon_price_cents(addon.price_cents)?;
        }
        let notes = normalize_notes(item.notes.as_deref())?;

        if let Some(index) = self.position(&item.product_id) {
            let line = &mut self.items[index];
            let requested = line.quantity + 1;
            if requested > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            line.quantity = requested;
            return Ok(&self.items[index]);
        }

        validate_cart_size(self.items.len()).map_err(|_| CoreError::CartTooLarge {
            max: crate::MAX_CART_ITEMS,
        })?;

        self.items.push(LineItem {
            product_id: item.product_id.trim().to_string(),
            name: item.name.trim().to_string(),
            unit_price_cents: item.unit_price_cents,
            image: item.image,
            quantity: 1,
            notes,
            addons: item.addons,
        });
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    /// Drops the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        match self.position(product_id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces a line's quantity; `0` removes the line.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> CoreResult<()> {
        if quantity < 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        if quantity == 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        let line = self.line_mut(product_id)?;
        line.quantity = quantity;
        Ok(())
    }

    /// Overwrites a line's notes. Blank notes clear them.
    pub fn set_notes(&mut self, product_id: &str, notes: Option<&str>) -> CoreResult<()> {
        let notes = normalize_notes(notes)?;
        let line = self.line_mut(product_id)?;
        line.notes = notes;
        Ok(())
    }

    /// Converts the request to a flat amount against the current subtotal and
    /// stores it, replacing any earlier discount.
    pub fn apply_discount(&mut self, input: DiscountInput) -> CoreResult<Money> {
        let subtotal = self.subtotal();

        let amount = match input {
            DiscountInput::Percentage { bps } => {
                validate_bps("discount", bps)?;
                subtotal.portion_bps(bps)
            }
            DiscountInput::Fixed { amount_cents } => {
                validate_non_negative("discount", amount_cents)?;
                if amount_cents > subtotal.cents() {
                    return Err(ValidationError::OutOfRange {
                        field: "discount".to_string(),
                        min: 0,
                        max: subtotal.cents(),
                    }
                    .into());
                }
                Money::from_cents(amount_cents)
            }
        };

        self.discount = amount;
        Ok(amount)
    }

    /// Empties the ledger and advances the order number.
    pub fn clear(&mut self) {
        self.items.clear();
        self.discount = Money::zero();
        self.next_order_number += 1;
    }

    /// Freezes the ledger into an [`Order`] and clears it.
    ///
    /// The ledger is left untouched when the payment is rejected.
    pub fn checkout(&mut self, payment: PaymentInput, now: DateTime<Utc>) -> CoreResult<Order> {
        if self.is_empty() {
            return Err(CoreError::EmptyLedger);
        }

        let totals = self.totals();
        let payment = settle_payment(payment, self.total())?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: self.next_order_number,
            status: OrderStatus::Pending,
            items: self.items.clone(),
            subtotal_cents: totals.subtotal_cents,
            tax_cents: totals.tax_cents,
            discount_cents: totals.discount_cents,
            total_cents: totals.total_cents,
            payment,
            placed_at: now,
            updated_at: now,
        };

        self.clear();
        Ok(order)
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(self.tax_rate)
    }

    /// `subtotal + tax − discount`, never below zero.
    pub fn total(&self) -> Money {
        (self.subtotal() + self.tax() - self.discount).floor_zero()
    }

    pub fn totals(&self) -> LedgerTotals {
        LedgerTotals {
            order_number: self.next_order_number,
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
            subtotal_cents: self.subtotal().cents(),
            tax_rate_bps: self.tax_rate.bps(),
            tax_cents: self.tax().cents(),
            discount_cents: self.discount.cents(),
            total_cents: self.total().cents(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn line(&self, product_id: &str) -> Option<&LineItem> {
        self.position(product_id).map(|index| &self.items[index])
    }

    pub fn discount(&self) -> Money {
        self.discount
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    /// Number the current in-progress order will receive at checkout.
    pub fn next_order_number(&self) -> u64 {
        self.next_order_number
    }

    /// Distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lines are stored under the trimmed id, so every lookup trims too.
    fn position(&self, product_id: &str) -> Option<usize> {
        let product_id = product_id.trim();
        self.items.iter().position(|line| line.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: &str) -> CoreResult<&mut LineItem> {
        match self.position(product_id) {
            Some(index) => Ok(&mut self.items[index]),
            None => Err(CoreError::LineNotFound(product_id.trim().to_string())),
        }
    }
}

/// Totals summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LedgerTotals {
    pub order_number: u64,
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_cents: i64,
    pub tax_rate_bps: u32,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
}

/// Cash must cover the total; card and e-wallet are charged exactly.
fn settle_payment(input: PaymentInput, total: Money) -> CoreResult<Payment> {
    match input.method {
        PaymentMethod::Cash => {
            let tendered = input.tendered_cents.ok_or_else(|| ValidationError::Required {
                field: "tendered".to_string(),
            })?;
            validate_non_negative("tendered", tendered)?;
            if tendered < total.cents() {
                return Err(CoreError::InvalidPaymentAmount {
                    reason: format!(
                        "tendered {} is less than total {}",
                        Money::from_cents(tendered),
                        total
                    ),
                });
            }
            Ok(Payment {
                method: PaymentMethod::Cash,
                amount_cents: total.cents(),
                tendered_cents: tendered,
                change_cents: tendered - total.cents(),
            })
        }
        method => Ok(Payment {
            method,
            amount_cents: total.cents(),
            tendered_cents: total.cents(),
            change_cents: 0,
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
