//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Cart with a 12% tax in floating point:                                 │
//! │    480.00 * 0.12 = 57.599999999999994  ❌ WRONG!                        │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    48000 cents * 1200 bps / 10000 = 5760 cents                          │
//! │    Exact, and rounding happens in exactly one documented place          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::money::Money;
//!
//! let latte = Money::from_cents(21000); // 210.00
//! let oat_milk = Money::from_cents(3000); // 30.00
//!
//! let line = (latte + oat_milk) * 2i64;
//! assert_eq!(line.cents(), 48000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::types::TaxRate;

/// Basis points in one whole (100%).
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  MenuItem.price ──► LineItem.unit_price (+ addons) ──► line total       │
/// │                                                                         │
/// │  Ledger.subtotal ──► tax (12%) ──► − discount ──► total ──► Payment     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let price = Money::from_cents(27000); // 270.00
    /// assert_eq!(price.cents(), 27000);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion, always 0-99.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Clamps negative amounts to zero.
    ///
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(-250).floor_zero(), Money::zero());
    /// assert_eq!(Money::from_cents(250).floor_zero().cents(), 250);
    /// ```
    #[inline]
    pub const fn floor_zero(self) -> Self {
        if self.0 < 0 {
            Money(0)
        } else {
            self
        }
    }

    /// Takes `bps` basis points of this amount, rounding half away from zero.
    ///
    /// Used both for tax and for percentage discounts. `i128` keeps the
    /// intermediate product from overflowing on large amounts.
    ///
    /// ```rust
    /// use brew_core::money::Money;
    ///
    /// let subtotal = Money::from_cents(100000); // 1000.00
    /// assert_eq!(subtotal.portion_bps(1000).cents(), 10000); // 10% = 100.00
    /// ```
    pub fn portion_bps(&self, bps: u32) -> Money {
        let product = self.0 as i128 * bps as i128;
        let half = BPS_SCALE / 2;
        let rounded = if product < 0 {
            (product - half) / BPS_SCALE
        } else {
            (product + half) / BPS_SCALE
        };
        Money(rounded as i64)
    }

    /// Calculates tax on this amount.
    ///
    /// ```rust
    /// use brew_core::money::Money;
    /// use brew_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(48000); // 480.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1200)); // 12%
    /// assert_eq!(tax.cents(), 5760); // 57.60
    /// ```
    #[inline]
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.portion_bps(rate.bps())
    }

    /// Multiplies money by a quantity.
    ///
    /// Callers keep operands inside the validated price and quantity bounds,
    /// see [`crate::validation::MAX_PRICE_CENTS`].
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented display. Clients format for their own locale.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_parts() {
        let money = Money::from_cents(53760);
        assert_eq!(money.cents(), 53760);
        assert_eq!(money.major(), 537);
        assert_eq!(money.cents_part(), 60);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(53760).to_string(), "$537.60");
        assert_eq!(Money::from_cents(500).to_string(), "$5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-$5.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(21000);
        let b = Money::from_cents(27000);

        assert_eq!((a + b).cents(), 48000);
        assert_eq!((b - a).cents(), 6000);
        assert_eq!((a * 2).cents(), 42000);

        let total: Money = [a, b, a].iter().sum();
        assert_eq!(total.cents(), 69000);
    }

    #[test]
    fn test_twelve_percent_tax() {
        let rate = TaxRate::from_bps(1200);
        assert_eq!(Money::from_cents(48000).calculate_tax(rate).cents(), 5760);
        assert_eq!(Money::from_cents(69000).calculate_tax(rate).cents(), 8280);
        assert_eq!(Money::from_cents(50000).calculate_tax(rate).cents(), 6000);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // 0.04 * 12.5% = 0.005 → 0.01
        let tax = Money::from_cents(4).calculate_tax(TaxRate::from_bps(1250));
        assert_eq!(tax.cents(), 1);

        // 0.03 * 12% = 0.0036 → 0.00
        let tax = Money::from_cents(3).calculate_tax(TaxRate::from_bps(1200));
        assert_eq!(tax.cents(), 0);
    }

    #[test]
    fn test_portion_of_negative_amount_is_symmetric() {
        assert_eq!(Money::from_cents(-4).portion_bps(1250).cents(), -1);
    }

    #[test]
    fn test_floor_zero() {
        assert!(Money::from_cents(-1).floor_zero().is_zero());
        assert_eq!(Money::from_cents(7).floor_zero().cents(), 7);
    }
}
