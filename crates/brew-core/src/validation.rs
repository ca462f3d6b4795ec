//! # Validation Module
//!
//! Input guards run before the ledger is mutated.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Client apps (storefront, cashier, admin)                      │
//! │  └── Form checks, immediate feedback                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: brew-api handlers                                             │
//! │  └── JSON deserialization, session header                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                   │
//! │  └── Prices, quantities, discounts, text lengths                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use brew_core::validation::{validate_quantity, validate_price_cents};
//!
//! assert!(validate_quantity(2).is_ok());
//! assert!(validate_price_cents(-100).is_err());
//! ```

use crate::error::ValidationError;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_NAME_LEN: usize = 200;

/// Longest accepted line note.
pub const MAX_NOTES_LEN: usize = 500;

/// Longest accepted menu search query.
pub const MAX_QUERY_LEN: usize = 100;

/// Longest accepted product id.
pub const MAX_PRODUCT_ID_LEN: usize = 64;

/// Highest accepted unit or addon price (1,000,000.00).
///
/// ```text
/// unit total  <= (1 + MAX_ADDONS) × MAX_PRICE_CENTS   = 2.1e9
/// line total  <= unit total × MAX_ITEM_QUANTITY      ≈ 2.1e12
/// subtotal    <= line total × MAX_CART_ITEMS         ≈ 2.1e14
/// + tax (<= 100%)                                     ≈ 4.2e14  << i64::MAX
/// ```
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

/// Most addons accepted on one line.
pub const MAX_ADDONS: usize = 20;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an opaque product identifier.
///
/// ## Rules
/// - Must not be blank
/// - At most 64 characters, ignoring surrounding whitespace
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if id.chars().count() > MAX_PRODUCT_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "product_id".to_string(),
            max: MAX_PRODUCT_ID_LEN,
        });
    }

    Ok(())
}

/// Validates a product name snapshot.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Normalizes line notes: trims, maps blank to `None`, caps the length.
///
/// ```rust
/// use brew_core::validation::normalize_notes;
///
/// assert_eq!(normalize_notes(Some("  less ice ")).unwrap(), Some("less ice".to_string()));
/// assert_eq!(normalize_notes(Some("   ")).unwrap(), None);
/// assert_eq!(normalize_notes(None).unwrap(), None);
/// ```
pub fn normalize_notes(notes: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(notes) = notes.map(str::trim) else {
        return Ok(None);
    };

    if notes.is_empty() {
        return Ok(None);
    }

    if notes.chars().count() > MAX_NOTES_LEN {
        return Err(ValidationError::TooLong {
            field: "notes".to_string(),
            max: MAX_NOTES_LEN,
        });
    }

    Ok(Some(notes.to_string()))
}

/// Validates a menu search query and returns it trimmed.
///
/// Empty is allowed and means "everything".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price in cents. Zero is allowed (free refill).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    validate_price_range("price", cents)
}

/// Validates an addon price in cents.
pub fn validate_addon_price_cents(cents: i64) -> ValidationResult<()> {
    validate_price_range("addon price", cents)
}

fn validate_price_range(field: &str, cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates a non-negative amount for the named field.
pub fn validate_non_negative(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a rate in basis points (0% to 100%).
///
/// Shared by tax rates and percentage discounts.
pub fn validate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates that one more distinct line fits in the ledger.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}

/// Validates the number of addons on one line.
pub fn validate_addon_count(count: usize) -> ValidationResult<()> {
    if count > MAX_ADDONS {
        return Err(ValidationError::OutOfRange {
            field: "addons".to_string(),
            min: 0,
            max: MAX_ADDONS as i64,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string (order ids).
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("americano").is_ok());
        assert!(validate_product_id("prod-0001").is_ok());

        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("   ").is_err());
        assert!(validate_product_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_product_id_length_counts_chars() {
        // 64 two-byte chars is 128 bytes
        assert!(validate_product_id(&"é".repeat(64)).is_ok());
        assert!(validate_product_id(&"é".repeat(65)).is_err());
        assert!(validate_product_id(&format!("  {}  ", "x".repeat(64))).is_ok());
    }

    #[test]
    fn test_validate_item_name() {
        assert!(validate_item_name("Spanish Latte").is_ok());
        assert!(validate_item_name("").is_err());
        assert!(validate_item_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_normalize_notes_caps_length() {
        assert!(normalize_notes(Some(&"n".repeat(500))).is_ok());
        assert!(normalize_notes(Some(&"n".repeat(501))).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  latte ").unwrap(), "latte");
        assert_eq!(validate_search_query("").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(21000).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_price_cents(MAX_PRICE_CENTS).is_ok());
        assert!(validate_price_cents(MAX_PRICE_CENTS + 1).is_err());
        assert!(validate_price_cents(i64::MAX / 2 + 1).is_err());
    }

    #[test]
    fn test_validate_addon_bounds() {
        assert!(validate_addon_price_cents(3000).is_ok());
        assert!(validate_addon_price_cents(-1).is_err());
        assert!(validate_addon_price_cents(MAX_PRICE_CENTS + 1).is_err());

        assert!(validate_addon_count(MAX_ADDONS).is_ok());
        assert!(validate_addon_count(MAX_ADDONS + 1).is_err());
    }

    #[test]
    fn test_price_bounds_keep_ledger_math_in_range() {
        let unit = (1 + MAX_ADDONS as i64) * MAX_PRICE_CENTS;
        let subtotal = unit
            .checked_mul(MAX_ITEM_QUANTITY)
            .and_then(|line| line.checked_mul(MAX_CART_ITEMS as i64))
            .unwrap();
        // subtotal plus a 100% tax still fits
        assert!(subtotal.checked_mul(2).is_some());
    }

    #[test]
    fn test_validate_bps() {
        assert!(validate_bps("tax_rate", 0).is_ok());
        assert!(validate_bps("tax_rate", 1200).is_ok());
        assert!(validate_bps("discount", 10_000).is_ok());
        assert!(validate_bps("discount", 10_001).is_err());
    }

    #[test]
    fn test_validate_cart_size() {
        assert!(validate_cart_size(0).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS - 1).is_ok());
        assert!(validate_cart_size(MAX_CART_ITEMS).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
