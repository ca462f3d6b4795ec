//! # Error Types
//!
//! Domain-specific error types for brew-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  brew-core errors (this file)                                          │
//! │  ├── CoreError        - Ledger, lifecycle and order book failures      │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  brew-api errors (app crate)                                           │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON response          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this domain is fatal: every variant is recoverable and maps to
//! a user-facing message.

use thiserror::Error;

use crate::lifecycle::{OrderEvent, OrderStatus};

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The ledger has no line for this product.
    ///
    /// ## When This Occurs
    /// - Changing the quantity of a product that was never added
    /// - Editing notes after the line was removed
    #[error("Line item not found: {0}")]
    LineNotFound(String),

    /// Menu item does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Menu item is listed but sold out.
    #[error("Product is not available: {0}")]
    ProductUnavailable(String),

    /// Order does not exist in the order book.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    /// Ledger has exceeded the maximum number of distinct lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Checkout was attempted on an empty ledger.
    #[error("Cannot check out an empty cart")]
    EmptyLedger,

    /// The lifecycle table has no entry for this (status, event) pair.
    ///
    /// ## User Workflow
    /// ```text
    /// Order #12 is Ready
    ///      │
    ///      ▼
    /// Barista presses "Cancel"
    ///      │
    ///      ▼
    /// InvalidTransition { from: Ready, event: Cancel }
    ///      │
    ///      ▼
    /// UI shows: "Order is ready, cannot cancel"
    /// ```
    #[error("Cannot apply {event} to an order that is {from}")]
    InvalidTransition { from: OrderStatus, event: OrderEvent },

    /// Payment amount is invalid.
    #[error("Invalid payment amount: {reason}")]
    InvalidPaymentAmount { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any ledger state is touched, so a rejected call never
/// leaves the ledger half-modified.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "Quantity 1000 exceeds maximum allowed (999)");

        let err = CoreError::LineNotFound("latte".to_string());
        assert_eq!(err.to_string(), "Line item not found: latte");
    }

    #[test]
    fn test_transition_error_message() {
        let err = CoreError::InvalidTransition {
            from: OrderStatus::Ready,
            event: OrderEvent::Cancel,
        };
        assert_eq!(err.to_string(), "Cannot apply cancel to an order that is ready");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product_id".to_string(),
        };
        assert_eq!(err.to_string(), "product_id is required");

        let err = ValidationError::TooLong {
            field: "notes".to_string(),
            max: 500,
        };
        assert_eq!(err.to_string(), "notes must be at most 500 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
