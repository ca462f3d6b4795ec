//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Brew POS                               │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  PATCH /cart/items/latte                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler  →  Result<Json<T>, ApiError>                           │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Ledger error? ─── CoreError::LineNotFound ─── ApiError (404) ──►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────── 200 ──────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Line item not found: latte" }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use brew_core::{CoreError, ValidationError};
use serde::Serialize;

/// API error returned from handlers.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_TRANSITION",
///   "message": "Cannot apply cancel to an order that is ready"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Cart rule violated, e.g. too many lines (422)
    CartError,

    /// Payment rejected (422)
    PaymentError,

    /// Order lifecycle refused the event (409)
    InvalidTransition,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::CartError | ErrorCode::PaymentError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::InvalidTransition => StatusCode::CONFLICT,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::LineNotFound(_)
            | CoreError::ProductNotFound(_)
            | CoreError::OrderNotFound(_) => ErrorCode::NotFound,
            CoreError::ProductUnavailable(_)
            | CoreError::CartTooLarge { .. }
            | CoreError::QuantityTooLarge { .. }
            | CoreError::EmptyLedger => ErrorCode::CartError,
            CoreError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            CoreError::InvalidPaymentAmount { .. } => ErrorCode::PaymentError,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };

        let message = match err {
            CoreError::Validation(e) => e.to_string(),
            other => other.to_string(),
        };

        ApiError::new(code, message)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(code = ?self.code, message = %self.message, "Request rejected");
        (self.code.status(), Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use brew_core::{OrderEvent, OrderStatus, ValidationError};

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: ApiError = CoreError::LineNotFound("latte".into()).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.code.status(), StatusCode::NOT_FOUND);

        let err: ApiError = CoreError::InvalidTransition {
            from: OrderStatus::Completed,
            event: OrderEvent::Cancel,
        }
        .into();
        assert_eq!(err.code.status(), StatusCode::CONFLICT);

        let err: ApiError = CoreError::EmptyLedger.into();
        assert_eq!(err.code.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_validation_message_is_unwrapped() {
        let err: ApiError = CoreError::from(ValidationError::MustBePositive {
            field: "quantity".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("X-Session-Id header is required");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "X-Session-Id header is required");
    }
}
