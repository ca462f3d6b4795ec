//! # Order Status Lifecycle
//!
//! Explicit transition table for an order after checkout.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Order Status Lifecycle                             │
//! │                                                                         │
//! │  ┌─────────┐ start_preparing ┌───────────┐ mark_ready ┌─────────┐       │
//! │  │ Pending │────────────────►│ Preparing │───────────►│  Ready  │       │
//! │  └────┬────┘                 └─────┬─────┘            └────┬────┘       │
//! │       │ cancel                     │ cancel                │ complete   │
//! │       ▼                            ▼                       ▼            │
//! │  ┌─────────────────────────────────────┐            ┌───────────┐       │
//! │  │              Cancelled              │            │ Completed │       │
//! │  └─────────────────────────────────────┘            └───────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any pair not listed in [`TRANSITIONS`] is rejected with
//! [`CoreError::InvalidTransition`]. Nothing moves backwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

/// Where an order is in the kitchen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    /// Applies an event, consulting the transition table.
    pub fn apply(self, event: OrderEvent) -> CoreResult<OrderStatus> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == event)
            .map(|(_, _, to)| *to)
            .ok_or(CoreError::InvalidTransition { from: self, event })
    }

    /// Events accepted in this state, in table order.
    pub fn allowed_events(self) -> Vec<OrderEvent> {
        TRANSITIONS
            .iter()
            .filter(|(from, _, _)| *from == self)
            .map(|(_, event, _)| *event)
            .collect()
    }

    pub fn can_cancel(self) -> bool {
        self.apply(OrderEvent::Cancel).is_ok()
    }

    /// No further events are accepted.
    pub fn is_terminal(self) -> bool {
        self.allowed_events().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff action on an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderEvent {
    StartPreparing,
    MarkReady,
    Complete,
    Cancel,
}

impl fmt::Display for OrderEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderEvent::StartPreparing => "start_preparing",
            OrderEvent::MarkReady => "mark_ready",
            OrderEvent::Complete => "complete",
            OrderEvent::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// `(from, event, to)` rows. The only source of truth for legal moves.
pub const TRANSITIONS: &[(OrderStatus, OrderEvent, OrderStatus)] = &[
    (OrderStatus::Pending, OrderEvent::StartPreparing, OrderStatus::Preparing),
    (OrderStatus::Pending, OrderEvent::Cancel, OrderStatus::Cancelled),
    (OrderStatus::Preparing, OrderEvent::MarkReady, OrderStatus::Ready),
    (OrderStatus::Preparing, OrderEvent::Cancel, OrderStatus::Cancelled),
    (OrderStatus::Ready, OrderEvent::Complete, OrderStatus::Completed),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let status = OrderStatus::Pending
            .apply(OrderEvent::StartPreparing)
            .and_then(|s| s.apply(OrderEvent::MarkReady))
            .and_then(|s| s.apply(OrderEvent::Complete))
            .unwrap();
        assert_eq!(status, OrderStatus::Completed);
    }

    #[test]
    fn test_cancel_only_before_ready() {
        assert!(OrderStatus::Pending.can_cancel());
        assert!(OrderStatus::Preparing.can_cancel());
        assert!(!OrderStatus::Ready.can_cancel());
        assert!(!OrderStatus::Completed.can_cancel());
        assert!(!OrderStatus::Cancelled.can_cancel());
    }

    #[test]
    fn test_rejects_backward_and_skipping_moves() {
        let err = OrderStatus::Ready.apply(OrderEvent::StartPreparing).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InvalidTransition {
                from: OrderStatus::Ready,
                event: OrderEvent::StartPreparing
            }
        ));

        assert!(OrderStatus::Pending.apply(OrderEvent::Complete).is_err());
        assert!(OrderStatus::Pending.apply(OrderEvent::MarkReady).is_err());
    }

    #[test]
    fn test_terminal_states() {
        for status in OrderStatus::ALL {
            let terminal = matches!(status, OrderStatus::Completed | OrderStatus::Cancelled);
            assert_eq!(status.is_terminal(), terminal, "{status}");
        }
    }

    #[test]
    fn test_every_table_row_is_reachable_through_apply() {
        for (from, event, to) in TRANSITIONS {
            assert_eq!(from.apply(*event).unwrap(), *to);
        }
    }

    #[test]
    fn test_allowed_events() {
        assert_eq!(
            OrderStatus::Pending.allowed_events(),
            vec![OrderEvent::StartPreparing, OrderEvent::Cancel]
        );
        assert_eq!(OrderStatus::Ready.allowed_events(), vec![OrderEvent::Complete]);
    }

    #[test]
    fn test_new_orders_default_to_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
