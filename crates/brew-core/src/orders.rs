//! # Order Book
//!
//! Process-local record of checked-out orders, as seen by the barista queue
//! and the admin dashboard. Nothing is persisted.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::lifecycle::{OrderEvent, OrderStatus};
use crate::types::Order;

#[derive(Debug, Clone, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, order: Order) -> &Order {
        self.orders.push(order);
        let last = self.orders.len() - 1;
        &self.orders[last]
    }

    pub fn get(&self, id: &str) -> CoreResult<&Order> {
        self.orders
            .iter()
            .find(|order| order.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))
    }

    /// Newest first, optionally filtered by status.
    pub fn list(&self, status: Option<OrderStatus>) -> Vec<&Order> {
        self.orders
            .iter()
            .rev()
            .filter(|order| status.map_or(true, |s| order.status == s))
            .collect()
    }

    /// Moves an order through the lifecycle table.
    pub fn advance(&mut self, id: &str, event: OrderEvent, now: DateTime<Utc>) -> CoreResult<&Order> {
        let order = self
            .orders
            .iter_mut()
            .find(|order| order.id == id)
            .ok_or_else(|| CoreError::OrderNotFound(id.to_string()))?;

        order.status = order.status.apply(event)?;
        order.updated_at = now;
        Ok(order)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Dashboard counters. Revenue counts completed orders only and saturates
    /// instead of wrapping.
    pub fn summary(&self) -> OrderSummary {
        let mut by_status: BTreeMap<String, usize> = OrderStatus::ALL
            .iter()
            .map(|status| (status.to_string(), 0))
            .collect();
        let mut completed_revenue_cents: i64 = 0;

        for order in &self.orders {
            *by_status.entry(order.status.to_string()).or_default() += 1;
            if order.status == OrderStatus::Completed {
                completed_revenue_cents =
                    i64::saturating_add(completed_revenue_cents, order.total_cents);
            }
        }

        OrderSummary {
            total_orders: self.orders.len(),
            by_status,
            completed_revenue_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderSummary {
    pub total_orders: usize,
    pub by_status: BTreeMap<String, usize>,
    pub completed_revenue_cents: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::Ledger;
    use crate::money::Money;
    use crate::types::{NewLineItem, PaymentInput};

    fn place(ledger: &mut Ledger, book: &mut OrderBook, cents: i64) -> String {
        ledger
            .add_item(NewLineItem::new("a", "Americano", Money::from_cents(cents)))
            .unwrap();
        let order = ledger.checkout(PaymentInput::card(), Utc::now()).unwrap();
        book.record(order).id.clone()
    }

    #[test]
    fn test_list_newest_first_with_filter() {
        let mut ledger = Ledger::default();
        let mut book = OrderBook::new();
        let first = place(&mut ledger, &mut book, 10000);
        let second = place(&mut ledger, &mut book, 20000);

        let all: Vec<_> = book.list(None).iter().map(|o| o.id.clone()).collect();
        assert_eq!(all, vec![second.clone(), first.clone()]);

        book.advance(&first, OrderEvent::StartPreparing, Utc::now()).unwrap();
        let preparing = book.list(Some(OrderStatus::Preparing));
        assert_eq!(preparing.len(), 1);
        assert_eq!(preparing[0].id, first);
    }

    #[test]
    fn test_order_numbers_follow_ledger_counter() {
        let mut ledger = Ledger::default();
        let mut book = OrderBook::new();
        let first = place(&mut ledger, &mut book, 10000);
        let second = place(&mut ledger, &mut book, 10000);

        assert_eq!(book.get(&first).unwrap().order_number, 1);
        assert_eq!(book.get(&second).unwrap().order_number, 2);
    }

    #[test]
    fn test_advance_rejects_illegal_transition() {
        let mut ledger = Ledger::default();
        let mut book = OrderBook::new();
        let id = place(&mut ledger, &mut book, 10000);

        let err = book.advance(&id, OrderEvent::Complete, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(book.get(&id).unwrap().status, OrderStatus::Pending);

        assert!(matches!(
            book.advance("missing", OrderEvent::Cancel, Utc::now()),
            Err(CoreError::OrderNotFound(_))
        ));
    }

    #[test]
    fn test_summary_counts_completed_revenue() {
        let mut ledger = Ledger::default();
        let mut book = OrderBook::new();
        let done = place(&mut ledger, &mut book, 10000);
        let cancelled = place(&mut ledger, &mut book, 20000);
        place(&mut ledger, &mut book, 30000);

        for event in [OrderEvent::StartPreparing, OrderEvent::MarkReady, OrderEvent::Complete] {
            book.advance(&done, event, Utc::now()).unwrap();
        }
        book.advance(&cancelled, OrderEvent::Cancel, Utc::now()).unwrap();

        let summary = book.summary();
        assert_eq!(summary.total_orders, 3);
        assert_eq!(summary.by_status["completed"], 1);
        assert_eq!(summary.by_status["cancelled"], 1);
        assert_eq!(summary.by_status["pending"], 1);
        assert_eq!(summary.by_status["ready"], 0);
        // 100.00 + 12% tax
        assert_eq!(summary.completed_revenue_cents, 11200);
    }

    #[test]
    fn test_summary_revenue_saturates() {
        let mut ledger = Ledger::default();
        let mut book = OrderBook::new();
        place(&mut ledger, &mut book, 10000);
        place(&mut ledger, &mut book, 10000);

        for order in &mut book.orders {
            order.status = OrderStatus::Completed;
            order.total_cents = i64::MAX;
        }

        assert_eq!(book.summary().completed_revenue_cents, i64::MAX);
    }
}
