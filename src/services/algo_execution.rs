//! `BondAlgoExecutionService`: aggresses the top of book when the
//! spread is tight enough, alternating which side it takes on every
//! qualifying event.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use rust_decimal::Decimal;

use crate::domain::execution_order::{AlgoExecution, ExecutionOrder, OrderType};
use crate::domain::order::PricingSide;
use crate::domain::OrderBook;
use crate::graph::{Service, ServiceListener};

/// 1/128 plus a small epsilon so an exact 1/128 spread is admitted despite
/// `Decimal` rounding on the division.
const MAX_SPREAD_128THS: Decimal = Decimal::from_parts(78125, 0, 0, false, 7); // 0.0078125 = 1/128
const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 5); // 0.00001

pub struct AlgoExecutionService {
    inner: Service<String, AlgoExecution>,
    next_order_id: AtomicU64,
    next_is_buy: AtomicBool,
}

impl AlgoExecutionService {
    pub fn new() -> Self {
        Self {
            inner: Service::new(),
            next_order_id: AtomicU64::new(1),
            next_is_buy: AtomicBool::new(true),
        }
    }

    pub fn inner(&self) -> &Service<String, AlgoExecution> {
        &self.inner
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<AlgoExecution>>) {
        self.inner.add_listener(listener);
    }

    fn try_aggress(&self, book: &OrderBook) -> Option<ExecutionOrder> {
        let bid = book.best_bid()?;
        let offer = book.best_offer()?;

        let spread = offer.price - bid.price;
        if spread > MAX_SPREAD_128THS + EPSILON {
            return None;
        }

        let is_buy_cycle = self.next_is_buy.fetch_xor(true, Ordering::SeqCst);
        let (taken, emitted_side) = if is_buy_cycle {
            (offer, PricingSide::Bid)
        } else {
            (bid, PricingSide::Offer)
        };

        let order_id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        let order_id = format!("{order_id:08}");

        Some(ExecutionOrder::new(
            book.product.clone(),
            emitted_side,
            order_id.clone(),
            OrderType::Market,
            taken.price,
            taken.quantity,
            0,
            order_id,
            false,
        ))
    }
}

impl Default for AlgoExecutionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceListener<OrderBook> for AlgoExecutionService {
    fn process_add(&self, book: &OrderBook) {
        if let Some(order) = self.try_aggress(book) {
            let cusip = order.product.product_id.clone();
            self.inner.on_message(cusip, AlgoExecution::new(order));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::Order;
    use crate::domain::Bond;
    use chrono::NaiveDate;

    fn bond() -> Bond {
        Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap())
    }

    fn book(bid: Decimal, offer: Decimal, qty: i64) -> OrderBook {
        OrderBook::new(
            bond(),
            vec![Order::new(bid, qty, PricingSide::Bid)],
            vec![Order::new(offer, qty, PricingSide::Offer)],
        )
    }

    #[test]
    fn drops_when_spread_too_wide() {
        let algo = AlgoExecutionService::new();
        let wide = book(Decimal::new(99, 0), Decimal::new(100, 0), 10_000_000);
        assert!(algo.try_aggress(&wide).is_none());
    }

    #[test]
    fn drops_when_either_side_empty() {
        let algo = AlgoExecutionService::new();
        let empty = OrderBook::new(bond(), vec![], vec![]);
        assert!(algo.try_aggress(&empty).is_none());
    }

    #[test]
    fn alternates_side_across_qualifying_events() {
        let algo = AlgoExecutionService::new();
        let tight = book(Decimal::new(99515625, 6), Decimal::new(99515625, 6) + MAX_SPREAD_128THS, 10_000_000);

        let first = algo.try_aggress(&tight).unwrap();
        let second = algo.try_aggress(&tight).unwrap();

        assert_eq!(first.side, PricingSide::Bid);
        assert_eq!(second.side, PricingSide::Offer);
        assert_eq!(first.visible_quantity, 10_000_000);
        assert_eq!(first.order_id.len(), 8);
    }
}
