//! `TradeBookingService`: the primary trade store, keyed by trade id,
//! fed both directly from the trades wire feed and from the execution
//! feedback loop via [`ExecutionToTradeListener`].

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::domain::execution_order::ExecutionOrder;
use crate::domain::order::PricingSide;
use crate::domain::trade::{Side, Trade};
use crate::graph::{Service, ServiceListener};

pub type TradeBookingService = Service<String, Trade>;

const BOOKS: [&str; 3] = ["TRSY1", "TRSY2", "TRSY3"];

/// Converts every executed order into a booked [`Trade`]. The round-robin
/// book index and the trade id suffix share one counter that is incremented
/// *before* either is derived — so the first execution lands on `TRSY2` with
/// id `E1`, not on `TRSY1` with id `E0`. Intentional, not a fencepost bug —
/// downstream reconciliation keys off this exact numbering.
pub struct ExecutionToTradeListener {
    sequence: AtomicI64,
    trade_booking: Arc<TradeBookingService>,
}

impl ExecutionToTradeListener {
    pub fn new(trade_booking: Arc<TradeBookingService>) -> Self {
        Self {
            sequence: AtomicI64::new(0),
            trade_booking,
        }
    }
}

impl ServiceListener<ExecutionOrder> for ExecutionToTradeListener {
    fn process_add(&self, order: &ExecutionOrder) {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let book = BOOKS[(sequence as usize) % 3];
        let trade_id = format!("E{sequence}");

        let side = match order.side {
            PricingSide::Bid => Side::Buy,
            PricingSide::Offer => Side::Sell,
        };
        let quantity = order.visible_quantity + order.hidden_quantity;

        let trade = Trade::new(order.product.clone(), trade_id.clone(), order.price, book, quantity, side);
        self.trade_booking.on_message(trade_id, trade);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution_order::OrderType;
    use crate::domain::Bond;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn order() -> ExecutionOrder {
        ExecutionOrder::new(
            Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap()),
            PricingSide::Bid,
            "00000001".to_string(),
            OrderType::Market,
            Decimal::new(99515625, 6),
            10_000_000,
            0,
            "00000001".to_string(),
            false,
        )
    }

    #[test]
    fn first_execution_books_to_trsy2_with_id_e1() {
        let booking = Arc::new(TradeBookingService::new());
        let listener = ExecutionToTradeListener::new(booking.clone());

        listener.process_add(&order());

        let trade = booking.get_data(&"E1".to_string()).unwrap();
        assert_eq!(trade.book, "TRSY2");
        assert_eq!(trade.trade_id, "E1");
        assert_eq!(trade.side, Side::Buy);
    }

    #[test]
    fn second_execution_books_to_trsy3_with_id_e2() {
        let booking = Arc::new(TradeBookingService::new());
        let listener = ExecutionToTradeListener::new(booking.clone());

        listener.process_add(&order());
        listener.process_add(&order());

        let trade = booking.get_data(&"E2".to_string()).unwrap();
        assert_eq!(trade.book, "TRSY3");
    }
}
