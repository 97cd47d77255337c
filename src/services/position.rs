//! `BondPositionService`: derives per-book positions from booked
//! trades. A CUSIP's [`Position`] is created lazily, zeroed, on first sight.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::domain::trade::{Side, Trade};
use crate::domain::Position;
use crate::graph::{Service, ServiceListener};

pub struct PositionService {
    inner: Service<String, Position>,
    positions: Mutex<HashMap<String, Position>>,
}

impl PositionService {
    pub fn new() -> Self {
        Self {
            inner: Service::new(),
            positions: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &Service<String, Position> {
        &self.inner
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<Position>>) {
        self.inner.add_listener(listener);
    }
}

impl Default for PositionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceListener<Trade> for PositionService {
    fn process_add(&self, trade: &Trade) {
        let cusip = trade.product.product_id.clone();
        let delta = match trade.side {
            Side::Buy => trade.quantity,
            Side::Sell => -trade.quantity,
        };

        let updated = {
            let mut positions = self.positions.lock();
            let position = positions
                .entry(cusip.clone())
                .or_insert_with(|| Position::new(trade.product.clone()));
            position.add_position(trade.book.clone(), delta);
            position.clone()
        };

        self.inner.on_message(cusip, updated);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bond;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn bond() -> Bond {
        Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap())
    }

    fn trade(side: Side, quantity: i64) -> Trade {
        Trade::new(bond(), "E1", Decimal::new(99, 0), "TRSY1", quantity, side)
    }

    #[test]
    fn buy_then_sell_nets_the_aggregate() {
        let service = PositionService::new();
        service.process_add(&trade(Side::Buy, 1_000_000));
        service.process_add(&trade(Side::Sell, 400_000));

        let position = service.inner.get_data(&"91282CLY5".to_string()).unwrap();
        assert_eq!(position.aggregate(), 600_000);
        assert_eq!(position.book_position("TRSY1"), 600_000);
    }
}
