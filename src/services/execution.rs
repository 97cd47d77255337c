//! `BondExecutionService`: the sink for [`AlgoExecution`] events.
//! Upserts the underlying [`ExecutionOrder`], republishes a CSV line over the
//! port 3000 outbound socket, and fans out to its listeners — including the
//! trade-booking converter that closes the Execution → TradeBooking loop.

use crate::connectors::outbound::OutboundConnector;
use crate::domain::execution_order::{AlgoExecution, ExecutionOrder};
use crate::domain::order::PricingSide;
use crate::graph::{Service, ServiceListener};

pub struct ExecutionService {
    inner: Service<String, ExecutionOrder>,
    outbound: OutboundConnector,
}

impl ExecutionService {
    pub fn new(outbound: OutboundConnector) -> Self {
        Self {
            inner: Service::new(),
            outbound,
        }
    }

    pub fn inner(&self) -> &Service<String, ExecutionOrder> {
        &self.inner
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<ExecutionOrder>>) {
        self.inner.add_listener(listener);
    }
}

/// `CUSIP, orderId, orderType, BUY|SELL, price, visibleQuantity`. The
/// pricing side names the aggressor: BID means this order bought, OFFER
/// means it sold.
pub fn to_csv_line(order: &ExecutionOrder) -> String {
    let verb = match order.side {
        PricingSide::Bid => "BUY",
        PricingSide::Offer => "SELL",
    };
    format!(
        "{}, {}, {:?}, {}, {}, {}",
        order.product.product_id, order.order_id, order.order_type, verb, order.price, order.visible_quantity
    )
}

impl ServiceListener<AlgoExecution> for ExecutionService {
    fn process_add(&self, execution: &AlgoExecution) {
        let order = &execution.execution_order;
        self.inner.on_message(order.product.product_id.clone(), order.clone());
        self.outbound.publish_line(&to_csv_line(order));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution_order::OrderType;
    use crate::domain::Bond;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    #[test]
    fn bid_side_renders_as_buy() {
        let order = ExecutionOrder::new(
            Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap()),
            PricingSide::Bid,
            "00000001".to_string(),
            OrderType::Market,
            Decimal::new(99515625, 6),
            10_000_000,
            0,
            "00000001".to_string(),
            false,
        );
        assert!(to_csv_line(&order).contains("BUY"));
    }
}
