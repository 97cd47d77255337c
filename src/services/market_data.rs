//! `BondMarketDataService`: the primary store of the latest
//! [`OrderBook`] per CUSIP, plus the two read-side queries it exposes.

use crate::domain::order::BidOffer;
use crate::domain::OrderBook;
use crate::error::GraphError;
use crate::graph::Service;

pub type MarketDataService = Service<String, OrderBook>;

/// `GetBestBidOffer` — the top-of-book pair for `cusip`, or an error if the
/// CUSIP has no book yet or either side is empty.
pub fn get_best_bid_offer(service: &MarketDataService, cusip: &str) -> Result<BidOffer, GraphError> {
    let book = service.get_data(&cusip.to_string())?;
    let bid = book.best_bid().cloned().ok_or(GraphError::UnknownKey)?;
    let offer = book.best_offer().cloned().ok_or(GraphError::UnknownKey)?;
    Ok(BidOffer { bid, offer })
}

/// `AggregateDepth` — the full book for `cusip`. Room for a richer rollup
/// than top-of-book later; for now it is the identity.
pub fn aggregate_depth(service: &MarketDataService, cusip: &str) -> Result<OrderBook, GraphError> {
    service.get_data(&cusip.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Order, PricingSide};
    use crate::domain::Bond;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn bond() -> Bond {
        Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap())
    }

    #[test]
    fn best_bid_offer_returns_top_of_book() {
        let service = MarketDataService::new();
        let book = OrderBook::new(
            bond(),
            vec![Order::new(Decimal::new(99, 0), 10_000_000, PricingSide::Bid)],
            vec![Order::new(Decimal::new(100, 0), 10_000_000, PricingSide::Offer)],
        );
        service.on_message("91282CLY5".to_string(), book);

        let top = get_best_bid_offer(&service, "91282CLY5").unwrap();
        assert_eq!(top.bid.price, Decimal::new(99, 0));
        assert_eq!(top.offer.price, Decimal::new(100, 0));
    }

    #[test]
    fn unknown_cusip_errors() {
        let service = MarketDataService::new();
        assert!(get_best_bid_offer(&service, "nope").is_err());
    }
}
