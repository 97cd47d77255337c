//! `BondAlgoStreamingService`: derives a two-sided [`AlgoStream`] from
//! each [`Price`], with visible/hidden sizes that alternate between two
//! regimes on a single process-wide toggle.

use std::sync::atomic::{AtomicBool, Ordering};

use rust_decimal::Decimal;

use crate::domain::order::PricingSide;
use crate::domain::price_stream::{AlgoStream, PriceStream, PriceStreamOrder};
use crate::domain::Price;
use crate::graph::{Service, ServiceListener};

const PHASE_A_VISIBLE: i64 = 1_000_000;
const PHASE_A_HIDDEN: i64 = 2_000_000;
const PHASE_B_VISIBLE: i64 = 2_000_000;
const PHASE_B_HIDDEN: i64 = 4_000_000;

pub struct AlgoStreamingService {
    inner: Service<String, AlgoStream>,
    phase_b: AtomicBool,
}

impl AlgoStreamingService {
    pub fn new() -> Self {
        Self {
            inner: Service::new(),
            phase_b: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &Service<String, AlgoStream> {
        &self.inner
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<AlgoStream>>) {
        self.inner.add_listener(listener);
    }

    fn derive(&self, price: &Price) -> AlgoStream {
        let half_spread = price.bid_offer_spread / Decimal::from(2);
        let bid_price = price.mid - half_spread;
        let offer_price = price.mid + half_spread;

        let use_phase_b = self.phase_b.fetch_xor(true, Ordering::SeqCst);
        let (visible, hidden) = if use_phase_b {
            (PHASE_B_VISIBLE, PHASE_B_HIDDEN)
        } else {
            (PHASE_A_VISIBLE, PHASE_A_HIDDEN)
        };

        let bid = PriceStreamOrder::new(bid_price, visible, hidden, PricingSide::Bid);
        let offer = PriceStreamOrder::new(offer_price, visible, hidden, PricingSide::Offer);
        AlgoStream::new(PriceStream::new(price.product.clone(), bid, offer))
    }
}

impl Default for AlgoStreamingService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceListener<Price> for AlgoStreamingService {
    fn process_add(&self, price: &Price) {
        let stream = self.derive(price);
        self.inner.on_message(price.product.product_id.clone(), stream);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bond;
    use chrono::NaiveDate;

    fn price() -> Price {
        Price::new(
            Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap()),
            Decimal::new(99515625, 6),
            Decimal::new(1, 0) / Decimal::from(128),
        )
    }

    #[test]
    fn alternates_visible_hidden_sizes_across_emissions() {
        let algo = AlgoStreamingService::new();
        algo.process_add(&price());
        let first = algo.inner.get_data(&"91282CLY5".to_string()).unwrap();
        algo.process_add(&price());
        let second = algo.inner.get_data(&"91282CLY5".to_string()).unwrap();

        assert_eq!(first.price_stream.bid.visible_quantity, PHASE_A_VISIBLE);
        assert_eq!(first.price_stream.bid.hidden_quantity, PHASE_A_HIDDEN);
        assert_eq!(second.price_stream.bid.visible_quantity, PHASE_B_VISIBLE);
        assert_eq!(second.price_stream.bid.hidden_quantity, PHASE_B_HIDDEN);
    }

    #[test]
    fn bid_and_offer_straddle_the_mid_by_half_spread() {
        let algo = AlgoStreamingService::new();
        algo.process_add(&price());
        let stream = algo.inner.get_data(&"91282CLY5".to_string()).unwrap();
        let p = price();
        assert_eq!(stream.price_stream.bid.price, p.mid - p.bid_offer_spread / Decimal::from(2));
        assert_eq!(stream.price_stream.offer.price, p.mid + p.bid_offer_spread / Decimal::from(2));
    }
}
