//! Algorithmic streaming quotes: two-sided, with a visible/hidden size split.

use rust_decimal::Decimal;

use crate::domain::bond::Bond;
use crate::domain::order::PricingSide;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceStreamOrder {
    pub price: Decimal,
    pub visible_quantity: i64,
    pub hidden_quantity: i64,
    pub side: PricingSide,
}

impl PriceStreamOrder {
    pub fn new(price: Decimal, visible_quantity: i64, hidden_quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            visible_quantity,
            hidden_quantity,
            side,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceStream {
    pub product: Bond,
    pub bid: PriceStreamOrder,
    pub offer: PriceStreamOrder,
}

impl PriceStream {
    pub fn new(product: Bond, bid: PriceStreamOrder, offer: PriceStreamOrder) -> Self {
        Self { product, bid, offer }
    }
}

/// Wraps a [`PriceStream`] as the value emitted by `BondAlgoStreamingService`
/// — kept as its own type so listeners can distinguish "an algo
/// produced this" from a raw price stream constructed elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlgoStream {
    pub price_stream: PriceStream,
}

impl AlgoStream {
    pub fn new(price_stream: PriceStream) -> Self {
        Self { price_stream }
    }
}
