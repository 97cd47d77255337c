//! Booked trades.

use rust_decimal::Decimal;

use crate::domain::bond::Bond;

/// BUY/SELL on a booked trade. Distinct from [`crate::domain::order::PricingSide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trade {
    pub product: Bond,
    pub trade_id: String,
    pub price: Decimal,
    pub book: String,
    pub quantity: i64,
    pub side: Side,
}

impl Trade {
    pub fn new(
        product: Bond,
        trade_id: impl Into<String>,
        price: Decimal,
        book: impl Into<String>,
        quantity: i64,
        side: Side,
    ) -> Self {
        Self {
            product,
            trade_id: trade_id.into(),
            price,
            book: book.into(),
            quantity,
            side,
        }
    }
}
