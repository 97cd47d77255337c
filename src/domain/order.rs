//! Market-data order book: top-of-book stacks per side.

use rust_decimal::Decimal;

use crate::domain::bond::Bond;

/// Which side of the book a quote sits on. Distinct from [`crate::domain::trade::Side`]
/// (BUY/SELL) — a pricing side describes a quote, a trade side describes an
/// executed fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingSide {
    Bid,
    Offer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub price: Decimal,
    pub quantity: i64,
    pub side: PricingSide,
}

impl Order {
    pub fn new(price: Decimal, quantity: i64, side: PricingSide) -> Self {
        Self {
            price,
            quantity,
            side,
        }
    }
}

/// Full depth for one CUSIP. Top of book is index 0 on each stack; both
/// stacks are ordered by the venue, not re-sorted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBook {
    pub product: Bond,
    pub bid_stack: Vec<Order>,
    pub offer_stack: Vec<Order>,
}

impl OrderBook {
    pub fn new(product: Bond, bid_stack: Vec<Order>, offer_stack: Vec<Order>) -> Self {
        Self {
            product,
            bid_stack,
            offer_stack,
        }
    }

    pub fn best_bid(&self) -> Option<&Order> {
        self.bid_stack.first()
    }

    pub fn best_offer(&self) -> Option<&Order> {
        self.offer_stack.first()
    }
}

/// Top-of-book pair returned by `GetBestBidOffer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidOffer {
    pub bid: Order,
    pub offer: Order,
}
