//! Customer inquiries and their state machine.

use rust_decimal::Decimal;

use crate::domain::bond::Bond;
use crate::domain::trade::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryState {
    Received,
    Quoted,
    Done,
    Rejected,
    CustomerRejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub inquiry_id: String,
    pub product: Bond,
    pub side: Side,
    pub quantity: i64,
    pub price: Decimal,
    pub state: InquiryState,
}

impl Inquiry {
    pub fn new(
        inquiry_id: impl Into<String>,
        product: Bond,
        side: Side,
        quantity: i64,
        price: Decimal,
        state: InquiryState,
    ) -> Self {
        Self {
            inquiry_id: inquiry_id.into(),
            product,
            side,
            quantity,
            price,
            state,
        }
    }

    pub fn with_price(&self, price: Decimal) -> Self {
        let mut next = self.clone();
        next.price = price;
        next
    }

    pub fn with_state(&self, state: InquiryState) -> Self {
        let mut next = self.clone();
        next.state = state;
        next
    }
}
