//! `BondInquiryService`: the RECEIVED → QUOTED → DONE state machine,
//! with the quote step re-entering the same store so listeners observe all
//! three transitions for every inquiry.

use rust_decimal::Decimal;

use crate::domain::{Inquiry, InquiryState};
use crate::graph::{Service, ServiceListener};

/// Every inquiry is quoted at par regardless of the underlying bond. This
/// looks like a placeholder for a real pricer rather than a deliberate
/// business rule, but nothing downstream depends on it being anything else.
const QUOTE_PRICE: Decimal = Decimal::ONE_HUNDRED;

pub struct InquiryService {
    inner: Service<String, Inquiry>,
}

impl InquiryService {
    pub fn new() -> Self {
        Self { inner: Service::new() }
    }

    pub fn inner(&self) -> &Service<String, Inquiry> {
        &self.inner
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<Inquiry>>) {
        self.inner.add_listener(listener);
    }

    /// Entry point for every inbound inquiry record, and for the internal
    /// re-publish steps that drive it through QUOTED and DONE. Stores and
    /// notifies unconditionally; a RECEIVED inquiry additionally triggers
    /// `SendQuote`, which is this same recursive call with the state and
    /// price advanced.
    pub fn receive(&self, inquiry: Inquiry) {
        self.inner.on_message(inquiry.inquiry_id.clone(), inquiry.clone());

        if inquiry.state != InquiryState::Received {
            return;
        }

        let quoted = inquiry.with_price(QUOTE_PRICE).with_state(InquiryState::Quoted);
        self.receive(quoted.clone());

        let done = quoted.with_state(InquiryState::Done);
        self.receive(done);
    }
}

impl Default for InquiryService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trade::Side;
    use crate::domain::Bond;
    use chrono::NaiveDate;

    fn bond() -> Bond {
        Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap())
    }

    #[test]
    fn an_inquiry_settles_through_three_states_at_par() {
        let service = InquiryService::new();
        let inquiry = Inquiry::new("INQ001", bond(), Side::Buy, 10, Decimal::ZERO, InquiryState::Received);

        service.receive(inquiry);

        let stored = service.inner.get_data(&"INQ001".to_string()).unwrap();
        assert_eq!(stored.state, InquiryState::Done);
        assert_eq!(stored.price, QUOTE_PRICE);
    }

    #[test]
    fn a_quoted_inquiry_does_not_retrigger_the_quote_step() {
        let service = InquiryService::new();
        let quoted = Inquiry::new("INQ002", bond(), Side::Sell, 5, QUOTE_PRICE, InquiryState::Quoted);

        service.receive(quoted);

        let stored = service.inner.get_data(&"INQ002".to_string()).unwrap();
        assert_eq!(stored.state, InquiryState::Quoted);
    }
}
