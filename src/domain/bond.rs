//! The reference product: an immutable bond definition keyed by CUSIP.

use chrono::NaiveDate;

/// A US Treasury bond, identified by its nine-character CUSIP. Immutable once
/// loaded from the reference CSV — no service ever mutates a `Bond`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bond {
    pub product_id: String,
    pub ticker: String,
    pub coupon: rust_decimal::Decimal,
    pub maturity_date: NaiveDate,
}

impl Bond {
    pub fn new(
        product_id: impl Into<String>,
        ticker: impl Into<String>,
        coupon: rust_decimal::Decimal,
        maturity_date: NaiveDate,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            ticker: ticker.into(),
            coupon,
            maturity_date,
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}
