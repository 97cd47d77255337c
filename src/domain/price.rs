//! The quoted price primary type, and the fractional-32nds wire codec shared
//! by the price/market-data connectors and the GUI formatter.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::bond::Bond;
use crate::error::ParseError;

/// A two-sided quote: `mid` and `bid_offer_spread` are both kept as
/// [`Decimal`] so that halving a spread or summing many mids across a long
/// run never drifts off the 256ths grid the wire format is defined on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Price {
    pub product: Bond,
    pub mid: Decimal,
    pub bid_offer_spread: Decimal,
}

impl Price {
    pub fn new(product: Bond, mid: Decimal, bid_offer_spread: Decimal) -> Self {
        Self {
            product,
            mid,
            bid_offer_spread,
        }
    }
}

/// Decodes a 7-character `"DDD-FFS"` price field: 3-digit integer part, a
/// literal `-`, 2-digit 32nds, and a final character that is either a digit
/// (256ths beyond the 32nd boundary) or `+` (the half-32nd, 4/256).
pub fn decode_fractional_price(field: &str, line: &str) -> Result<Decimal, ParseError> {
    if field.len() != 7 {
        return Err(ParseError::InvalidField {
            field: "price",
            value: field.to_string(),
            line: line.to_string(),
        });
    }
    let bytes = field.as_bytes();
    let invalid = || ParseError::InvalidField {
        field: "price",
        value: field.to_string(),
        line: line.to_string(),
    };

    let whole: i64 = field[0..3].parse().map_err(|_| invalid())?;
    if bytes[3] != b'-' {
        return Err(invalid());
    }
    let thirty_seconds: i64 = field[4..6].parse().map_err(|_| invalid())?;
    let last = &field[6..7];

    let mut price = Decimal::from(whole) + Decimal::from(thirty_seconds) / dec!(32);
    if last == "+" {
        price += dec!(1) / dec!(64);
    } else {
        let two_fifty_sixths: i64 = last.parse().map_err(|_| invalid())?;
        price += Decimal::from(two_fifty_sixths) / dec!(256);
    }
    Ok(price)
}

/// Encodes a price back to the `"DDD-FFS"` wire grid. Inverse of
/// [`decode_fractional_price`] on the representable grid (k ∈ [0,31], j ∈
/// {0,2,4}); `j == 4` is emitted as `+` to stay consistent with the decoder's
/// half-32nd handling.
pub fn encode_fractional_price(price: Decimal) -> String {
    let whole = price.trunc();
    let total_256ths = (price * dec!(256)).round();
    let thirty_seconds = ((total_256ths % dec!(256)) / dec!(8)).trunc();
    let remainder_256ths = (total_256ths % dec!(8)).trunc();

    let last = if remainder_256ths == dec!(4) {
        "+".to_string()
    } else {
        remainder_256ths.to_string()
    };

    format!("{whole:03}-{thirty_seconds:02}{last}")
}

/// Formats a price as `"100-082"`/`"100-08+"` for GUI display; this is
/// exactly [`encode_fractional_price`] but named for its call site so the
/// GUI formatter reads as what it is, not as a generic codec call.
pub fn format_mid_fractional(mid: Decimal) -> String {
    encode_fractional_price(mid)
}

/// Formats a bid-offer spread as an integer count of 256ths, e.g. `"2/256"`.
pub fn format_spread_256th(spread: Decimal) -> String {
    let as_256ths = (spread * dec!(256)).round();
    format!("{as_256ths}/256")
}
