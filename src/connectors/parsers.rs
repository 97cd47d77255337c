//! Line parsers for the four inbound wire formats. Character offsets
//! here are load-bearing — they mirror the fixed-width layout specified for
//! each feed, not a delimiter-driven format.

use rust_decimal::Decimal;

use crate::connectors::reference::BondMap;
use crate::domain::order::{Order, OrderBook, PricingSide};
use crate::domain::price::{decode_fractional_price, Price};
use crate::domain::trade::{Side, Trade};
use crate::domain::{Inquiry, InquiryState};
use crate::error::ParseError;

fn resolve<'a>(bonds: &'a BondMap, cusip: &str, line: &str) -> Result<&'a crate::domain::Bond, ParseError> {
    bonds.get(cusip).ok_or_else(|| ParseError::UnknownCusip {
        cusip: cusip.to_string(),
        line: line.to_string(),
    })
}

/// Parses one line on the prices feed (port 8080):
/// `CUSIP(9) " " price(7) " " spread-digit(1)`.
pub fn parse_price_line(line: &str, bonds: &BondMap) -> Result<Price, ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() < 3 {
        return Err(ParseError::LineTooShort {
            expected: 3,
            actual: fields.len(),
            line: line.to_string(),
        });
    }

    let cusip = fields[0];
    let bond = resolve(bonds, cusip, line)?;

    let mid = decode_fractional_price(fields[1], line)?;

    let spread_digit: i64 = fields[2].parse().map_err(|_| ParseError::InvalidField {
        field: "spread",
        value: fields[2].to_string(),
        line: line.to_string(),
    })?;
    let spread = Decimal::from(spread_digit) / Decimal::from(128);

    Ok(Price::new(bond.clone(), mid, spread))
}

/// Parses one line on the trades feed (port 8081):
/// `CUSIP(9) " " tradeId(6) " " price(3) " " book(5) " " qty(7) " " side(1)`.
pub fn parse_trade_line(line: &str, bonds: &BondMap) -> Result<Trade, ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() < 6 {
        return Err(ParseError::LineTooShort {
            expected: 6,
            actual: fields.len(),
            line: line.to_string(),
        });
    }

    let cusip = fields[0];
    let bond = resolve(bonds, cusip, line)?;

    let trade_id = fields[1].to_string();

    let price: Decimal = fields[2].parse().map_err(|_| ParseError::InvalidField {
        field: "price",
        value: fields[2].to_string(),
        line: line.to_string(),
    })?;

    let book = fields[3].to_string();

    let quantity: i64 = fields[4].parse().map_err(|_| ParseError::InvalidField {
        field: "quantity",
        value: fields[4].to_string(),
        line: line.to_string(),
    })?;

    let side = if fields[5] == "0" { Side::Buy } else { Side::Sell };

    Ok(Trade::new(bond.clone(), trade_id, price, book, quantity, side))
}

/// Parses one line on the market-data feed (port 8082):
/// `CUSIP, ` followed by repeating `side(0|1), price("DDD-FFS"), qtyCode`
/// triples where `qtyCode` is one of `10M`..`50M`.
pub fn parse_market_data_line(line: &str, bonds: &BondMap) -> Result<OrderBook, ParseError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.is_empty() {
        return Err(ParseError::MalformedMarketData(line.to_string()));
    }

    let cusip = fields[0];
    let bond = resolve(bonds, cusip, line)?;

    let tuples = &fields[1..];
    if tuples.len() % 3 != 0 || tuples.is_empty() {
        return Err(ParseError::MalformedMarketData(line.to_string()));
    }

    let mut bid_stack = Vec::new();
    let mut offer_stack = Vec::new();

    for chunk in tuples.chunks(3) {
        let [side_field, price_field, qty_field] = chunk else {
            return Err(ParseError::MalformedMarketData(line.to_string()));
        };

        let side = match *side_field {
            "0" => PricingSide::Bid,
            "1" => PricingSide::Offer,
            other => {
                return Err(ParseError::InvalidField {
                    field: "side",
                    value: other.to_string(),
                    line: line.to_string(),
                })
            }
        };

        let price = decode_fractional_price(price_field, line)?;
        let quantity = parse_qty_code(qty_field, line)?;

        let order = Order::new(price, quantity, side);
        match side {
            PricingSide::Bid => bid_stack.push(order),
            PricingSide::Offer => offer_stack.push(order),
        }
    }

    Ok(OrderBook::new(bond.clone(), bid_stack, offer_stack))
}

/// Decodes a `"10M"`..`"50M"` quantity code into its unit count.
fn parse_qty_code(field: &str, line: &str) -> Result<i64, ParseError> {
    let digits = field.strip_suffix('M').ok_or_else(|| ParseError::InvalidField {
        field: "qty",
        value: field.to_string(),
        line: line.to_string(),
    })?;
    let millions: i64 = digits.parse().map_err(|_| ParseError::InvalidField {
        field: "qty",
        value: field.to_string(),
        line: line.to_string(),
    })?;
    Ok(millions * 1_000_000)
}

/// Parses one line on the inquiries feed (port 8083):
/// `inquiryId(6) " " CUSIP(9) " " side(1) " " qty(3)`.
pub fn parse_inquiry_line(line: &str, bonds: &BondMap) -> Result<Inquiry, ParseError> {
    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() < 4 {
        return Err(ParseError::LineTooShort {
            expected: 4,
            actual: fields.len(),
            line: line.to_string(),
        });
    }

    let inquiry_id = fields[0].to_string();
    let cusip = fields[1];
    let bond = resolve(bonds, cusip, line)?;

    let side = if fields[2] == "0" { Side::Buy } else { Side::Sell };

    let quantity: i64 = fields[3].parse().map_err(|_| ParseError::InvalidField {
        field: "quantity",
        value: fields[3].to_string(),
        line: line.to_string(),
    })?;

    Ok(Inquiry::new(
        inquiry_id,
        bond.clone(),
        side,
        quantity,
        Decimal::ZERO,
        InquiryState::Received,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;

    fn bonds() -> BondMap {
        let mut map = HashMap::new();
        map.insert(
            "91282CLY5".to_string(),
            crate::domain::Bond::new(
                "91282CLY5",
                "T",
                Decimal::new(1625, 3),
                NaiveDate::from_ymd_opt(2026, 5, 15).unwrap(),
            ),
        );
        Arc::new(map)
    }

    #[test]
    fn parses_price_line_with_half_thirty_second() {
        let price = parse_price_line("91282CLY5 099-16+ 1", &bonds()).unwrap();
        assert_eq!(price.mid, Decimal::new(99515625, 6));
        assert_eq!(price.bid_offer_spread, Decimal::new(1, 0) / Decimal::from(128));
    }

    #[test]
    fn rejects_unknown_cusip() {
        let err = parse_price_line("000000000 099-000 1", &bonds()).unwrap_err();
        assert!(matches!(err, ParseError::UnknownCusip { .. }));
    }

    #[test]
    fn parses_market_data_line_into_two_stacks() {
        let book = parse_market_data_line("91282CLY5, 0, 099-160, 10M, 1, 099-16+, 10M", &bonds()).unwrap();
        assert_eq!(book.bid_stack.len(), 1);
        assert_eq!(book.offer_stack.len(), 1);
        assert_eq!(book.bid_stack[0].quantity, 10_000_000);
    }

    #[test]
    fn parses_trade_line_buy_side() {
        let trade = parse_trade_line("91282CLY5 T00001 099 TRSY1 1000000 0", &bonds()).unwrap();
        assert_eq!(trade.side, Side::Buy);
        assert_eq!(trade.quantity, 1_000_000);
        assert_eq!(trade.book, "TRSY1");
    }

    #[test]
    fn parses_inquiry_line() {
        let inquiry = parse_inquiry_line("INQ001 91282CLY5 0 010", &bonds()).unwrap();
        assert_eq!(inquiry.state, InquiryState::Received);
        assert_eq!(inquiry.quantity, 10);
    }
}
