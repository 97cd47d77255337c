//! Loads the static CUSIP → [`Bond`] table from `TBonds.csv` at startup.
//! The resulting map is immutable for the life of the process
//! and is shared with every connector and service via `Arc`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use crate::domain::Bond;
use crate::error::ReferenceDataError;

pub type BondMap = Arc<HashMap<String, Bond>>;

/// Reads `path`, a CSV with columns `productId, _, ticker, coupon,
/// maturityDate(MM/DD/YY(YY))`, and builds the reference map. A malformed row
/// is logged and skipped rather than aborting the whole load; an unreadable
/// file is fatal since nothing downstream can resolve a CUSIP without it.
pub fn load_bond_map(path: impl AsRef<Path>) -> Result<BondMap, ReferenceDataError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut map = HashMap::new();
    for (line_number, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_row(line) {
            Ok(bond) => {
                map.insert(bond.product_id.clone(), bond);
            }
            Err(reason) => {
                warn!(path = %path.display(), line_number, %reason, "skipping malformed reference line");
            }
        }
    }

    Ok(Arc::new(map))
}

fn parse_row(line: &str) -> Result<Bond, String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 5 {
        return Err(format!("expected 5 columns, got {}", fields.len()));
    }

    let product_id = fields[0].to_string();
    let ticker = fields[2].to_string();
    let coupon: Decimal = fields[3]
        .parse()
        .map_err(|_| format!("invalid coupon {:?}", fields[3]))?;
    let maturity_date = parse_maturity_date(fields[4])?;

    Ok(Bond::new(product_id, ticker, coupon, maturity_date))
}

/// Parses `MM/DD/YY` or `MM/DD/YYYY`, normalising a two-digit year to
/// `2000 + yy`.
fn parse_maturity_date(field: &str) -> Result<NaiveDate, String> {
    let parts: Vec<&str> = field.split('/').collect();
    if parts.len() != 3 {
        return Err(format!("invalid maturity date {field:?}"));
    }
    let month: u32 = parts[0].parse().map_err(|_| format!("invalid month in {field:?}"))?;
    let day: u32 = parts[1].parse().map_err(|_| format!("invalid day in {field:?}"))?;
    let mut year: i32 = parts[2].parse().map_err(|_| format!("invalid year in {field:?}"))?;
    if year < 100 {
        year += 2000;
    }

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| format!("out-of-range date {field:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_digit_year() {
        let bond = parse_row("91282CLY5,T,1.625,1.625,05/15/26").unwrap();
        assert_eq!(bond.maturity_date, NaiveDate::from_ymd_opt(2026, 5, 15).unwrap());
    }

    #[test]
    fn parses_four_digit_year() {
        let bond = parse_row("91282CLY5,T,1.625,1.625,05/15/2026").unwrap();
        assert_eq!(bond.maturity_date.format("%Y").to_string(), "2026");
    }

    #[test]
    fn rejects_short_row() {
        assert!(parse_row("91282CLY5,T,1.625").is_err());
    }

    #[test]
    fn skips_malformed_rows_without_failing_the_whole_load(
    ) {
        let dir = std::env::temp_dir().join("bond_trading_pipeline_reference_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("TBonds.csv");
        std::fs::write(
            &path,
            "91282CLY5,T,1.625,1.625,05/15/26\nbroken row\n912810UF3,T,4.25,4.25,02/15/54\n",
        )
        .unwrap();

        let map = load_bond_map(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert!(map.contains_key("91282CLY5"));
        assert!(map.contains_key("912810UF3"));
    }
}
