//! `BondRiskService`: derives per-CUSIP PV01 from position updates
//! and rolls qualifying CUSIPs up into sector totals on demand.

use std::collections::HashMap;

use chrono::Datelike;
use parking_lot::Mutex;
use rust_decimal::prelude::ToPrimitive;

use crate::domain::pv01::{BucketedSector, Pv01};
use crate::domain::{Bond, Position};
use crate::graph::{Service, ServiceListener};

const FACE_VALUE: f64 = 100.0;
const MATURITY_EPOCH_YEAR: i32 = 2024;
const PV01_YIELD_BUMP: f64 = 0.0001;

pub struct RiskService {
    inner: Service<String, Pv01>,
    pv01_cache: Mutex<HashMap<String, f64>>,
}

impl RiskService {
    pub fn new() -> Self {
        Self {
            inner: Service::new(),
            pv01_cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &Service<String, Pv01> {
        &self.inner
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<Pv01>>) {
        self.inner.add_listener(listener);
    }

    /// Per-unit PV01 for `bond`, memoised for the process lifetime.
    fn pv01_for(&self, bond: &Bond) -> f64 {
        if let Some(cached) = self.pv01_cache.lock().get(&bond.product_id).copied() {
            return cached;
        }
        let pv01 = compute_pv01(bond);
        self.pv01_cache.lock().insert(bond.product_id.clone(), pv01);
        pv01
    }

    /// Sum of `pv01(bond) * quantity(bond)` over every bond in `sector` that
    /// already has a risk entry; bonds not yet seen are skipped.
    pub fn sector_pv01(&self, sector: &BucketedSector) -> f64 {
        sector
            .products
            .iter()
            .filter_map(|bond| self.inner.get_data(&bond.product_id).ok())
            .map(|pv01| pv01.total_risk())
            .sum()
    }
}

impl Default for RiskService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceListener<Position> for RiskService {
    fn process_add(&self, position: &Position) {
        let pv01_per_unit = self.pv01_for(&position.product);
        let pv01 = Pv01::new(position.product.clone(), pv01_per_unit, position.aggregate());
        self.inner.on_message(position.product.product_id.clone(), pv01);
    }
}

/// Semi-annual bond pricing at par, yield = coupon rate. Only the
/// calendar year of maturity is used — month and day are ignored in favor
/// of a plain integer year count.
fn compute_pv01(bond: &Bond) -> f64 {
    let coupon = bond.coupon.to_f64().unwrap_or(0.0);
    let maturity_year = bond.maturity_date.year();
    let periods = 2 * (maturity_year - MATURITY_EPOCH_YEAR).max(0);

    let price_at = |yield_rate: f64| bond_price(coupon, periods, yield_rate);
    price_at(coupon) - price_at(coupon + PV01_YIELD_BUMP)
}

fn bond_price(coupon: f64, periods: i32, yield_rate: f64) -> f64 {
    let semi_coupon = coupon * FACE_VALUE / 2.0;
    let semi_yield = yield_rate / 2.0;
    let discount = 1.0 + semi_yield;

    let mut price = 0.0;
    for t in 1..=periods {
        price += semi_coupon / discount.powi(t);
    }
    price += FACE_VALUE / discount.powi(periods);
    price
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn bond(maturity_year: i32) -> Bond {
        Bond::new(
            "91282CLY5",
            "T",
            Decimal::new(425, 2),
            NaiveDate::from_ymd_opt(maturity_year, 5, 15).unwrap(),
        )
    }

    #[test]
    fn pv01_is_small_and_positive_for_a_premium_coupon() {
        let pv01 = compute_pv01(&bond(2034));
        assert!(pv01 > 0.0);
        assert!(pv01 < 1.0);
    }

    #[test]
    fn pv01_is_memoised_across_calls() {
        let service = RiskService::new();
        let b = bond(2034);
        let first = service.pv01_for(&b);
        let second = service.pv01_for(&b);
        assert_eq!(first, second);
        assert_eq!(service.pv01_cache.lock().len(), 1);
    }

    #[test]
    fn sector_total_sums_known_bonds_and_skips_unseen_ones() {
        let service = RiskService::new();
        let seen = bond(2034);
        let unseen = Bond::new("91282CMB4", "T", Decimal::new(425, 2), NaiveDate::from_ymd_opt(2030, 5, 15).unwrap());

        let mut position = Position::new(seen.clone());
        position.add_position("TRSY1", 5_000_000);
        service.process_add(&position);

        let sector = BucketedSector::new(vec![seen.clone(), unseen], "Belly");
        let expected = service.pv01_for(&seen) * 5_000_000.0;
        assert!((service.sector_pv01(&sector) - expected).abs() < 1e-9);
    }
}
