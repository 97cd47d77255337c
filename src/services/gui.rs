//! `GUIService`: a throttled, hard-capped pricing snapshot for
//! operator display. Dual role — it both listens to
//! `BondPricingService` and exposes the same `Service<String, Price>`
//! surface a primary service would, so other nodes could in principle
//! subscribe to the throttled feed instead of the raw one.

use std::time::{Duration, Instant};

use chrono::Local;
use parking_lot::Mutex;

use crate::config::GuiConfig;
use crate::domain::price::{format_mid_fractional, format_spread_256th};
use crate::domain::Price;
use crate::graph::{Service, ServiceListener};

struct GuiState {
    last_emit: Instant,
    update_count: u32,
}

pub struct GuiService {
    inner: Service<String, Price>,
    throttle_interval: Duration,
    cadence_advance: Duration,
    max_updates: u32,
    state: Mutex<GuiState>,
}

impl GuiService {
    pub fn new(config: &GuiConfig) -> Self {
        Self {
            inner: Service::new(),
            throttle_interval: Duration::from_millis(config.throttle_interval_ms),
            cadence_advance: Duration::from_millis(config.cadence_advance_ms),
            max_updates: config.max_updates,
            state: Mutex::new(GuiState {
                last_emit: Instant::now(),
                update_count: 0,
            }),
        }
    }

    pub fn get_data(&self, cusip: &str) -> Result<Price, crate::error::GraphError> {
        self.inner.get_data(&cusip.to_string())
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<Price>>) {
        self.inner.add_listener(listener);
    }

    /// Renders a header line plus one line per CUSIP currently known. Called
    /// only when a qualifying emit has already been admitted by the gate.
    fn render_snapshot(&self) -> String {
        let mut lines = vec![format!("GUI snapshot {}", Local::now().format("%H:%M:%S%.3f"))];
        let mut rows: Vec<(String, Price)> = self.inner.snapshot().into_iter().collect();
        rows.sort_by(|a, b| a.0.cmp(&b.0));
        for (cusip, price) in rows {
            lines.push(format!(
                "{} mid={} spread={}",
                cusip,
                format_mid_fractional(price.mid),
                format_spread_256th(price.bid_offer_spread)
            ));
        }
        lines.join("\n")
    }

    /// Admits `price` if the throttle gate and the lifetime cap both allow
    /// it, returning the rendered snapshot on a successful emit. The gate
    /// checks real elapsed wall-clock time against `throttle_interval`; the
    /// internal clock that gate compares against then advances by
    /// `cadence_advance`, not by the throttle interval itself — the two knobs
    /// are deliberately kept independent.
    pub fn try_emit(&self, price: &Price) -> Option<String> {
        let mut state = self.state.lock();
        if state.update_count >= self.max_updates {
            return None;
        }
        if state.last_emit.elapsed() < self.throttle_interval {
            return None;
        }
        state.update_count += 1;
        state.last_emit += self.cadence_advance;
        drop(state);

        self.inner.on_message(price.product.product_id.clone(), price.clone());
        Some(self.render_snapshot())
    }
}

impl ServiceListener<Price> for GuiService {
    fn process_add(&self, price: &Price) {
        if let Some(snapshot) = self.try_emit(price) {
            tracing::info!(target: "gui", "{snapshot}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Bond;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn price() -> Price {
        Price::new(
            Bond::new("91282CLY5", "T", Decimal::new(1625, 3), NaiveDate::from_ymd_opt(2026, 5, 15).unwrap()),
            Decimal::new(99515625, 6),
            Decimal::new(1, 0) / Decimal::from(128),
        )
    }

    #[test]
    fn respects_the_lifetime_cap() {
        let mut config = GuiConfig {
            throttle_interval_ms: 0,
            cadence_advance_ms: 0,
            max_updates: 2,
        };
        config.throttle_interval_ms = 0;
        let gui = GuiService::new(&config);

        assert!(gui.try_emit(&price()).is_some());
        assert!(gui.try_emit(&price()).is_some());
        assert!(gui.try_emit(&price()).is_none());
    }

    #[test]
    fn gates_on_throttle_interval() {
        let config = GuiConfig {
            throttle_interval_ms: 10_000,
            cadence_advance_ms: 300,
            max_updates: 100,
        };
        let gui = GuiService::new(&config);
        assert!(gui.try_emit(&price()).is_none());
    }
}
