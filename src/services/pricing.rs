//! `BondPricingService`: the primary store of the latest [`Price`]
//! per CUSIP. Purely a keyed store with fan-out — parsing happens at the
//! connector, derivation happens downstream.

use crate::domain::Price;
use crate::graph::Service;

pub type PricingService = Service<String, Price>;
