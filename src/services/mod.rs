//! The primary and derivation services that make up the graph.

pub mod algo_execution;
pub mod algo_streaming;
pub mod execution;
pub mod gui;
pub mod historical;
pub mod inquiry;
pub mod market_data;
pub mod position;
pub mod pricing;
pub mod risk;
pub mod streaming;
pub mod trade_booking;
