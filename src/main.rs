//! Process entry point: loads configuration and the bond reference table,
//! wires the service graph in dependency order, starts the four inbound
//! connector threads, and waits for Ctrl-C to begin a cooperative shutdown.

mod config;
mod connectors;
mod domain;
mod error;
mod graph;
mod logging;
mod services;

use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::connectors::inbound::InboundConnector;
use crate::connectors::outbound::OutboundConnector;
use crate::connectors::{file_writer::ArchiveFile, parsers, reference};
use crate::domain::pv01::BucketedSector;
use crate::domain::Bond;
use crate::services::algo_execution::AlgoExecutionService;
use crate::services::algo_streaming::AlgoStreamingService;
use crate::services::execution::ExecutionService;
use crate::services::gui::GuiService;
use crate::services::historical::{ExecutionArchiver, InquiryArchiver, PositionArchiver, RiskArchiver, StreamingArchiver};
use crate::services::inquiry::InquiryService;
use crate::services::market_data::MarketDataService;
use crate::services::position::PositionService;
use crate::services::pricing::PricingService;
use crate::services::risk::RiskService;
use crate::services::streaming::StreamingService;
use crate::services::trade_booking::{ExecutionToTradeListener, TradeBookingService};

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let config = Config::load("config.toml")?;
    info!(?config.reference_csv, "loading bond reference table");
    let bonds = reference::load_bond_map(&config.reference_csv)?;
    info!(count = bonds.len(), "bond reference table loaded");

    // --- Historical archivers --------------------------------------
    // Opened before the services that feed them so bootstrap fails fast on a
    // bad archive path rather than after sockets are already listening.
    let position_archive = ArchiveFile::open(
        "positions",
        &config.archives.positions,
        "timestamp, cusip, aggregate, books",
    )?;
    let risk_archive = ArchiveFile::open(
        "risk",
        &config.archives.risk,
        "timestamp, cusip, pv01, qty, totalRisk, sector, sectorPv01",
    )?;
    let execution_archive = ArchiveFile::open(
        "executions",
        &config.archives.executions,
        "timestamp, cusip, orderId, orderType, side, price, visibleQuantity",
    )?;
    let streaming_archive = ArchiveFile::open(
        "streaming",
        &config.archives.streaming,
        "timestamp, cusip, bidPrice, offerPrice, bidVisible, bidHidden, offerVisible, offerHidden",
    )?;
    let inquiry_archive = ArchiveFile::open(
        "inquiries",
        &config.archives.inquiries,
        "timestamp, cusip, inquiryId, side, qty, price, state",
    )?;
    let sectors = build_sectors(&bonds, &config.sectors);

    // --- Primary services -------------------------------------------------
    let pricing = Arc::new(PricingService::new());
    let market_data = Arc::new(MarketDataService::new());
    let inquiry = Arc::new(InquiryService::new());
    inquiry.add_listener(Arc::new(InquiryArchiver::new(inquiry_archive)));

    let trade_booking = Arc::new(TradeBookingService::new());

    // --- Position -> Risk, each with its own archiver --------
    let position_service = Arc::new(PositionService::new());
    position_service.add_listener(Arc::new(PositionArchiver::new(position_archive)));
    trade_booking.add_listener(position_service.clone());

    let risk_service = Arc::new(RiskService::new());
    risk_service.add_listener(Arc::new(RiskArchiver::new(risk_archive, risk_service.clone(), sectors)));
    position_service.add_listener(risk_service);

    // --- Outbound sockets and their owning services ------------------------
    let streaming_outbound = OutboundConnector::bind("streaming", config.outbound_ports.streaming)?;
    let streaming_service = Arc::new(StreamingService::new(streaming_outbound));
    streaming_service.add_listener(Arc::new(StreamingArchiver::new(streaming_archive)));

    let execution_outbound = OutboundConnector::bind("executions", config.outbound_ports.executions)?;
    let execution_service = Arc::new(ExecutionService::new(execution_outbound));
    execution_service.add_listener(Arc::new(ExecutionArchiver::new(execution_archive)));
    // Execution -> TradeBooking feedback loop.
    execution_service.add_listener(Arc::new(ExecutionToTradeListener::new(trade_booking.clone())));

    // --- Derivation services off the primaries ------------------------------
    let algo_streaming = Arc::new(AlgoStreamingService::new());
    algo_streaming.add_listener(streaming_service);

    let algo_execution = Arc::new(AlgoExecutionService::new());
    algo_execution.add_listener(execution_service);
    market_data.add_listener(algo_execution);

    let gui = Arc::new(GuiService::new(&config.gui));
    pricing.add_listener(gui);
    pricing.add_listener(algo_streaming);

    info!("service graph wired; starting inbound connectors");

    // --- Inbound connectors ------------------------------------------
    let pricing_bonds = bonds.clone();
    let pricing_target = pricing.clone();
    let price_connector = InboundConnector::spawn(
        "prices",
        config.inbound_ports.prices,
        move |line| parsers::parse_price_line(line, &pricing_bonds),
        move |price| pricing_target.on_message(price.product.product_id.clone(), price),
    )?;

    let trade_bonds = bonds.clone();
    let trade_target = trade_booking.clone();
    let trade_connector = InboundConnector::spawn(
        "trades",
        config.inbound_ports.trades,
        move |line| parsers::parse_trade_line(line, &trade_bonds),
        move |trade| trade_target.on_message(trade.trade_id.clone(), trade),
    )?;

    let market_data_bonds = bonds.clone();
    let market_data_target = market_data.clone();
    let market_data_connector = InboundConnector::spawn(
        "market_data",
        config.inbound_ports.market_data,
        move |line| parsers::parse_market_data_line(line, &market_data_bonds),
        move |book| market_data_target.on_message(book.product.product_id.clone(), book),
    )?;

    let inquiry_bonds = bonds.clone();
    let inquiry_target = inquiry.clone();
    let inquiry_connector = InboundConnector::spawn(
        "inquiries",
        config.inbound_ports.inquiries,
        move |line| parsers::parse_inquiry_line(line, &inquiry_bonds),
        move |received| inquiry_target.receive(received),
    )?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            tokio::signal::ctrl_c().await.expect("failed to listen for ctrl-c");
        });

    info!("shutdown signal received, stopping connectors");
    price_connector.stop();
    trade_connector.stop();
    market_data_connector.stop();
    inquiry_connector.stop();
    price_connector.join();
    trade_connector.join();
    market_data_connector.join();
    inquiry_connector.join();

    Ok(())
}

fn build_sectors(bonds: &reference::BondMap, sectors: &crate::config::SectorConfig) -> Vec<BucketedSector> {
    let resolve = |cusips: &[String]| -> Vec<Bond> {
        cusips.iter().filter_map(|cusip| bonds.get(cusip).cloned()).collect()
    };
    vec![
        BucketedSector::new(resolve(&sectors.front_end), "FrontEnd"),
        BucketedSector::new(resolve(&sectors.belly), "Belly"),
        BucketedSector::new(resolve(&sectors.long_end), "LongEnd"),
    ]
}

/// Scenario-level tests that wire a small subgraph of services together
/// in-process and drive it through `on_message`/`receive` directly, without
/// any real socket — covering behaviour that only shows up once several
/// services are chained (the feedback loop, sector rollups, inquiry
/// fan-out) rather than any single service in isolation.
#[cfg(test)]
mod scenario_tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::domain::trade::Side;
    use crate::domain::{Bond, Inquiry, InquiryState};
    use crate::graph::ServiceListener;
    use crate::services::inquiry::InquiryService;
    use crate::services::position::PositionService;
    use crate::services::risk::RiskService;
    use crate::services::trade_booking::TradeBookingService;
    use crate::{build_sectors, Config};

    fn bond(cusip: &str, coupon: &str, year: i32) -> Bond {
        Bond::new(cusip, "T", coupon.parse::<Decimal>().unwrap(), NaiveDate::from_ymd_opt(year, 5, 15).unwrap())
    }

    fn trade(product: &Bond, book: &str, id: &str, qty: i64, side: Side) -> crate::domain::Trade {
        crate::domain::Trade::new(product.clone(), id, Decimal::new(99, 0), book, qty, side)
    }

    #[test]
    fn trades_flow_through_position_into_risk() {
        let position = Arc::new(PositionService::new());
        let risk = Arc::new(RiskService::new());
        position.add_listener(risk.clone());

        let cusip = bond("91282CLY5", "1.625", 2034);
        let trade_booking = TradeBookingService::new();
        trade_booking.add_listener(position.clone());

        trade_booking.on_message("E1".to_string(), trade(&cusip, "TRSY1", "E1", 1_000_000, Side::Buy));
        trade_booking.on_message("E2".to_string(), trade(&cusip, "TRSY1", "E2", 400_000, Side::Sell));

        let tracked_position = position.inner().get_data(&cusip.product_id).unwrap();
        assert_eq!(tracked_position.aggregate(), 600_000);

        let pv01 = risk.inner().get_data(&cusip.product_id).unwrap();
        assert_eq!(pv01.quantity, 600_000);
        assert_eq!(pv01.total_risk(), pv01.pv01 * 600_000.0);
    }

    #[test]
    fn belly_sector_pv01_matches_a_single_long_position() {
        let position = Arc::new(PositionService::new());
        let risk = Arc::new(RiskService::new());
        position.add_listener(risk.clone());

        let mut config = Config::default();
        config.sectors.belly = vec!["91282CLY5".to_string()];
        let cusip = bond("91282CLY5", "1.625", 2034);
        let mut bonds = std::collections::HashMap::new();
        bonds.insert(cusip.product_id.clone(), cusip.clone());
        let sectors = build_sectors(&Arc::new(bonds), &config.sectors);
        let belly = sectors.iter().find(|s| s.name == "Belly").unwrap();

        let trade_booking = TradeBookingService::new();
        trade_booking.add_listener(position.clone());
        trade_booking.on_message("E1".to_string(), trade(&cusip, "TRSY1", "E1", 5_000_000, Side::Buy));

        let pv01_per_unit = risk.inner().get_data(&cusip.product_id).unwrap().pv01;
        let expected = pv01_per_unit * 5_000_000.0;
        assert!((risk.sector_pv01(belly) - expected).abs() < 1e-6);
    }

    struct RecordingListener {
        events: Arc<std::sync::Mutex<Vec<Inquiry>>>,
    }

    impl ServiceListener<Inquiry> for RecordingListener {
        fn process_add(&self, inquiry: &Inquiry) {
            self.events.lock().unwrap().push(inquiry.clone());
        }
    }

    #[test]
    fn an_inquiry_fans_out_exactly_three_ordered_events() {
        let events = Arc::new(std::sync::Mutex::new(Vec::new()));
        let service = InquiryService::new();
        service.add_listener(Arc::new(RecordingListener { events: events.clone() }));

        let cusip = bond("91282CLY5", "1.625", 2034);
        let inquiry = Inquiry::new("INQ001", cusip, Side::Buy, 10, Decimal::ZERO, InquiryState::Received);
        service.receive(inquiry);

        let seen = events.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0].state, InquiryState::Received);
        assert_eq!(seen[1].state, InquiryState::Quoted);
        assert_eq!(seen[1].price, Decimal::ONE_HUNDRED);
        assert_eq!(seen[2].state, InquiryState::Done);
        assert_eq!(seen[2].price, Decimal::ONE_HUNDRED);
    }
}
