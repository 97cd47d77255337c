//! Historical archivers: one per derivation, each a
//! [`ServiceListener`] that appends a timestamped row to its own CSV file.
//! The risk archiver is the one specialisation — it reads the live sector
//! PV01 at archive time rather than at the moment the event was emitted.

use std::sync::Arc;

use crate::connectors::file_writer::ArchiveFile;
use crate::domain::execution_order::ExecutionOrder;
use crate::domain::price::format_mid_fractional;
use crate::domain::price_stream::AlgoStream;
use crate::domain::pv01::{BucketedSector, Pv01};
use crate::domain::trade::Side;
use crate::domain::{Inquiry, InquiryState, Position};
use crate::graph::ServiceListener;
use crate::services::execution::to_csv_line as execution_csv_line;
use crate::services::risk::RiskService;
use crate::services::streaming::to_csv_line as streaming_csv_line;

pub struct PositionArchiver {
    file: ArchiveFile,
}

impl PositionArchiver {
    pub fn new(file: ArchiveFile) -> Self {
        Self { file }
    }
}

impl ServiceListener<Position> for PositionArchiver {
    fn process_add(&self, position: &Position) {
        let books: Vec<String> = position.books().map(|(book, qty)| format!("{book}={qty}")).collect();
        self.file.append_line(&format!(
            "{}, aggregate={}, {}",
            position.product.product_id,
            position.aggregate(),
            books.join(", ")
        ));
    }
}

pub struct ExecutionArchiver {
    file: ArchiveFile,
}

impl ExecutionArchiver {
    pub fn new(file: ArchiveFile) -> Self {
        Self { file }
    }
}

impl ServiceListener<ExecutionOrder> for ExecutionArchiver {
    fn process_add(&self, order: &ExecutionOrder) {
        self.file.append_line(&execution_csv_line(order));
    }
}

pub struct StreamingArchiver {
    file: ArchiveFile,
}

impl StreamingArchiver {
    pub fn new(file: ArchiveFile) -> Self {
        Self { file }
    }
}

impl ServiceListener<AlgoStream> for StreamingArchiver {
    fn process_add(&self, stream: &AlgoStream) {
        self.file.append_line(&streaming_csv_line(stream));
    }
}

pub struct InquiryArchiver {
    file: ArchiveFile,
}

impl InquiryArchiver {
    pub fn new(file: ArchiveFile) -> Self {
        Self { file }
    }
}

/// `productId, inquiryId, side, quantity, price, state` — same column order
/// as the original inquiry record, with price in fractional-32nds and side
/// and state rendered upper-case.
impl ServiceListener<Inquiry> for InquiryArchiver {
    fn process_add(&self, inquiry: &Inquiry) {
        let side = match inquiry.side {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        };
        let state = match inquiry.state {
            InquiryState::Received => "RECEIVED",
            InquiryState::Quoted => "QUOTED",
            InquiryState::Done => "DONE",
            InquiryState::Rejected => "REJECTED",
            InquiryState::CustomerRejected => "CUSTOMER_REJECTED",
        };
        self.file.append_line(&format!(
            "{}, {}, {}, {}, {}, {}",
            inquiry.product.product_id,
            inquiry.inquiry_id,
            side,
            inquiry.quantity,
            format_mid_fractional(inquiry.price),
            state
        ));
    }
}

/// Looks up the bond's sector and appends the sector name and the sector's
/// *current* PV01, which depends on `risk`'s state at archive time rather
/// than at the moment this particular PV01 was emitted.
pub struct RiskArchiver {
    file: ArchiveFile,
    risk: Arc<RiskService>,
    sectors: Vec<BucketedSector>,
}

impl RiskArchiver {
    pub fn new(file: ArchiveFile, risk: Arc<RiskService>, sectors: Vec<BucketedSector>) -> Self {
        Self { file, risk, sectors }
    }

    fn sector_for(&self, cusip: &str) -> Option<&BucketedSector> {
        self.sectors.iter().find(|sector| sector.products.iter().any(|bond| bond.product_id == cusip))
    }
}

impl ServiceListener<Pv01> for RiskArchiver {
    fn process_add(&self, pv01: &Pv01) {
        let (sector_name, sector_total) = match self.sector_for(&pv01.product.product_id) {
            Some(sector) => (sector.name.clone(), self.risk.sector_pv01(sector)),
            None => ("NONE".to_string(), 0.0),
        };

        self.file.append_line(&format!(
            "{}, pv01={:.6}, qty={}, totalRisk={:.6}, sector={}, sectorPv01={:.6}",
            pv01.product.product_id,
            pv01.pv01,
            pv01.quantity,
            pv01.total_risk(),
            sector_name,
            sector_total
        ));
    }
}
