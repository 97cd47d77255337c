//! The data model shared by every service.

pub mod bond;
pub mod execution_order;
pub mod inquiry;
pub mod order;
pub mod position;
pub mod price;
pub mod price_stream;
pub mod pv01;
pub mod trade;

pub use bond::Bond;
pub use execution_order::{AlgoExecution, ExecutionOrder, OrderType};
pub use inquiry::{Inquiry, InquiryState};
pub use order::{BidOffer, Order, OrderBook, PricingSide};
pub use position::Position;
pub use price::Price;
pub use price_stream::{AlgoStream, PriceStream, PriceStreamOrder};
pub use pv01::{BucketedSector, Pv01};
pub use trade::{Side, Trade};
