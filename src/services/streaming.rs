//! `BondStreamingService`: the sink for [`AlgoStream`] events. Upserts
//! its own store, republishes a CSV line over the port 9000 outbound socket,
//! and fans out to its own listeners (the streaming historical archiver).

use chrono::Local;

use crate::connectors::outbound::OutboundConnector;
use crate::domain::price_stream::AlgoStream;
use crate::graph::{Service, ServiceListener};

pub struct StreamingService {
    inner: Service<String, AlgoStream>,
    outbound: OutboundConnector,
}

impl StreamingService {
    pub fn new(outbound: OutboundConnector) -> Self {
        Self {
            inner: Service::new(),
            outbound,
        }
    }

    pub fn inner(&self) -> &Service<String, AlgoStream> {
        &self.inner
    }

    pub fn add_listener(&self, listener: std::sync::Arc<dyn ServiceListener<AlgoStream>>) {
        self.inner.add_listener(listener);
    }
}

/// `HH:MM:SS.mmm, CUSIP, bidPrice, offerPrice, bidVisible, bidHidden,
/// offerVisible, offerHidden`. Prices are the raw decimal, matching the
/// original streaming connector (which streams `GetPrice()` directly rather
/// than re-encoding it back to fractional-32nds).
pub fn to_csv_line(stream: &AlgoStream) -> String {
    let bid = &stream.price_stream.bid;
    let offer = &stream.price_stream.offer;
    format!(
        "{}, {}, {}, {}, {}, {}, {}, {}",
        Local::now().format("%H:%M:%S%.3f"),
        stream.price_stream.product.product_id,
        bid.price,
        offer.price,
        bid.visible_quantity,
        bid.hidden_quantity,
        offer.visible_quantity,
        offer.hidden_quantity,
    )
}

impl ServiceListener<AlgoStream> for StreamingService {
    fn process_add(&self, stream: &AlgoStream) {
        self.inner.on_message(stream.price_stream.product.product_id.clone(), stream.clone());
        self.outbound.publish_line(&to_csv_line(stream));
    }
}
