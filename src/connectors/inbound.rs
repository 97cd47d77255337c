//! Generic inbound TCP connector: one accept/read thread per
//! feed, a single client at a time, `\n`-delimited lines with a trailing `\r`
//! stripped. A parse failure drops the offending line and keeps the
//! connection open; the connector itself never closes on a bad line.

use std::io::{BufRead, BufReader};
use std::net::TcpListener;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{info, warn};

use crate::error::ParseError;

/// Owns one listening socket and its accept/read thread. `label` is used only
/// for log lines.
pub struct InboundConnector {
    label: &'static str,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InboundConnector {
    /// Binds `port` and starts the accept loop. `parse` decodes one line into
    /// `V`; `on_value` is handed every successfully parsed value (typically a
    /// closure that calls `Service::on_message` with the key derived from the
    /// value).
    pub fn spawn<V, P, H>(label: &'static str, port: u16, parse: P, mut on_value: H) -> std::io::Result<Self>
    where
        V: Send + 'static,
        P: Fn(&str) -> Result<V, ParseError> + Send + 'static,
        H: FnMut(V) + Send + 'static,
    {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        listener.set_nonblocking(true)?;

        let running = Arc::new(AtomicBool::new(true));
        let running_thread = running.clone();

        let handle = thread::spawn(move || {
            info!(label, port, "inbound connector listening");
            while running_thread.load(Ordering::Relaxed) {
                match listener.accept() {
                    Ok((stream, addr)) => {
                        info!(label, %addr, "client connected");
                        if stream.set_nonblocking(false).is_err() {
                            continue;
                        }
                        let reader = BufReader::new(stream);
                        for raw_line in reader.lines() {
                            if !running_thread.load(Ordering::Relaxed) {
                                break;
                            }
                            match raw_line {
                                Ok(raw_line) => {
                                    let line = raw_line.trim_end_matches('\r');
                                    if line.is_empty() {
                                        continue;
                                    }
                                    match parse(line) {
                                        Ok(value) => on_value(value),
                                        Err(err) => warn!(label, %err, "dropping unparsable line"),
                                    }
                                }
                                Err(err) => {
                                    warn!(label, %err, "client read error, closing connection");
                                    break;
                                }
                            }
                        }
                        info!(label, "client disconnected");
                    }
                    Err(ref err) if err.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(20));
                    }
                    Err(err) => warn!(label, %err, "accept error"),
                }
            }
            info!(label, "inbound connector stopped");
        });

        Ok(Self {
            label,
            running,
            handle: Some(handle),
        })
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::Relaxed);
    }

    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(label = self.label, "inbound connector thread panicked");
            }
        }
    }
}
