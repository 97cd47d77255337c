//! Generic outbound TCP connector: holds every accepted client
//! socket, admits new ones with a non-blocking accept on every `publish_line`
//! call, and drops any client whose write fails. No buffering, no retry.

use std::io::Write;
use std::net::TcpListener;
use std::net::TcpStream;

use parking_lot::Mutex;
use tracing::{info, warn};

pub struct OutboundConnector {
    label: &'static str,
    listener: TcpListener,
    clients: Mutex<Vec<TcpStream>>,
}

impl OutboundConnector {
    pub fn bind(label: &'static str, port: u16) -> std::io::Result<Self> {
        let listener = TcpListener::bind(("0.0.0.0", port))?;
        listener.set_nonblocking(true)?;
        Ok(Self {
            label,
            listener,
            clients: Mutex::new(Vec::new()),
        })
    }

    fn accept_new_clients(&self, clients: &mut Vec<TcpStream>) {
        loop {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    info!(label = self.label, %addr, "outbound client connected");
                    if stream.set_nonblocking(true).is_ok() {
                        clients.push(stream);
                    }
                }
                Err(ref err) if err.kind() == std::io::ErrorKind::WouldBlock => break,
                Err(err) => {
                    warn!(label = self.label, %err, "outbound accept error");
                    break;
                }
            }
        }
    }

    /// Sends `line` (with a trailing newline) to every connected client,
    /// dropping any client whose write fails.
    pub fn publish_line(&self, line: &str) {
        let mut clients = self.clients.lock();
        self.accept_new_clients(&mut clients);

        let mut payload = line.as_bytes().to_vec();
        payload.push(b'\n');

        clients.retain_mut(|client| match client.write_all(&payload) {
            Ok(()) => true,
            Err(err) => {
                warn!(label = self.label, %err, "dropping client after write failure");
                false
            }
        });
    }
}
