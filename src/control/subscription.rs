//! Subscription listener for viewer registration
//!
//! Accepts UDP datagrams on the subscribe port. A datagram containing the
//! `"subscribe"` token registers the sender as the video destination, using
//! the `video_port` field from the message (default when absent or
//! malformed). Anything else is logged and ignored; no datagram is ever
//! fatal to the loop.

use crate::control::parse;
use crate::error::Result;
use crate::state::DestinationRegistry;
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Receive buffer size for control datagrams
pub(crate) const RECV_BUFFER_SIZE: usize = 2048;

/// Receive timeout so the loop can observe the shutdown flag
pub(crate) const RECV_TIMEOUT: Duration = Duration::from_millis(500);

/// UDP listener that registers video subscribers
pub struct SubscriptionListener {
    socket: UdpSocket,
    destination: DestinationRegistry,
    default_video_port: u16,
    running: Arc<AtomicBool>,
}

impl SubscriptionListener {
    /// Bind the listening socket
    pub fn bind(
        addr: SocketAddr,
        destination: DestinationRegistry,
        default_video_port: u16,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(RECV_TIMEOUT))?;
        Ok(Self {
            socket,
            destination,
            default_video_port,
            running,
        })
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Run the receive loop until the daemon stops
    pub fn run(&mut self) {
        match self.local_addr() {
            Ok(addr) => log::info!("Subscription listener on UDP {}", addr),
            Err(e) => log::warn!("Subscription listener address unavailable: {}", e),
        }

        let mut buf = [0u8; RECV_BUFFER_SIZE];
        while self.running.load(Ordering::Relaxed) {
            let (len, src) = match self.socket.recv_from(&mut buf) {
                Ok(r) => r,
                Err(e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    continue;
                }
                Err(e) => {
                    // Transient receive errors never end the loop
                    log::warn!("Subscription receive error: {}", e);
                    continue;
                }
            };

            let msg = String::from_utf8_lossy(&buf[..len]);
            log::debug!("Subscription datagram from {}: {}", src, msg.trim_end());

            if parse::has_token(&msg, "subscribe") {
                let port = parse::extract_port(&msg, "video_port", self.default_video_port);
                let dest = SocketAddr::new(src.ip(), port);
                self.destination.set(dest);
                log::info!("New video subscriber: {}", dest);
            }
        }

        log::info!("Subscription listener stopped");
    }
}
