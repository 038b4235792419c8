//! Command listener for operator control
//!
//! Accepts UDP datagrams on the command port. A datagram containing the
//! `"cmd"` token with a non-empty quoted `"value"` updates the shared
//! command state for the actuation subsystem to consume.
//!
//! Seeding fallback: when no video destination has ever been registered,
//! the first datagram on this port registers its sender (on the default
//! video port) as the destination, so a lone commander still receives
//! video without sending a subscribe message. The fallback fires only on
//! the empty-to-set transition and never overrides an existing
//! destination. The subscribe flow honors a requested port; this fallback
//! intentionally does not.

use crate::control::parse;
use crate::control::subscription::{RECV_BUFFER_SIZE, RECV_TIMEOUT};
use crate::error::Result;
use crate::state::{CommandState, DestinationRegistry};
use std::net::{SocketAddr, UdpSocket};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// UDP listener that applies operator commands
pub struct CommandListener {
    socket: UdpSocket,
    destination: DestinationRegistry,
    command: CommandState,
    default_video_port: u16,
    running: Arc<AtomicBool>,
}

impl CommandListener {
    /// Bind the listening socket
    pub fn bind(
        addr: SocketAddr,
        destination: DestinationRegistry,
        command: CommandState,
        default_video_port: u16,
        running: Arc<AtomicBool>,
    ) -> Result<Self> {
        let socket = UdpSocket::bind(addr)?;
        socket.set_read_timeout(Some(RECV_TIMEOUT))?;
        Ok(Self {
            socket,
            destination,
            command,
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
            Ok(addr) => log::info!("Command listener on UDP {}", addr),
            Err(e) => log::warn!("Command listener address unavailable: {}", e),
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
                    log::warn!("Command receive error: {}", e);
                    continue;
                }
            };

            let fallback = SocketAddr::new(src.ip(), self.default_video_port);
            if self.destination.set_if_absent(fallback) {
                log::info!(
                    "No video destination yet; defaulting to command sender {}",
                    fallback
                );
            }

            let msg = String::from_utf8_lossy(&buf[..len]);
            log::debug!("Command datagram from {}: {}", src, msg.trim_end());

            if parse::has_token(&msg, "cmd") {
                match parse::extract_quoted(&msg, "value") {
                    Some(value) if !value.is_empty() => {
                        self.command.set(value);
                        log::info!("Received command: {}", value);
                    }
                    _ => {
                        log::debug!("Command datagram without usable value, ignored");
                    }
                }
            }
        }

        log::info!("Command listener stopped");
    }
}
