//! Shared state cells coordinating the daemon's three loops
//!
//! Two independently lock-guarded cells form the only cross-thread
//! coordination in the daemon:
//!
//! - [`DestinationRegistry`]: the single (address, port) endpoint currently
//!   receiving video. Written by the subscription and command listeners,
//!   read by the video streamer once per frame cycle.
//! - [`CommandState`]: the most recently received operator command, consumed
//!   by actuation logic outside this daemon.
//!
//! Writes are serialized by the mutex; the most recent completed write is
//! what subsequent reads observe (last-write-wins, single destination).

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

/// Registry of the current video destination (single viewer at a time)
#[derive(Clone, Default)]
pub struct DestinationRegistry {
    inner: Arc<Mutex<Option<SocketAddr>>>,
}

impl DestinationRegistry {
    /// Create an empty registry (no destination yet)
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }

    /// Get the current destination, if any
    pub fn get(&self) -> Option<SocketAddr> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the current destination
    pub fn set(&self, addr: SocketAddr) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = Some(addr);
        log::info!("Video destination: {}", addr);
    }

    /// Set the destination only if none has ever been registered
    ///
    /// Returns true only on the transition from "no destination" to
    /// "has destination". Used by the command listener fallback so a lone
    /// commander still receives video without overriding a real subscriber.
    pub fn set_if_absent(&self, addr: SocketAddr) -> bool {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if guard.is_some() {
            return false;
        }
        *guard = Some(addr);
        log::info!("Video destination: {}", addr);
        true
    }
}

/// Last-known operator command (no history retained)
#[derive(Clone)]
pub struct CommandState {
    inner: Arc<Mutex<String>>,
}

impl CommandState {
    /// Create with the boot-time command
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new("STOP".to_string())),
        }
    }

    /// Get the latest command
    pub fn get(&self) -> String {
        self.inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Replace the latest command
    ///
    /// No vocabulary validation is performed; unrecognized commands are
    /// stored as-is for the actuation consumer to interpret.
    pub fn set(&self, cmd: &str) {
        let mut guard = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *guard = cmd.to_string();
    }
}

impl Default for CommandState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn addr(port: u16) -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], port))
    }

    #[test]
    fn test_registry_starts_empty() {
        let registry = DestinationRegistry::new();
        assert_eq!(registry.get(), None);
    }

    #[test]
    fn test_last_write_wins() {
        let registry = DestinationRegistry::new();
        registry.set(addr(5600));
        registry.set(addr(7001));
        assert_eq!(registry.get(), Some(addr(7001)));
    }

    #[test]
    fn test_set_if_absent_fires_once() {
        let registry = DestinationRegistry::new();
        assert!(registry.set_if_absent(addr(5600)));
        assert!(!registry.set_if_absent(addr(7001)));
        assert_eq!(registry.get(), Some(addr(5600)));
    }

    #[test]
    fn test_set_if_absent_never_overrides() {
        let registry = DestinationRegistry::new();
        registry.set(addr(7001));
        assert!(!registry.set_if_absent(addr(5600)));
        assert_eq!(registry.get(), Some(addr(7001)));
    }

    #[test]
    fn test_write_visible_across_threads() {
        let registry = DestinationRegistry::new();
        let writer = registry.clone();
        thread::spawn(move || writer.set(addr(6000)))
            .join()
            .unwrap();
        assert_eq!(registry.get(), Some(addr(6000)));
    }

    #[test]
    fn test_command_state_defaults_to_stop() {
        let state = CommandState::new();
        assert_eq!(state.get(), "STOP");
    }

    #[test]
    fn test_command_state_stores_latest() {
        let state = CommandState::new();
        state.set("FORWARD");
        state.set("TURN_LEFT");
        assert_eq!(state.get(), "TURN_LEFT");
    }
}
