//! Host heartbeat monitor
//!
//! Tracks when the host last sent `OK` and derives the link state from it.
//! Timestamps are `u32` milliseconds since boot; elapsed time uses wrapping
//! subtraction, which survives one rollover of the clock (about 49.7 days).
//! Two rollovers inside one comparison are not detected.

use leadlink_protocol::Token;

use crate::config::HEARTBEAT_TIMEOUT_MS;
use crate::state::{ConnectionState, LinkEvent};

/// Heartbeat tracking for the host link
#[derive(Debug, Clone)]
pub struct HeartbeatMonitor {
    /// Derived link state
    state: ConnectionState,
    /// Time the last heartbeat was accepted (ms)
    last_verified_ms: u32,
    /// Allowed silence before the link drops (ms)
    timeout_ms: u32,
}

impl Default for HeartbeatMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeartbeatMonitor {
    /// Create a monitor in the power-on state
    pub fn new() -> Self {
        Self::with_timeout(HEARTBEAT_TIMEOUT_MS)
    }

    pub fn with_timeout(timeout_ms: u32) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            last_verified_ms: 0,
            timeout_ms,
        }
    }

    /// Handle a completed line from the host
    ///
    /// Lines other than the heartbeat are ignored. Returns the new state if
    /// the link came up.
    pub fn on_token(&mut self, token: &Token, now_ms: u32) -> Option<ConnectionState> {
        if !token.is_heartbeat() {
            return None;
        }
        self.heartbeat_received(now_ms)
    }

    /// Record a heartbeat
    pub fn heartbeat_received(&mut self, now_ms: u32) -> Option<ConnectionState> {
        self.last_verified_ms = now_ms;
        self.apply(LinkEvent::HeartbeatReceived)
    }

    /// Drop the link if the host has been silent too long
    ///
    /// Returns the new state if the link went down. Repeated calls while
    /// disconnected report nothing.
    pub fn check_timeout(&mut self, now_ms: u32) -> Option<ConnectionState> {
        if self.elapsed_ms(now_ms) > self.timeout_ms {
            self.apply(LinkEvent::HeartbeatTimeout)
        } else {
            None
        }
    }

    /// Time since the last heartbeat
    pub fn elapsed_ms(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.last_verified_ms)
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    pub fn last_verified_ms(&self) -> u32 {
        self.last_verified_ms
    }

    fn apply(&mut self, event: LinkEvent) -> Option<ConnectionState> {
        let next = self.state.transition(event);
        if next == self.state {
            return None;
        }
        self.state = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok() -> Token {
        Token::from_bytes(b"OK")
    }

    #[test]
    fn test_starts_disconnected() {
        let monitor = HeartbeatMonitor::new();
        assert!(!monitor.is_connected());
        assert_eq!(monitor.last_verified_ms(), 0);
    }

    #[test]
    fn test_heartbeat_connects_once() {
        let mut monitor = HeartbeatMonitor::new();

        assert_eq!(monitor.on_token(&ok(), 50), Some(ConnectionState::Connected));
        assert_eq!(monitor.last_verified_ms(), 50);

        // Further heartbeats refresh the timestamp without a state change
        assert_eq!(monitor.on_token(&ok(), 400), None);
        assert_eq!(monitor.last_verified_ms(), 400);
        assert!(monitor.is_connected());
    }

    #[test]
    fn test_other_tokens_ignored() {
        let mut monitor = HeartbeatMonitor::new();

        assert_eq!(monitor.on_token(&Token::from_bytes(b"NO"), 10), None);
        assert_eq!(monitor.on_token(&Token::from_bytes(b"O"), 10), None);
        assert_eq!(monitor.on_token(&Token::from_bytes(b""), 10), None);
        assert!(!monitor.is_connected());
        assert_eq!(monitor.last_verified_ms(), 0);
    }

    #[test]
    fn test_timeout_boundary() {
        let mut monitor = HeartbeatMonitor::new();
        monitor.on_token(&ok(), 1000);

        // Exactly the timeout is still connected
        assert_eq!(monitor.check_timeout(2000), None);
        assert!(monitor.is_connected());

        assert_eq!(
            monitor.check_timeout(2001),
            Some(ConnectionState::Disconnected)
        );
    }

    #[test]
    fn test_timeout_reported_once() {
        let mut monitor = HeartbeatMonitor::new();
        monitor.on_token(&ok(), 0);

        assert_eq!(
            monitor.check_timeout(1500),
            Some(ConnectionState::Disconnected)
        );
        assert_eq!(monitor.check_timeout(1520), None);
        assert_eq!(monitor.check_timeout(5000), None);
    }

    #[test]
    fn test_boot_timeout_is_silent() {
        // Past one second of uptime the check fires, but the link was
        // never up so nothing changes
        let mut monitor = HeartbeatMonitor::new();
        assert_eq!(monitor.check_timeout(1001), None);
        assert!(!monitor.is_connected());
    }

    #[test]
    fn test_reconnect_after_timeout() {
        let mut monitor = HeartbeatMonitor::new();
        monitor.on_token(&ok(), 0);
        monitor.check_timeout(2000);

        assert_eq!(monitor.on_token(&ok(), 2100), Some(ConnectionState::Connected));
    }

    #[test]
    fn test_clock_rollover() {
        let mut monitor = HeartbeatMonitor::new();
        monitor.on_token(&ok(), u32::MAX - 100);

        // 300 ms later the clock has wrapped
        assert_eq!(monitor.elapsed_ms(199), 300);
        assert_eq!(monitor.check_timeout(199), None);
        assert!(monitor.is_connected());

        assert_eq!(
            monitor.check_timeout(1000),
            Some(ConnectionState::Disconnected)
        );
    }

    #[test]
    fn test_custom_timeout() {
        let mut monitor = HeartbeatMonitor::with_timeout(100);
        monitor.heartbeat_received(0);
        assert_eq!(monitor.check_timeout(100), None);
        assert_eq!(
            monitor.check_timeout(101),
            Some(ConnectionState::Disconnected)
        );
    }
}
