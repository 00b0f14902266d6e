//! Events driving the link state machine

/// Host link events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkEvent {
    /// Heartbeat line received from the host
    HeartbeatReceived,
    /// No heartbeat within the timeout window
    HeartbeatTimeout,
}
