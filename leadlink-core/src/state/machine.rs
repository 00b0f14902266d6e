//! State definitions

use super::events::LinkEvent;

/// Host link state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectionState {
    /// No heartbeat seen recently (power-on state)
    #[default]
    Disconnected,
    /// Heartbeats arriving within the timeout
    Connected,
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: LinkEvent) -> Self {
        match event {
            LinkEvent::HeartbeatReceived => ConnectionState::Connected,
            LinkEvent::HeartbeatTimeout => ConnectionState::Disconnected,
        }
    }
}

/// Electrode contact quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LeadPlacement {
    /// At least one electrode is off (power-on state)
    #[default]
    Fault,
    /// Both electrodes in contact
    Ok,
}

impl LeadPlacement {
    /// Derive placement from the two leads-off signals
    ///
    /// Either signal high means that electrode lost contact.
    pub fn from_leads_off(lo_plus: bool, lo_minus: bool) -> Self {
        if lo_plus || lo_minus {
            LeadPlacement::Fault
        } else {
            LeadPlacement::Ok
        }
    }

    pub fn is_fault(&self) -> bool {
        matches!(self, LeadPlacement::Fault)
    }
}
