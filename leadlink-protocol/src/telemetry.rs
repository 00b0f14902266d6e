//! Outbound telemetry line
//!
//! One line per monitor cycle: `(<uptime_ms> <sample>)` terminated by CRLF.

use core::fmt::{self, Write};

use heapless::String;

/// Capacity for a formatted line: "(" + u32 + " " + u16 + ")" + CRLF
pub const TELEMETRY_LINE_LEN: usize = 24;

/// One analog sample stamped with device uptime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Telemetry {
    /// Milliseconds since boot
    pub uptime_ms: u32,
    /// Raw analog reading
    pub sample: u16,
}

impl Telemetry {
    pub fn new(uptime_ms: u32, sample: u16) -> Self {
        Self { uptime_ms, sample }
    }

    /// Format as a CRLF-terminated line ready for the UART
    pub fn to_line(&self) -> String<TELEMETRY_LINE_LEN> {
        let mut line = String::new();
        // Worst case is 20 bytes, within capacity
        let _ = write!(line, "{}\r\n", self);
        line
    }
}

impl fmt::Display for Telemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} {})", self.uptime_ms, self.sample)
    }
}
