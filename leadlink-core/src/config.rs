//! Fixed configuration
//!
//! The monitor has no runtime configuration. Every tunable lives here as a
//! constant; [`MonitorConfig`] bundles the timing values so tests can run
//! the cycle with shorter windows.

/// Link drops after this long without a heartbeat
pub const HEARTBEAT_TIMEOUT_MS: u32 = 1000;

/// Monitor cycle period
pub const CYCLE_PERIOD_MS: u32 = 20;

/// Display width in characters
pub const LCD_COLS: usize = 20;

/// Display height in characters
pub const LCD_ROWS: usize = 4;

/// I2C address of the PCF8574 display backpack
pub const LCD_I2C_ADDRESS: u8 = 0x27;

/// Display row showing lead placement
pub const LEAD_PLACEMENT_ROW: u8 = 0;

/// Display row showing link status
pub const CONNECTION_ROW: u8 = 2;

/// Timing parameters for the monitor cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Heartbeat timeout (ms)
    pub heartbeat_timeout_ms: u32,
    /// Cycle period (ms), including the work done in the cycle
    pub cycle_period_ms: u32,
}

impl MonitorConfig {
    pub const DEFAULT: Self = Self {
        heartbeat_timeout_ms: HEARTBEAT_TIMEOUT_MS,
        cycle_period_ms: CYCLE_PERIOD_MS,
    };
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
