//! Analog input abstraction

/// Single analog channel
///
/// Returns the raw conversion result. The resolution is whatever the
/// converter provides (10-bit on AVR boards, 12-bit on RP2040) and is
/// passed to the host unscaled.
pub trait AnalogInput {
    /// Error type for conversions
    type Error;

    /// Take one blocking conversion
    fn read(&mut self) -> Result<u16, Self::Error>;
}
