//! Board wiring and peripheral adapters
//!
//! Pin assignments for a Raspberry Pi Pico with an AD8232 ECG front end and
//! a 20x4 I2C LCD:
//!
//! | Signal      | GPIO | Notes                      |
//! |-------------|------|----------------------------|
//! | UART0 TX    | 0    | host link                  |
//! | UART0 RX    | 1    | host link                  |
//! | I2C0 SDA    | 4    | LCD backpack               |
//! | I2C0 SCL    | 5    | LCD backpack               |
//! | LO+         | 10   | AD8232 leads-off, no pull  |
//! | LO-         | 11   | AD8232 leads-off, no pull  |
//! | ECG OUTPUT  | 26   | ADC0                       |
//!
//! The adapters below put embassy-rp drivers behind the leadlink-hal traits.

use embassy_rp::adc::{self, Adc, Blocking, Channel};

use leadlink_hal::{AnalogInput, InputPin, SerialRx, SerialTx};

/// Digital input through embedded-hal
///
/// A failed read counts as high, which the lead detector treats as a lead
/// off.
pub struct DigitalIn<T>(pub T);

impl<T: embedded_hal::digital::InputPin> InputPin for DigitalIn<T> {
    fn is_high(&mut self) -> bool {
        self.0.is_high().unwrap_or(true)
    }
}

/// ECG signal on one ADC channel
pub struct EcgChannel<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> EcgChannel<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogInput for EcgChannel<'_> {
    type Error = adc::Error;

    fn read(&mut self) -> Result<u16, Self::Error> {
        self.adc.blocking_read(&mut self.channel)
    }
}

/// Host serial link over a buffered UART
///
/// Reads check the RX buffer first so the cycle never waits on the host.
pub struct HostLink<R, W> {
    rx: R,
    tx: W,
}

impl<R, W> HostLink<R, W> {
    pub fn new(rx: R, tx: W) -> Self {
        Self { rx, tx }
    }
}

impl<R, W> SerialRx for HostLink<R, W>
where
    R: embedded_io::Read + embedded_io::ReadReady,
{
    type Error = R::Error;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.rx.read_ready()? {
            return Ok(None);
        }

        let mut buf = [0u8; 1];
        match self.rx.read(&mut buf)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

impl<R, W> SerialTx for HostLink<R, W>
where
    W: embedded_io::Write,
{
    type Error = W::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }
}
