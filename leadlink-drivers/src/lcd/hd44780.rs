//! HD44780 character LCD via PCF8574 I2C backpack
//!
//! The common "I2C LCD" modules put a PCF8574 port expander in front of an
//! HD44780 controller and run it in 4-bit mode. Expander bit layout:
//!
//! ```text
//! P7 P6 P5 P4 | P3        | P2 | P1 | P0
//! D7 D6 D5 D4 | BACKLIGHT | EN | RW | RS
//! ```
//!
//! Each byte sent to the controller is split into two nibbles, and each
//! nibble is latched by pulsing EN. RW is held low; the busy flag is never
//! read, so fixed delays cover command execution.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use leadlink_core::config::{LCD_COLS, LCD_I2C_ADDRESS, LCD_ROWS};
use leadlink_core::traits::{DisplayBackend, DisplayError};

/// Expander control bits
mod bits {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// HD44780 instruction set
#[allow(dead_code)]
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    // Entry mode flags
    pub const ENTRY_LEFT: u8 = 0x02;

    // Display control flags
    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    // Function set flags
    pub const MODE_4BIT: u8 = 0x00;
    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X8: u8 = 0x00;
}

/// DDRAM address of the first column of each row on a 20x4 panel
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hd44780Error<E> {
    /// I2C transfer failed
    I2c(E),
    /// Row or column outside the panel
    InvalidCoordinates,
}

impl<E> From<Hd44780Error<E>> for DisplayError {
    fn from(err: Hd44780Error<E>) -> Self {
        match err {
            Hd44780Error::I2c(_) => DisplayError::Communication,
            Hd44780Error::InvalidCoordinates => DisplayError::InvalidCoordinates,
        }
    }
}

/// HD44780 LCD behind a PCF8574
pub struct Hd44780<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: u8,
    initialized: bool,
}

impl<I2C, D> Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver for a backpack at the default address (0x27)
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, LCD_I2C_ADDRESS)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: 0,
            initialized: false,
        }
    }

    /// Run the power-on sequence and switch the backlight on
    ///
    /// The controller may come up in 8-bit mode or mid-nibble, so the
    /// function set is sent three times before dropping to 4-bit.
    pub fn init(&mut self) -> Result<(), Hd44780Error<I2C::Error>> {
        // Vcc rise time
        self.delay.delay_ms(50);

        self.backlight = bits::BACKLIGHT;
        self.expander_write(0)?;
        self.delay.delay_ms(1);

        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(4500);
        self.write_nibble(0x30)?;
        self.delay.delay_us(150);
        self.write_nibble(0x20)?;

        self.command(cmd::FUNCTION_SET | cmd::MODE_4BIT | cmd::TWO_LINE | cmd::FONT_5X8)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.clear()?;
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT)?;
        self.home()?;

        self.initialized = true;
        Ok(())
    }

    /// Clear the display and return the cursor home
    pub fn clear(&mut self) -> Result<(), Hd44780Error<I2C::Error>> {
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn home(&mut self) -> Result<(), Hd44780Error<I2C::Error>> {
        self.command(cmd::RETURN_HOME)?;
        self.delay.delay_us(2000);
        Ok(())
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), Hd44780Error<I2C::Error>> {
        self.backlight = if on { bits::BACKLIGHT } else { 0 };
        self.expander_write(0)
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        if row as usize >= LCD_ROWS || col as usize >= LCD_COLS {
            return Err(Hd44780Error::InvalidCoordinates);
        }
        self.command(cmd::SET_DDRAM_ADDR | (col + ROW_OFFSETS[row as usize]))
    }

    /// Write characters at the cursor
    ///
    /// Non-ASCII characters are shown as `?`. The controller does not wrap
    /// to the next visual row, so callers should stay within the width.
    pub fn write_str(&mut self, text: &str) -> Result<(), Hd44780Error<I2C::Error>> {
        for c in text.chars() {
            let byte = if c.is_ascii() { c as u8 } else { b'?' };
            self.send(byte, bits::RS)?;
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn command(&mut self, value: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        self.send(value, 0)?;
        self.delay.delay_us(40);
        Ok(())
    }

    fn send(&mut self, value: u8, mode: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        self.write_nibble((value & 0xF0) | mode)?;
        self.write_nibble(((value << 4) & 0xF0) | mode)
    }

    fn write_nibble(&mut self, data: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        self.expander_write(data)?;
        self.expander_write(data | bits::EN)?;
        // EN pulse width > 450 ns
        self.delay.delay_us(1);
        self.expander_write(data & !bits::EN)?;
        // Commands need > 37 us to settle
        self.delay.delay_us(50);
        Ok(())
    }

    fn expander_write(&mut self, data: u8) -> Result<(), Hd44780Error<I2C::Error>> {
        self.i2c
            .write(self.address, &[data | self.backlight])
            .map_err(Hd44780Error::I2c)
    }
}

impl<I2C, D> DisplayBackend for Hd44780<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        if !self.initialized {
            return Err(DisplayError::NotInitialized);
        }
        self.set_cursor(col, row)?;
        self.write_str(text)?;
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (LCD_COLS as u8, LCD_ROWS as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::i2c::{ErrorType, Operation};

    /// I2C bus that records every byte written
    #[derive(Default)]
    struct RecordingBus {
        writes: Vec<(u8, u8)>,
    }

    impl ErrorType for RecordingBus {
        type Error = Infallible;
    }

    impl I2c for RecordingBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    for &b in bytes.iter() {
                        self.writes.push((address, b));
                    }
                }
            }
            Ok(())
        }
    }

    struct NoDelay;

    impl DelayNs for NoDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Reassemble controller bytes from latched nibbles: (rs, value)
    fn decode(writes: &[(u8, u8)]) -> Vec<(bool, u8)> {
        let latched: Vec<u8> = writes
            .iter()
            .map(|&(_, b)| b)
            .filter(|b| b & bits::EN != 0)
            .collect();

        latched
            .chunks(2)
            .filter(|pair| pair.len() == 2)
            .map(|pair| {
                let rs = pair[0] & bits::RS != 0;
                (rs, (pair[0] & 0xF0) | (pair[1] >> 4))
            })
            .collect()
    }

    fn ready_lcd() -> Hd44780<RecordingBus, NoDelay> {
        let mut lcd = Hd44780::new(RecordingBus::default(), NoDelay);
        lcd.init().unwrap();
        lcd.i2c.writes.clear();
        lcd
    }

    #[test]
    fn test_init_turns_on_backlight() {
        let mut lcd = Hd44780::new(RecordingBus::default(), NoDelay);
        lcd.init().unwrap();

        assert!(lcd.is_initialized());
        assert!(lcd.i2c.writes.iter().all(|&(addr, _)| addr == 0x27));
        assert!(lcd.i2c.writes.iter().all(|&(_, b)| b & bits::BACKLIGHT != 0));
    }

    #[test]
    fn test_init_sequence() {
        let mut lcd = Hd44780::new(RecordingBus::default(), NoDelay);
        lcd.init().unwrap();

        let latched: Vec<u8> = lcd
            .i2c
            .writes
            .iter()
            .map(|&(_, b)| b)
            .filter(|b| b & bits::EN != 0)
            .map(|b| b & 0xF0)
            .collect();

        // Three 8-bit function sets, then switch to 4-bit
        assert_eq!(&latched[..4], &[0x30, 0x30, 0x30, 0x20]);

        let commands = decode(&lcd.i2c.writes[4 * 3 + 1..]);
        assert_eq!(
            commands,
            [
                (false, 0x28),
                (false, 0x0C),
                (false, 0x01),
                (false, 0x06),
                (false, 0x02),
            ]
        );
    }

    #[test]
    fn test_draw_text_on_row_two() {
        let mut lcd = ready_lcd();

        lcd.draw_text(2, 0, "OK").unwrap();

        let sent = decode(&lcd.i2c.writes);
        assert_eq!(sent, [(false, 0x80 | 0x14), (true, b'O'), (true, b'K')]);
    }

    #[test]
    fn test_row_offsets() {
        let mut lcd = ready_lcd();

        lcd.set_cursor(5, 1).unwrap();
        lcd.set_cursor(19, 3).unwrap();

        let sent = decode(&lcd.i2c.writes);
        assert_eq!(sent, [(false, 0x80 | 0x45), (false, 0x80 | 0x67)]);
    }

    #[test]
    fn test_non_ascii_replaced() {
        let mut lcd = ready_lcd();
        lcd.write_str("é").unwrap();
        assert_eq!(decode(&lcd.i2c.writes), [(true, b'?')]);
    }

    #[test]
    fn test_out_of_range() {
        let mut lcd = ready_lcd();
        assert_eq!(
            lcd.draw_text(4, 0, "x"),
            Err(DisplayError::InvalidCoordinates)
        );
        assert_eq!(
            lcd.set_cursor(20, 0),
            Err(Hd44780Error::InvalidCoordinates)
        );
        assert!(lcd.i2c.writes.is_empty());
    }

    #[test]
    fn test_draw_before_init() {
        let mut lcd = Hd44780::new(RecordingBus::default(), NoDelay);
        assert_eq!(
            lcd.draw_text(0, 0, "x"),
            Err(DisplayError::NotInitialized)
        );
    }

    #[test]
    fn test_backlight_off() {
        let mut lcd = ready_lcd();
        lcd.set_backlight(false).unwrap();
        assert_eq!(lcd.i2c.writes, [(0x27, 0x00)]);
    }

    #[test]
    fn test_dimensions() {
        let lcd = ready_lcd();
        assert_eq!(lcd.dimensions(), (20, 4));
    }
}
