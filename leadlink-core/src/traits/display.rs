//! Character display backend trait

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Text-mode display
///
/// Implementations write characters straight to the glass; there is no
/// frame buffer to flush.
pub trait DisplayBackend {
    /// Draw text at the specified row and column
    ///
    /// - `row`: Row number (0-based)
    /// - `col`: Column number in characters (0-based)
    /// - `text`: ASCII text to display
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}

impl<T: DisplayBackend + ?Sized> DisplayBackend for &mut T {
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        T::draw_text(self, row, col, text)
    }

    fn dimensions(&self) -> (u8, u8) {
        T::dimensions(self)
    }
}
