//! GPIO pin abstractions
//!
//! Digital inputs sampled by the monitor cycle.

/// Digital input pin
///
/// Implementations read the instantaneous level of the pin; no debouncing
/// is expected at this layer.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        T::is_high(self)
    }
}

/// Input pin with a fixed level
///
/// Useful for boards where one of the leads-off outputs is not wired, and
/// for host-side tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FixedLevel(pub bool);

impl InputPin for FixedLevel {
    fn is_high(&mut self) -> bool {
        self.0
    }
}
