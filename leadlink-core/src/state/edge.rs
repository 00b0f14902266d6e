//! Change detection for sampled state

/// Remembers the last value and reports only changes
#[derive(Debug, Clone, Copy)]
pub struct EdgeDetector<T> {
    current: T,
}

impl<T: Copy + PartialEq> EdgeDetector<T> {
    pub const fn new(initial: T) -> Self {
        Self { current: initial }
    }

    /// Record a new sample
    ///
    /// Returns `Some(value)` if it differs from the previous sample.
    pub fn update(&mut self, value: T) -> Option<T> {
        if value == self.current {
            return None;
        }
        self.current = value;
        Some(value)
    }

    pub fn current(&self) -> T {
        self.current
    }
}
