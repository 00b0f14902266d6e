//! Host-side fakes for the hardware traits

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::string::String;
use std::vec::Vec;

use leadlink_hal::{AnalogInput, InputPin, SerialRx, SerialTx};

use crate::traits::{DisplayBackend, DisplayError};

/// Input pin whose level the test can change after handing it out
#[derive(Clone)]
pub struct SharedPin(Rc<Cell<bool>>);

impl SharedPin {
    pub fn new(high: bool) -> Self {
        Self(Rc::new(Cell::new(high)))
    }

    pub fn set(&self, high: bool) {
        self.0.set(high);
    }
}

impl InputPin for SharedPin {
    fn is_high(&mut self) -> bool {
        self.0.get()
    }
}

/// Analog channel with a settable reading
#[derive(Clone)]
pub struct SharedAnalog {
    value: Rc<Cell<u16>>,
    fail: Rc<Cell<bool>>,
}

impl SharedAnalog {
    pub fn new(value: u16) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
            fail: Rc::new(Cell::new(false)),
        }
    }

    pub fn set(&self, value: u16) {
        self.value.set(value);
    }

    pub fn fail(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl AnalogInput for SharedAnalog {
    type Error = ();

    fn read(&mut self) -> Result<u16, Self::Error> {
        if self.fail.get() {
            return Err(());
        }
        Ok(self.value.get())
    }
}

/// Serial link backed by in-memory queues
#[derive(Clone, Default)]
pub struct SharedLink {
    rx: Rc<RefCell<VecDeque<u8>>>,
    tx: Rc<RefCell<Vec<u8>>>,
}

impl SharedLink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes as if sent by the host
    pub fn send(&self, bytes: &[u8]) {
        self.rx.borrow_mut().extend(bytes.iter().copied());
    }

    /// Bytes not yet read by the device
    pub fn unread(&self) -> usize {
        self.rx.borrow().len()
    }

    /// Take everything the device wrote, as text
    pub fn take_output(&self) -> String {
        let bytes: Vec<u8> = self.tx.borrow_mut().drain(..).collect();
        String::from_utf8(bytes).unwrap()
    }
}

impl SerialRx for SharedLink {
    type Error = core::convert::Infallible;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        Ok(self.rx.borrow_mut().pop_front())
    }
}

impl SerialTx for SharedLink {
    type Error = core::convert::Infallible;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.borrow_mut().extend_from_slice(data);
        Ok(())
    }
}

/// Display that records every write
#[derive(Default)]
pub struct RecordingDisplay {
    writes: Vec<(u8, u8, String)>,
    attempts: usize,
    fail: bool,
    fail_next: usize,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> &[(u8, u8, String)] {
        &self.writes
    }

    /// Writes that targeted `row`
    pub fn row_writes(&self, row: u8) -> Vec<&str> {
        self.writes
            .iter()
            .filter(|(r, _, _)| *r == row)
            .map(|(_, _, text)| text.as_str())
            .collect()
    }

    pub fn clear(&mut self) {
        self.writes.clear();
    }

    /// Every `draw_text` call, including failed ones
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Fail only the next `count` writes
    pub fn fail_next(&mut self, count: usize) {
        self.fail_next = count;
    }
}

impl DisplayBackend for RecordingDisplay {
    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.attempts += 1;
        if self.fail_next > 0 {
            self.fail_next -= 1;
            return Err(DisplayError::Communication);
        }
        if self.fail {
            return Err(DisplayError::Communication);
        }
        self.writes.push((row, col, text.into()));
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (20, 4)
    }
}
