//! Line tokenizer for the inbound host stream.
//!
//! Bytes are collected into a fixed buffer of [`TOKEN_CAPACITY`] slots, the
//! last of which is reserved for the terminator. Once the cursor reaches the
//! terminator slot it stays there: further bytes overwrite that slot and are
//! dropped when the delimiter arrives, so a token never holds more than
//! [`TOKEN_DATA_LEN`] bytes.

use heapless::Vec;
use leadlink_hal::SerialRx;

/// Line delimiter
pub const DELIMITER: u8 = b'\n';

/// Buffer capacity in bytes, terminator slot included
pub const TOKEN_CAPACITY: usize = 3;

/// Maximum number of data bytes in a token
pub const TOKEN_DATA_LEN: usize = TOKEN_CAPACITY - 1;

/// Heartbeat line sent by the host
pub const HEARTBEAT: &[u8] = b"OK";

/// One completed inbound line, delimiter stripped
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Token {
    data: Vec<u8, TOKEN_DATA_LEN>,
}

impl Token {
    /// Build a token from raw bytes, keeping at most [`TOKEN_DATA_LEN`]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(TOKEN_DATA_LEN);
        let mut data = Vec::new();
        // Cannot fail: len is bounded by the capacity
        let _ = data.extend_from_slice(&bytes[..len]);
        Self { data }
    }

    /// Token content
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of data bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the line was empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Check if this token is the host heartbeat (exact match)
    pub fn is_heartbeat(&self) -> bool {
        self.as_bytes() == HEARTBEAT
    }
}

/// Accumulates inbound bytes into [`Token`]s
#[derive(Debug, Clone)]
pub struct LineTokenizer {
    buffer: [u8; TOKEN_CAPACITY],
    cursor: usize,
}

impl Default for LineTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineTokenizer {
    /// Create an empty tokenizer
    pub const fn new() -> Self {
        Self {
            buffer: [0; TOKEN_CAPACITY],
            cursor: 0,
        }
    }

    /// Number of bytes held for the line in progress
    pub fn pending(&self) -> usize {
        self.cursor
    }

    /// Feed a single byte
    ///
    /// Returns `Some(token)` when `byte` is the delimiter.
    pub fn feed(&mut self, byte: u8) -> Option<Token> {
        if byte == DELIMITER {
            self.buffer[self.cursor] = 0;
            let token = Token::from_bytes(&self.buffer[..self.cursor]);
            self.cursor = 0;
            return Some(token);
        }

        self.buffer[self.cursor] = byte;
        self.cursor = (self.cursor + 1).min(TOKEN_CAPACITY - 1);
        None
    }

    /// Feed bytes until the first token completes
    ///
    /// Bytes after the delimiter are not consumed. Returns the token and the
    /// number of bytes consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (Option<Token>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            if let Some(token) = self.feed(byte) {
                return (Some(token), i + 1);
            }
        }
        (None, bytes.len())
    }

    /// Drain the bytes currently available on `rx`
    ///
    /// Never waits for input. Stops right after the first completed line so
    /// at most one token is produced per call; anything behind it stays
    /// buffered in the transport for the next poll.
    pub fn poll<R: SerialRx>(&mut self, rx: &mut R) -> Result<Option<Token>, R::Error> {
        while let Some(byte) = rx.try_read_byte()? {
            if let Some(token) = self.feed(byte) {
                return Ok(Some(token));
            }
        }
        Ok(None)
    }
}
