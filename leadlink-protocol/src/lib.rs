//! Host Serial Link Protocol
//!
//! This crate defines the line-based protocol between the monitor and the
//! host computer. The link is plain text, one message per line:
//!
//! ```text
//! host   -> device   "OK\n"                heartbeat, keeps the link alive
//! device -> host     "(<uptime_ms> <adc>)\r\n"   one telemetry line per cycle
//! ```
//!
//! Inbound lines other than the heartbeat are ignored. There is no framing,
//! escaping or checksum; over-long inbound lines are truncated by the
//! tokenizer rather than rejected.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod telemetry;
pub mod token;

pub use telemetry::{Telemetry, TELEMETRY_LINE_LEN};
pub use token::{LineTokenizer, Token, DELIMITER, HEARTBEAT, TOKEN_CAPACITY, TOKEN_DATA_LEN};
