//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in leadlink-core:
//!
//! - Character LCD (HD44780 behind a PCF8574 I2C backpack)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod lcd;
