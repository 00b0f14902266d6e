//! Leadlink Hardware Abstraction Layer
//!
//! This crate defines the hardware traits the monitor logic is written
//! against. The firmware implements them on top of embassy-rp; tests
//! implement them with in-memory fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  leadlink-core (monitor cycle)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  leadlink-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ leadlink-     │       │  host-side    │
//! │ firmware      │       │  test fakes   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Digital input (leads-off detection)
//! - [`adc::AnalogInput`] - Analog sampling (ECG signal)
//! - [`uart::SerialRx`], [`uart::SerialTx`] - Host serial link

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use gpio::InputPin;
pub use uart::{SerialRx, SerialTx, UartConfig};
