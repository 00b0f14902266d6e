//! Board-agnostic core logic for the ECG lead monitor
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Link and lead state machines
//! - Heartbeat monitoring with timeout
//! - Leads-off fault detection
//! - Display presenter for the 20x4 character display
//! - The monitor cycle tying it all together
//! - Fixed timing and geometry constants

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod heartbeat;
pub mod leads;
pub mod monitor;
pub mod presenter;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
