//! State machines for link and lead status
//!
//! Both machines are tiny and explicit: each state is a function of the
//! previous state and an event. Changes are reported as `Option<new_state>`
//! so callers can redraw on transitions only.

pub mod edge;
pub mod events;
pub mod machine;

pub use edge::EdgeDetector;
pub use events::LinkEvent;
pub use machine::{ConnectionState, LeadPlacement};
