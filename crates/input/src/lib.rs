//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. One key
//! press yields at most one action; the control loop applies at most one
//! action per step, so there is no auto-repeat handling here.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
