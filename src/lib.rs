//! Blockfall: a falling-block puzzle game for the terminal.
//!
//! Workspace facade. The rules live in [`core`], key mapping in [`input`] and
//! drawing in [`term`]; this package adds configuration, logging and the
//! [`Session`] control loop used by the binary.

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub mod config;
pub mod logging;
pub mod session;

pub use config::Config;
pub use session::{queue_command, Session};
