//! Terminal rendering for the game.
//!
//! A small, game-oriented layer: [`GameView`] draws a [`core::GameSnapshot`]
//! into a [`FrameBuffer`], and [`TerminalRenderer`] pushes the changed cells
//! to the terminal through `crossterm`.
//!
//! Board cells are two columns wide by default to compensate for the usual
//! glyph aspect ratio.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{piece_rgb, AnchorY, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
