//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, state and fixed-step simulation of the
//! falling-block game. It has no dependencies on terminals or other I/O:
//!
//! - **Deterministic**: the same seed and the same command sequence give the same game
//! - **Allocation-free** on the tick path (flat board, bit-mask shapes)
//! - **Observable** through [`GameSnapshot`] and [`LockEvent`](types::LockEvent)
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision, locking and line compaction
//! - [`pieces`]: the seven shapes as 4x4 occupancy masks
//! - [`rotation`]: quarter turns as index permutations
//! - [`rng`]: seeded 7-bag randomizer
//! - [`scoring`]: 100 / 300 / 500 / 800 line table
//! - [`game_state`]: the simulation engine
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules
//!
//! - Pieces spawn with their 4x4 box at column 3, row 0
//! - Rotation is a plain permutation, there are no wall kicks
//! - Gravity moves the piece one row every 20 steps; a piece that cannot
//!   fall locks on that step
//! - Soft drop moves one row and never locks
//! - A spawn that does not fit ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_core::types::{GameAction, GRAVITY_TICKS};
//!
//! let mut game = GameState::new(12345);
//! let y = game.active().unwrap().y;
//!
//! game.apply_action(GameAction::MoveRight);
//! for _ in 0..GRAVITY_TICKS {
//!     game.tick();
//! }
//!
//! assert_eq!(game.active().unwrap().y, y + 1);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::Board;
pub use game_state::{ActivePiece, GameState};
pub use pieces::{shape, spawn_occupancy, Occupancy, Shape, SHAPES};
pub use rng::RandomBag;
pub use rotation::{rotate_ccw, rotate_cw};
pub use scoring::line_clear_score;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
