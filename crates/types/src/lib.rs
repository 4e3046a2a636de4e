//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the simulation, the renderer and the input layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: column 3, row 0 (board centre minus half a piece box)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 50 | Reference length of one fixed step |
//! | `GRAVITY_TICKS` | 20 | Steps per automatic drop (~1 second) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, Move, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.id(), 7);
//! assert_eq!(PieceKind::from_id(7), Some(piece));
//!
//! assert_eq!(GameAction::RotateCw.as_move(), Some(Move::RotateCw));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of distinct piece shapes.
pub const PIECE_COUNT: usize = 7;

/// Side length of the square box every shape is described in.
pub const BOX_SIZE: u8 = 4;

/// Reference fixed step in milliseconds.
pub const TICK_MS: u32 = 50;

/// Number of steps between two automatic drops.
pub const GRAVITY_TICKS: u32 = 20;

/// Column of a freshly spawned piece's bounding box.
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - (BOX_SIZE / 2) as i8;

/// Row of a freshly spawned piece's bounding box.
pub const SPAWN_Y: i8 = 0;

/// Points for clearing N lines with one lock, indexed by N.
///
/// Only 1..=4 are reachable: a piece is at most four cells tall.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_column_centres_the_piece_box() {
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn reference_cadence_is_one_drop_per_second() {
        assert_eq!(TICK_MS * GRAVITY_TICKS, 1000);
    }

    #[test]
    fn piece_ids_round_trip() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, i + 1);
            assert_eq!(PieceKind::from_id(kind.id()), Some(*kind));
        }
        assert_eq!(PieceKind::from_id(0), None);
        assert_eq!(PieceKind::from_id(8), None);
    }

    #[test]
    fn actions_split_into_moves_and_control() {
        assert_eq!(GameAction::MoveLeft.as_move(), Some(Move::Left));
        assert_eq!(GameAction::SoftDrop.as_move(), Some(Move::Down));
        assert_eq!(GameAction::RotateCcw.as_move(), Some(Move::RotateCcw));
        assert_eq!(GameAction::Reset.as_move(), None);
        assert_eq!(GameAction::Pause.as_move(), None);
    }
}

/// The seven piece kinds, in shape-id order.
///
/// Each kind has a fixed color tag:
/// - **I**: Cyan, straight bar
/// - **J**: Blue
/// - **L**: Orange (mirror of J)
/// - **O**: Yellow, 2x2 square
/// - **S**: Green
/// - **Z**: Red (mirror of S)
/// - **T**: Magenta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    Z,
    T,
}

impl PieceKind {
    /// Every kind, ordered by id.
    pub const ALL: [PieceKind; PIECE_COUNT] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Board cell value for this kind (1..=7).
    pub const fn id(self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
            PieceKind::T => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]. `0` and anything above 7 yield `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1..=7 => Some(Self::ALL[(id - 1) as usize]),
            _ => None,
        }
    }

    /// Color tag used when drawing cells of this kind.
    pub const fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::Cyan,
            PieceKind::J => PieceColor::Blue,
            PieceKind::L => PieceColor::Orange,
            PieceKind::O => PieceColor::Yellow,
            PieceKind::S => PieceColor::Green,
            PieceKind::Z => PieceColor::Red,
            PieceKind::T => PieceColor::Magenta,
        }
    }
}

/// Color tag carried by every shape. Mapping to real colors is up to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Cyan,
    Blue,
    Orange,
    Yellow,
    Green,
    Red,
    Magenta,
}

/// A single movement request against the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
}

impl Move {
    /// Translation applied by this move, `(0, 0)` for rotations.
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Move::Left => (-1, 0),
            Move::Right => (1, 0),
            Move::Down => (0, 1),
            Move::RotateCw | Move::RotateCcw => (0, 0),
        }
    }
}

/// Commands a player can issue.
///
/// `Pause` belongs to the control loop: the engine ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Start over with an empty board
    Reset,
    /// Toggle pause in the control loop
    Pause,
}

impl GameAction {
    /// The piece movement behind this action, if any.
    pub const fn as_move(self) -> Option<Move> {
        match self {
            GameAction::MoveLeft => Some(Move::Left),
            GameAction::MoveRight => Some(Move::Right),
            GameAction::SoftDrop => Some(Move::Down),
            GameAction::RotateCw => Some(Move::RotateCw),
            GameAction::RotateCcw => Some(Move::RotateCcw),
            GameAction::Reset | GameAction::Pause => None,
        }
    }
}

/// Event recorded after a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    /// The follow-up spawn failed and the game is over.
    pub topped_out: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell locked by a piece of that kind
///
/// Snapshots flatten this to `u8` via [`cell_value`].
pub type Cell = Option<PieceKind>;

/// Numeric cell value: 0 for empty, otherwise the shape id.
pub fn cell_value(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::id)
}
