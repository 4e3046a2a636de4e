//! Rotation transform - quarter turns as fixed index permutations
//!
//! No matrices and no kick tables: a rotation maps every cell index of the 4x4
//! box to a new index, picked per shape family.
//!
//! - **I, O** turn about the centre of the full 4x4 box.
//! - **J, L, S, Z, T** turn about the centre of the upper-left 3x3 box; the
//!   fourth row and column map to themselves since those shapes never reach them.
//!
//! With rows growing downward the source formulas (`12 + y - 4x` and
//! `8 + y - 4x`) turn a shape counter-clockwise, so they back [`rotate_ccw`].
//! [`rotate_cw`] uses the inverse permutation.

use crate::pieces::Occupancy;
use crate::types::PieceKind;

/// Which box a shape rotates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationFrame {
    /// Full 4x4 box (I, O).
    Box4,
    /// Upper-left 3x3 box (J, L, S, Z, T).
    Box3,
}

impl RotationFrame {
    pub fn for_kind(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I | PieceKind::O => RotationFrame::Box4,
            PieceKind::J | PieceKind::L | PieceKind::S | PieceKind::Z | PieceKind::T => {
                RotationFrame::Box3
            }
        }
    }

    /// Largest coordinate inside the frame (3 for 4x4, 2 for 3x3).
    const fn last(self) -> usize {
        match self {
            RotationFrame::Box4 => 3,
            RotationFrame::Box3 => 2,
        }
    }
}

/// Turn direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Cw,
    Ccw,
}

/// Destination index of the box cell `(x, y)` after one quarter turn.
pub fn rotated_index(x: usize, y: usize, frame: RotationFrame, turn: Turn) -> usize {
    let last = frame.last();
    if x > last || y > last {
        return x + 4 * y;
    }
    match turn {
        // 12 + y - 4x for the 4x4 frame, 8 + y - 4x for the 3x3 frame.
        Turn::Ccw => 4 * last + y - 4 * x,
        Turn::Cw => 4 * x + last - y,
    }
}

/// Apply one quarter turn to `occupancy`. Pure: the input is left untouched.
pub fn rotate(occupancy: Occupancy, kind: PieceKind, turn: Turn) -> Occupancy {
    let frame = RotationFrame::for_kind(kind);
    let mut out = Occupancy::EMPTY;
    for (x, y) in occupancy.cells() {
        out = out.with_index(rotated_index(x as usize, y as usize, frame, turn));
    }
    out
}

pub fn rotate_cw(occupancy: Occupancy, kind: PieceKind) -> Occupancy {
    rotate(occupancy, kind, Turn::Cw)
}

pub fn rotate_ccw(occupancy: Occupancy, kind: PieceKind) -> Occupancy {
    rotate(occupancy, kind, Turn::Ccw)
}
