//! Pieces module - the static shape catalog
//!
//! Every shape is a 4x4 occupancy mask in its base orientation plus a color tag.
//! Masks are row-major: index `y * 4 + x`, `x` the column and `y` the row inside
//! the box. The table is built once at compile time and never mutated; rotating
//! a piece produces a new [`Occupancy`] value (see [`crate::rotation`]).

use crate::types::{PieceColor, PieceKind, BOX_SIZE, PIECE_COUNT};

/// 4x4 occupancy mask stored as 16 bits, bit `y * 4 + x` set when filled.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Occupancy {
    bits: u16,
}

impl Occupancy {
    /// Mask with no filled cells.
    pub const EMPTY: Occupancy = Occupancy { bits: 0 };

    /// Build a mask from four rows of 0/1 flags, top row first.
    pub const fn from_grid(grid: [[u8; 4]; 4]) -> Self {
        let mut bits = 0u16;
        let mut y = 0;
        while y < 4 {
            let mut x = 0;
            while x < 4 {
                if grid[y][x] != 0 {
                    bits |= 1 << (y * 4 + x);
                }
                x += 1;
            }
            y += 1;
        }
        Self { bits }
    }

    pub const fn from_bits(bits: u16) -> Self {
        Self { bits }
    }

    pub const fn bits(self) -> u16 {
        self.bits
    }

    /// Whether the cell at row-major `index` (0..16) is filled.
    #[inline(always)]
    pub const fn is_set_index(self, index: usize) -> bool {
        index < 16 && self.bits & (1 << index) != 0
    }

    /// Whether the cell at column `x`, row `y` of the box is filled.
    #[inline(always)]
    pub const fn is_set(self, x: u8, y: u8) -> bool {
        x < BOX_SIZE && y < BOX_SIZE && self.is_set_index((y * BOX_SIZE + x) as usize)
    }

    /// Copy of this mask with the cell at `index` filled.
    pub const fn with_index(self, index: usize) -> Self {
        Self {
            bits: self.bits | (1 << index),
        }
    }

    /// Number of filled cells.
    pub const fn count(self) -> u32 {
        self.bits.count_ones()
    }

    /// Filled cells as `(x, y)` offsets inside the box, row-major order.
    pub fn cells(self) -> impl Iterator<Item = (i8, i8)> {
        (0..16usize)
            .filter(move |&i| self.is_set_index(i))
            .map(|i| ((i % 4) as i8, (i / 4) as i8))
    }

    /// True when the filled cells form one edge-connected group.
    pub fn is_connected(self) -> bool {
        let Some(start) = (0..16usize).find(|&i| self.is_set_index(i)) else {
            return false;
        };

        let mut seen = 1u16 << start;
        let mut stack = [0usize; 16];
        let mut top = 1;
        stack[0] = start;

        while top > 0 {
            top -= 1;
            let i = stack[top];
            let (x, y) = (i % 4, i / 4);
            let neighbours = [
                (x > 0).then(|| i - 1),
                (x < 3).then(|| i + 1),
                (y > 0).then(|| i - 4),
                (y < 3).then(|| i + 4),
            ];
            for n in neighbours.into_iter().flatten() {
                if self.is_set_index(n) && seen & (1 << n) == 0 {
                    seen |= 1 << n;
                    stack[top] = n;
                    top += 1;
                }
            }
        }

        seen == self.bits
    }
}

impl std::fmt::Debug for Occupancy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rows = [[b'.'; 4]; 4];
        for (x, y) in self.cells() {
            rows[y as usize][x as usize] = b'#';
        }
        f.debug_list()
            .entries(rows.iter().map(|r| std::str::from_utf8(r).unwrap_or("????")))
            .finish()
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub kind: PieceKind,
    pub color: PieceColor,
    pub occupancy: Occupancy,
}

/// The seven shapes in base orientation, indexed by `id - 1`.
pub static SHAPES: [Shape; PIECE_COUNT] = [
    Shape {
        kind: PieceKind::I,
        color: PieceColor::Cyan,
        occupancy: Occupancy::from_grid([
            [0, 0, 0, 0],
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
    },
    Shape {
        kind: PieceKind::J,
        color: PieceColor::Blue,
        occupancy: Occupancy::from_grid([
            [1, 0, 0, 0],
            [1, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
    },
    Shape {
        kind: PieceKind::L,
        color: PieceColor::Orange,
        occupancy: Occupancy::from_grid([
            [0, 0, 1, 0],
            [1, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
    },
    Shape {
        kind: PieceKind::O,
        color: PieceColor::Yellow,
        occupancy: Occupancy::from_grid([
            [0, 0, 0, 0],
            [0, 1, 1, 0],
            [0, 1, 1, 0],
            [0, 0, 0, 0],
        ]),
    },
    Shape {
        kind: PieceKind::S,
        color: PieceColor::Green,
        occupancy: Occupancy::from_grid([
            [0, 1, 1, 0],
            [1, 1, 0, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
    },
    Shape {
        kind: PieceKind::Z,
        color: PieceColor::Red,
        occupancy: Occupancy::from_grid([
            [1, 1, 0, 0],
            [0, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
    },
    Shape {
        kind: PieceKind::T,
        color: PieceColor::Magenta,
        occupancy: Occupancy::from_grid([
            [0, 1, 0, 0],
            [1, 1, 1, 0],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
    },
];

/// Catalog entry for a kind.
pub fn shape(kind: PieceKind) -> &'static Shape {
    &SHAPES[(kind.id() - 1) as usize]
}

/// Base-orientation occupancy for a kind.
pub fn spawn_occupancy(kind: PieceKind) -> Occupancy {
    shape(kind).occupancy
}
