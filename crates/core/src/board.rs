//! Board module - the grid of locked cells
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Storage is a flat row-major array (no allocation).
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Anything outside that range counts as blocked.

use arrayvec::ArrayVec;

use crate::pieces::Occupancy;
use crate::types::{cell_value, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// Row indices, bottom row first. Sized for a whole board so callers may pass any set.
pub type RowList = ArrayVec<usize, HEIGHT>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty.
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Blocked for a piece: filled, or outside the grid.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        !self.is_valid(x, y)
    }

    /// True iff all ten cells of row `y` are filled. Rows outside the board are never full.
    pub fn line_is_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// All full rows, bottom to top.
    pub fn full_rows(&self) -> RowList {
        (0..HEIGHT).rev().filter(|&y| self.line_is_full(y)).collect()
    }

    /// Whether `occupancy` placed with its box at `(x, y)` covers only empty,
    /// in-bounds cells.
    pub fn fits(&self, occupancy: Occupancy, x: i8, y: i8) -> bool {
        occupancy
            .cells()
            .all(|(dx, dy)| self.is_valid(x + dx, y + dy))
    }

    /// Write a piece's cells into the board.
    ///
    /// Returns false and leaves the board untouched if any target cell is
    /// blocked.
    pub fn lock(&mut self, occupancy: Occupancy, x: i8, y: i8, kind: PieceKind) -> bool {
        if !self.fits(occupancy, x, y) {
            return false;
        }
        for (dx, dy) in occupancy.cells() {
            self.set(x + dx, y + dy, Some(kind));
        }
        true
    }

    /// Clear `rows` and compact everything above them downward, in one
    /// bottom-up pass.
    ///
    /// The pass keeps a shift amount that grows by one for each selected row;
    /// selected rows are dropped and every other row moves down by the current
    /// shift. The vacated top rows end up empty. Indices outside the board are
    /// ignored. Returns the number of rows cleared.
    pub fn clear_and_compact(&mut self, rows: &[usize]) -> usize {
        let mut selected = [false; HEIGHT];
        for &y in rows {
            if y < HEIGHT {
                selected[y] = true;
            }
        }

        let mut shift = 0usize;
        for y in (0..HEIGHT).rev() {
            if selected[y] {
                self.row_mut(y).fill(None);
                shift += 1;
            } else if shift > 0 {
                let src = y * WIDTH;
                self.cells.copy_within(src..src + WIDTH, src + shift * WIDTH);
            }
        }

        for y in 0..shift {
            self.row_mut(y).fill(None);
        }

        shift
    }

    /// Row `y` as a slice, or `None` below the floor.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= HEIGHT {
            return None;
        }
        let start = y * WIDTH;
        Some(&self.cells[start..start + WIDTH])
    }

    fn row_mut(&mut self, y: usize) -> &mut [Cell] {
        let start = y * WIDTH;
        &mut self.cells[start..start + WIDTH]
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of non-empty cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Write the board as numeric cell values (0 empty, 1..=7 shape id).
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; HEIGHT]) {
        for (y, row) in out.iter_mut().enumerate() {
            for (x, v) in row.iter_mut().enumerate() {
                *v = cell_value(self.cells[y * WIDTH + x]);
            }
        }
    }

    /// Build a board from rows of shape ids (0 empty). Unknown ids become empty.
    pub fn from_u8_grid(grid: &[[u8; WIDTH]; HEIGHT]) -> Self {
        let mut board = Self::new();
        for (y, row) in grid.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                board.cells[y * WIDTH + x] = PieceKind::from_id(v);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
