//! Scoring module - fixed line-clear table
//!
//! One lock can clear at most four rows. Points depend only on that count:
//! 100 / 300 / 500 / 800. There are no levels, combos or drop bonuses.

use crate::types::LINE_SCORES;

/// Points for clearing `lines` rows with a single lock. Zero or more than four scores nothing.
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES.get(lines).copied().unwrap_or(0)
}
