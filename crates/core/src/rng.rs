//! RNG module - bag randomizer
//!
//! A bag holds one of each of the seven kinds in random order. Pieces are
//! dispensed front to back; once the bag is empty a fresh permutation is
//! shuffled before the next draw. Any 7 consecutive draws that start on a bag
//! boundary therefore contain every kind exactly once.
//!
//! The bag owns a seeded [`StdRng`], so a seed fully determines the sequence.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::types::{PieceKind, PIECE_COUNT};

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct RandomBag {
    /// Current permutation
    bag: [PieceKind; PIECE_COUNT],
    /// How many entries at the tail of `bag` have not been dispensed yet (0..=7)
    remaining: usize,
    rng: StdRng,
}

impl RandomBag {
    /// Create an empty bag; the first draw fills it.
    pub fn new(seed: u64) -> Self {
        Self {
            bag: PieceKind::ALL,
            remaining: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Replace the bag with a fresh uniform permutation of all seven kinds.
    pub fn refill(&mut self) {
        self.bag = PieceKind::ALL;
        self.bag.shuffle(&mut self.rng);
        self.remaining = PIECE_COUNT;
    }

    /// Draw the next piece, refilling first when the bag is exhausted.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> PieceKind {
        if self.remaining == 0 {
            self.refill();
        }
        let piece = self.bag[PIECE_COUNT - self.remaining];
        self.remaining -= 1;
        piece
    }

    /// Pieces left before the next refill.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Undispensed part of the current bag, in draw order.
    pub fn pending(&self) -> &[PieceKind] {
        &self.bag[PIECE_COUNT - self.remaining..]
    }
}

impl Default for RandomBag {
    fn default() -> Self {
        Self::new(1)
    }
}
