//! Zobrist fingerprints for position identification
//!
//! The key table is built once from a fixed seed and never changes, so a
//! fingerprint is a pure function of the stone configuration. Placing a
//! stone XORs its key in, removing it XORs the same key out.
//!
//! # Example
//!
//! ```
//! use renju::board::{Board, Pos, Stone, ZOBRIST};
//!
//! let mut board = Board::new();
//! let before = board.fingerprint();
//!
//! let pos = Pos::new(7, 7);
//! board.place(pos, Stone::Black);
//! assert_eq!(board.fingerprint(), before ^ ZOBRIST.stone_key(pos, Stone::Black));
//!
//! board.undo(pos);
//! assert_eq!(board.fingerprint(), before);
//! ```

use lazy_static::lazy_static;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use super::{Board, Pos, Stone, TOTAL_CELLS};

const ZOBRIST_SEED: u64 = 12_345;

/// Per-cell, per-color random keys plus a side-to-move key.
pub struct ZobristTable {
    /// Indexed by `[cell][stone]`; the `Empty` column is generated but unused
    stones: [[u64; 3]; TOTAL_CELLS],
    /// XORed into search keys when White is to move
    white_to_move: u64,
}

impl Default for ZobristTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ZobristTable {
    /// Build the table from the fixed seed.
    #[must_use]
    pub fn new() -> Self {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(ZOBRIST_SEED);

        let mut stones = [[0u64; 3]; TOTAL_CELLS];
        for cell in stones.iter_mut() {
            for key in cell.iter_mut() {
                *key = rng.random();
            }
        }

        Self {
            stones,
            white_to_move: rng.random(),
        }
    }

    /// Key for `stone` at `pos`. Empty cells contribute nothing.
    #[inline]
    pub fn stone_key(&self, pos: Pos, stone: Stone) -> u64 {
        match stone {
            Stone::Empty => 0,
            _ => self.stones[pos.to_index()][stone.index()],
        }
    }

    /// Side-to-move component used by search keys.
    #[inline]
    pub fn side_key(&self, to_move: Stone) -> u64 {
        match to_move {
            Stone::White => self.white_to_move,
            _ => 0,
        }
    }

    /// Recompute a fingerprint from scratch.
    #[must_use]
    pub fn hash(&self, board: &Board) -> u64 {
        let mut h = 0u64;
        for stone in [Stone::Black, Stone::White] {
            if let Some(bits) = board.stones(stone) {
                for pos in bits.iter_ones() {
                    h ^= self.stone_key(pos, stone);
                }
            }
        }
        h
    }
}

lazy_static! {
    /// Process-wide key table.
    pub static ref ZOBRIST: ZobristTable = ZobristTable::new();
}
