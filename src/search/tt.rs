//! Transposition table for caching search results
//!
//! The table stores search results indexed by position fingerprint, so a
//! position reached through a different move order is not searched twice.
//!
//! # Example
//!
//! ```
//! use renju::board::Pos;
//! use renju::search::{EntryType, TranspositionTable};
//!
//! let mut tt = TranspositionTable::new(1 << 10);
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 5, 100, EntryType::Exact, Some(Pos::new(7, 7)));
//!
//! let entry = tt.lookup(hash).unwrap();
//! assert_eq!(entry.usable_score(5, -1000, 1000), Some(100));
//! assert_eq!(entry.best_move, Some(Pos::new(7, 7)));
//! ```

use crate::board::Pos;

/// Default number of slots
pub const DEFAULT_TT_ENTRIES: usize = 1 << 18;

/// How a stored score relates to the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// The search completed inside the window
    Exact,
    /// Score >= stored value (beta cutoff)
    LowerBound,
    /// Score <= stored value (failed low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: i8,
    pub score: i32,
    pub entry_type: EntryType,
    pub best_move: Option<Pos>,
}

impl TTEntry {
    /// The stored score if it settles a search of `depth` with the window
    /// `(alpha, beta)`.
    #[must_use]
    pub fn usable_score(&self, depth: i8, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        match self.entry_type {
            EntryType::Exact => Some(self.score),
            EntryType::LowerBound if self.score >= beta => Some(self.score),
            EntryType::UpperBound if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

/// Direct-mapped table: each fingerprint maps to exactly one slot and
/// collisions are settled by search depth.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: usize,
    hits: u64,
    misses: u64,
}

impl TranspositionTable {
    /// Create a table with at least `entries` slots, rounded up to a power
    /// of two.
    #[must_use]
    pub fn new(entries: usize) -> Self {
        let size = entries.max(1).next_power_of_two();
        Self {
            entries: vec![None; size],
            mask: size - 1,
            hits: 0,
            misses: 0,
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & self.mask
    }

    /// Number of slots.
    #[must_use]
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    /// Fetch the entry stored for `hash`, counting a hit or a miss.
    pub fn lookup(&mut self, hash: u64) -> Option<TTEntry> {
        let found = self.entries[self.index(hash)].filter(|e| e.hash == hash);
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Best move from a previous search, for move ordering. Not counted.
    #[must_use]
    pub fn get_best_move(&self, hash: u64) -> Option<Pos> {
        self.entries[self.index(hash)]
            .filter(|e| e.hash == hash)
            .and_then(|e| e.best_move)
    }

    /// Store a search result.
    ///
    /// Depth-preferred: an occupied slot is only overwritten by a result at
    /// least as deep as the one it holds.
    pub fn store(
        &mut self,
        hash: u64,
        depth: i8,
        score: i32,
        entry_type: EntryType,
        best_move: Option<Pos>,
    ) {
        let idx = self.index(hash);
        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => depth >= e.depth,
        };

        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
                best_move,
            });
        }
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.fill(None);
        self.hits = 0;
        self.misses = 0;
    }

    /// Fraction of lookups that found an entry, 0.0 before any lookup.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        let size = self.size();
        TTStats {
            size,
            used,
            usage_percent: (used as f64 / size as f64 * 100.0) as u8,
            hits: self.hits,
            misses: self.misses,
        }
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(DEFAULT_TT_ENTRIES)
    }
}

/// Statistics about table usage.
#[derive(Debug, Clone, Copy)]
pub struct TTStats {
    /// Total number of slots
    pub size: usize,
    /// Slots currently occupied
    pub used: usize,
    /// Percentage of the table in use (0-100)
    pub usage_percent: u8,
    pub hits: u64,
    pub misses: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: u64 = 0x1234_5678_9ABC_DEF0;

    #[test]
    fn test_tt_store_lookup_exact() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 5, 100, EntryType::Exact, Some(Pos::new(7, 7)));

        let entry = tt.lookup(HASH).unwrap();
        assert_eq!(entry.usable_score(5, -1000, 1000), Some(100));
        assert_eq!(entry.best_move, Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_tt_depth_requirement() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 3, 100, EntryType::Exact, Some(Pos::new(7, 7)));

        let entry = tt.lookup(HASH).unwrap();
        assert_eq!(entry.usable_score(5, -1000, 1000), None);
        assert_eq!(entry.usable_score(3, -1000, 1000), Some(100));
        // The move is still there for ordering
        assert_eq!(tt.get_best_move(HASH), Some(Pos::new(7, 7)));
    }

    #[test]
    fn test_tt_bound_cutoffs() {
        let lower = TTEntry {
            hash: HASH,
            depth: 4,
            score: 500,
            entry_type: EntryType::LowerBound,
            best_move: None,
        };
        assert_eq!(lower.usable_score(4, -1000, 400), Some(500));
        assert_eq!(lower.usable_score(4, -1000, 600), None);

        let upper = TTEntry { entry_type: EntryType::UpperBound, ..lower };
        assert_eq!(upper.usable_score(4, 600, 1000), Some(500));
        assert_eq!(upper.usable_score(4, 400, 1000), None);
    }

    #[test]
    fn test_tt_hash_mismatch() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 5, 100, EntryType::Exact, None);
        // Same slot, different fingerprint
        assert!(tt.lookup(HASH ^ (1 << 40)).is_none());
        assert!(tt.get_best_move(HASH ^ (1 << 40)).is_none());
    }

    #[test]
    fn test_tt_replacement_deeper_wins() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 3, 100, EntryType::Exact, Some(Pos::new(5, 5)));
        tt.store(HASH, 5, 200, EntryType::Exact, Some(Pos::new(9, 9)));

        let entry = tt.lookup(HASH).unwrap();
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 200);
    }

    #[test]
    fn test_tt_no_replacement_by_shallower() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 5, 100, EntryType::Exact, Some(Pos::new(5, 5)));
        tt.store(HASH, 3, 200, EntryType::Exact, Some(Pos::new(9, 9)));
        // Colliding fingerprint in the same slot
        tt.store(HASH ^ (1 << 40), 2, 300, EntryType::Exact, None);

        let entry = tt.lookup(HASH).unwrap();
        assert_eq!(entry.depth, 5);
        assert_eq!(entry.score, 100);
        assert_eq!(entry.best_move, Some(Pos::new(5, 5)));
    }

    #[test]
    fn test_tt_replacement_same_depth() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 4, 100, EntryType::LowerBound, None);
        tt.store(HASH, 4, 150, EntryType::Exact, None);
        assert_eq!(tt.lookup(HASH).unwrap().score, 150);
    }

    #[test]
    fn test_tt_clear() {
        let mut tt = TranspositionTable::new(1024);
        tt.store(HASH, 5, 100, EntryType::Exact, None);
        let _ = tt.lookup(HASH);
        tt.clear();

        assert_eq!(tt.hit_rate(), 0.0);
        assert!(tt.lookup(HASH).is_none());
    }

    #[test]
    fn test_tt_hit_rate() {
        let mut tt = TranspositionTable::new(1024);
        assert_eq!(tt.hit_rate(), 0.0);

        tt.store(0x111, 5, 100, EntryType::Exact, None);
        assert!(tt.lookup(0x111).is_some());
        assert!(tt.lookup(0x222).is_none());
        assert!((tt.hit_rate() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_tt_stats() {
        let mut tt = TranspositionTable::new(1024);
        let stats = tt.stats();
        assert_eq!(stats.used, 0);
        assert_eq!(stats.usage_percent, 0);

        tt.store(0x111, 5, 100, EntryType::Exact, None);
        tt.store(0x222, 5, 100, EntryType::Exact, None);

        let stats = tt.stats();
        assert_eq!(stats.used, 2);
        assert_eq!(stats.size, 1024);
    }

    #[test]
    fn test_tt_size_rounds_to_power_of_two() {
        assert_eq!(TranspositionTable::new(1000).size(), 1024);
        assert_eq!(TranspositionTable::new(0).size(), 1);
        assert_eq!(TranspositionTable::default().size(), DEFAULT_TT_ENTRIES);
    }
}
