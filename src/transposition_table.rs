//! Direct-mapped transposition table.
//!
//! Sized as a fixed power of two ([`crate::constants::DEFAULT_TT_SIZE`]);
//! there is no USI `Hash` option to resize it, matching the source engine,
//! which never exposed one. Entries are always replaced on store (no
//! depth-preferred or generation-aware policy), so a probe must always
//! re-check the stored key before trusting a hit.

use crate::constants::Score;

/// What kind of bound `score` represents relative to the window the search
/// was called with.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Bound {
    Upper,
    Lower,
    Exact,
}

#[derive(Clone, Copy)]
pub struct TTEntry {
    pub key: u64,
    pub score: Score,
    pub depth: i32,
    pub bound: Bound,
}

impl TTEntry {
    const EMPTY: TTEntry = TTEntry {
        key: 0,
        score: 0,
        depth: 0,
        bound: Bound::Exact,
    };
}

pub struct TranspositionTable {
    entries: Vec<TTEntry>,
    mask: u64,
}

impl TranspositionTable {
    pub fn new(size: usize) -> Self {
        assert!(size.is_power_of_two(), "transposition table size must be a power of two");
        TranspositionTable {
            entries: vec![TTEntry::EMPTY; size],
            mask: (size - 1) as u64,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key & self.mask) as usize
    }

    /// Looks up the entry slotted for `key`, regardless of whether it
    /// actually matches `key` — callers must compare `entry.key` themselves
    /// (the slot may hold a different position's stale entry).
    #[inline]
    pub fn probe(&self, key: u64) -> TTEntry {
        self.entries[self.index(key)]
    }

    #[inline]
    pub fn store(&mut self, key: u64, score: Score, depth: i32, bound: Bound) {
        let idx = self.index(key);
        self.entries[idx] = TTEntry {
            key,
            score,
            depth,
            bound,
        };
    }

    pub fn clear(&mut self) {
        self.entries.fill(TTEntry::EMPTY);
    }
}
