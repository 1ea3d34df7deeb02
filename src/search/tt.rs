//! Transposition table caching negamax results within one search
//!
//! # Example
//!
//! ```
//! use gomoku::search::{TranspositionTable, EntryType};
//!
//! let mut tt = TranspositionTable::new(1); // 1 MB
//!
//! let hash = 0x1234_5678_9ABC_DEF0;
//! tt.store(hash, 3, 42.0, EntryType::Exact);
//!
//! assert_eq!(tt.probe(hash, 3, -100.0, 100.0), Some(42.0));
//! assert_eq!(tt.probe(hash, 4, -100.0, 100.0), None); // not deep enough
//! ```

/// Entry type for score interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    /// Exact score - the search completed inside the window
    Exact,
    /// Lower bound - score >= stored value (beta cutoff)
    LowerBound,
    /// Upper bound - score <= stored value (alpha fail-low)
    UpperBound,
}

/// Transposition table entry
#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    /// Zobrist hash of the position (side to move included)
    pub hash: u64,
    /// Remaining depth the score was searched to
    pub depth: u8,
    /// Negamax score from the side to move
    pub score: f64,
    pub entry_type: EntryType,
}

/// Direct-mapped table: each hash owns exactly one slot, deeper results win
/// on collision.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    /// Create a table of roughly `size_mb` megabytes (at least 1024 slots).
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let size = ((size_mb * 1024 * 1024) / entry_size).max(1024);
        Self {
            entries: vec![None; size],
            size,
        }
    }

    #[inline]
    fn slot(&self, hash: u64) -> usize {
        #[allow(clippy::cast_possible_truncation)]
        let idx = (hash % self.size as u64) as usize;
        idx
    }

    /// Usable score for `hash` searched to at least `depth` under the
    /// `(alpha, beta)` window, if any.
    #[must_use]
    pub fn probe(&self, hash: u64, depth: u8, alpha: f64, beta: f64) -> Option<f64> {
        let entry = self.entries[self.slot(hash)]?;
        if entry.hash != hash || entry.depth < depth {
            return None;
        }
        match entry.entry_type {
            EntryType::Exact => Some(entry.score),
            EntryType::LowerBound if entry.score >= beta => Some(entry.score),
            EntryType::UpperBound if entry.score <= alpha => Some(entry.score),
            _ => None,
        }
    }

    /// Store a result, replacing the slot if it is empty, holds the same
    /// position, or holds a shallower search.
    pub fn store(&mut self, hash: u64, depth: u8, score: f64, entry_type: EntryType) {
        let idx = self.slot(hash);
        let should_replace = match &self.entries[idx] {
            None => true,
            Some(e) => e.hash == hash || e.depth <= depth,
        };
        if should_replace {
            self.entries[idx] = Some(TTEntry {
                hash,
                depth,
                score,
                entry_type,
            });
        }
    }

    /// Clear all entries in the table.
    pub fn clear(&mut self) {
        self.entries.fill(None);
    }

    /// Get statistics about table usage.
    #[must_use]
    pub fn stats(&self) -> TTStats {
        let used = self.entries.iter().filter(|e| e.is_some()).count();
        TTStats {
            size: self.size,
            used,
        }
    }
}

/// Statistics about transposition table usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTStats {
    /// Total number of slots in the table
    pub size: usize,
    /// Number of slots currently occupied
    pub used: usize,
}
