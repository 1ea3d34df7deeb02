//! Search module for the Gomoku engine
//!
//! Contains:
//! - Critical-move checks that short-circuit search
//! - Candidate generation and ordering
//! - Negamax with alpha-beta pruning
//! - Zobrist hashing and a per-search transposition table
//! - Cooperative cancellation

pub mod cancel;
pub mod critical;
pub mod negamax;
pub mod ordering;
pub mod tt;
pub mod zobrist;

pub use cancel::CancelToken;
pub use critical::{find_critical_move, CriticalMove, Threat};
pub use negamax::{terminal_score, SearchResult, Searcher};
pub use ordering::{promising_moves, ScoredMove};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
