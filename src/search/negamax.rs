//! Negamax with alpha-beta pruning over ordered candidate moves
//!
//! Every node first rescans the whole board for terminal patterns: a five
//! scores `±five`, otherwise an open four scores `±openFour` (the side to
//! move is checked first). Only then does the depth limit apply, falling back
//! to the static evaluation.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Pos, Stone};
//! use gomoku::config::Breadth;
//! use gomoku::search::{CancelToken, Searcher, ZobristTable};
//!
//! let zobrist = ZobristTable::new();
//! let mut board = Board::new();
//! board.place_stone(Pos::new(7, 7), Stone::Black);
//!
//! let mut searcher = Searcher::new(&zobrist, Breadth::symmetric(4), 1, CancelToken::new());
//! let result = searcher.search(&mut board, Stone::White, 2);
//! assert!(result.best_move.is_some());
//! assert!(!result.cancelled);
//! ```

use tracing::{debug, trace};

use crate::board::{Board, Pos, Stone};
use crate::config::Breadth;
use crate::eval::{evaluate_position, PatternScore};
use crate::rules::{find_open_four, find_winner};

use super::cancel::CancelToken;
use super::ordering::{promising_moves, ScoredMove};
use super::tt::{EntryType, TranspositionTable};
use super::zobrist::ZobristTable;

/// Outcome of a root search
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best candidate, `None` when no candidate scored above `-inf`
    pub best_move: Option<Pos>,
    /// Searched score of `best_move` from the mover's perspective
    pub score: f64,
    /// Nodes visited
    pub nodes: u64,
    /// Position cache hits
    pub tt_hits: u64,
    /// The search was stopped before every candidate was scored
    pub cancelled: bool,
    /// Root candidates that finished, with their searched scores, in
    /// candidate order
    pub scored: Vec<ScoredMove>,
}

/// Single-threaded searcher for one top-level call.
///
/// Owns the position cache and node counters; the board is borrowed
/// mutably and every trial stone is placed through a scoped guard.
pub struct Searcher<'z> {
    zobrist: &'z ZobristTable,
    tt: Option<TranspositionTable>,
    breadth: Breadth,
    token: CancelToken,
    nodes: u64,
    tt_hits: u64,
}

impl<'z> Searcher<'z> {
    /// `tt_size_mb == 0` disables the position cache.
    pub fn new(zobrist: &'z ZobristTable, breadth: Breadth, tt_size_mb: usize, token: CancelToken) -> Self {
        Self {
            zobrist,
            tt: (tt_size_mb > 0).then(|| TranspositionTable::new(tt_size_mb)),
            breadth,
            token,
            nodes: 0,
            tt_hits: 0,
        }
    }

    #[inline]
    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Score each root candidate for `color` with a full-window negamax at
    /// `depth - 1` and keep the strict maximum (ties keep the earlier one).
    ///
    /// On cancellation the best finished candidate is returned, or the first
    /// candidate with its ordering score when none finished.
    pub fn search(&mut self, board: &mut Board, color: Stone, depth: u8) -> SearchResult {
        self.nodes = 0;
        self.tt_hits = 0;
        if let Some(tt) = self.tt.as_mut() {
            tt.clear();
        }

        let candidates = promising_moves(board, color, self.breadth.for_color(color));
        let root_hash = self.zobrist.hash(board, color);
        let child_depth = depth.saturating_sub(1);

        let mut best_move = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut scored = Vec::with_capacity(candidates.len());
        let mut cancelled = false;

        for candidate in &candidates {
            if self.is_cancelled() {
                cancelled = true;
                break;
            }
            let child_hash = self.zobrist.update_place(root_hash, candidate.pos, color);
            let score = {
                let mut placed = board.place_scoped(candidate.pos, color);
                -self.negamax(
                    &mut placed,
                    child_hash,
                    child_depth,
                    f64::NEG_INFINITY,
                    f64::INFINITY,
                    color.opponent(),
                )
            };
            if self.is_cancelled() {
                cancelled = true;
                break;
            }
            trace!(row = candidate.pos.row, col = candidate.pos.col, score, "root candidate");
            scored.push(ScoredMove {
                pos: candidate.pos,
                score,
            });
            if score > best_score {
                best_score = score;
                best_move = Some(candidate.pos);
            }
        }

        if cancelled && best_move.is_none() {
            if let Some(first) = candidates.first() {
                best_move = Some(first.pos);
                best_score = first.score;
            }
        }

        debug!(
            nodes = self.nodes,
            tt_hits = self.tt_hits,
            candidates = candidates.len(),
            cancelled,
            "search finished"
        );

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
            tt_hits: self.tt_hits,
            cancelled,
            scored,
        }
    }

    /// Fail-soft negamax. Returns 0 once cancelled; callers discard that value.
    fn negamax(&mut self, board: &mut Board, hash: u64, depth: u8, mut alpha: f64, beta: f64, color: Stone) -> f64 {
        if self.is_cancelled() {
            return 0.0;
        }
        self.nodes += 1;

        if let Some(score) = terminal_score(board, color) {
            return score;
        }
        if depth == 0 || board.is_full() {
            return evaluate_position(board, color);
        }

        if let Some(score) = self.tt.as_ref().and_then(|tt| tt.probe(hash, depth, alpha, beta)) {
            self.tt_hits += 1;
            return score;
        }

        let moves = promising_moves(board, color, self.breadth.for_color(color));
        if moves.is_empty() {
            return 0.0;
        }

        let alpha_orig = alpha;
        let mut max_score = f64::NEG_INFINITY;
        for mv in moves {
            if self.is_cancelled() {
                return 0.0;
            }
            let child_hash = self.zobrist.update_place(hash, mv.pos, color);
            let score = {
                let mut placed = board.place_scoped(mv.pos, color);
                -self.negamax(&mut placed, child_hash, depth - 1, -beta, -alpha, color.opponent())
            };
            if self.is_cancelled() {
                return 0.0;
            }
            max_score = max_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }

        if let Some(tt) = self.tt.as_mut() {
            let entry_type = if max_score <= alpha_orig {
                EntryType::UpperBound
            } else if max_score >= beta {
                EntryType::LowerBound
            } else {
                EntryType::Exact
            };
            tt.store(hash, depth, max_score, entry_type);
        }
        max_score
    }
}

/// Score of a decided position for `color` to move, if any.
///
/// A five on the board dominates; otherwise an open four for the side to
/// move outranks one for the opponent.
pub fn terminal_score(board: &Board, color: Stone) -> Option<f64> {
    if let Some(winner) = find_winner(board) {
        return Some(if winner == color {
            PatternScore::FIVE
        } else {
            -PatternScore::FIVE
        });
    }
    if find_open_four(board, color).is_some() {
        return Some(PatternScore::OPEN_FOUR);
    }
    if find_open_four(board, color.opponent()).is_some() {
        return Some(-PatternScore::OPEN_FOUR);
    }
    None
}
