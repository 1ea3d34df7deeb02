//! Candidate generation and ordering for the negamax search

use crate::board::{Board, Pos, Stone};
use crate::eval::move_promise;

/// Candidate move with its move-promise score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: f64,
}

/// Empty cells most worth searching for `color`, best first.
///
/// Every empty cell is scored with [`move_promise`], stable-sorted by
/// descending score (ties stay row-major), filtered to those above 1% of
/// the top score and cut to `limit`. Cells tied with the top score are
/// always kept, so a winning (`+inf`) cell never empties the list.
pub fn promising_moves(board: &mut Board, color: Stone, limit: usize) -> Vec<ScoredMove> {
    let stones = board.stone_count();
    let empties: Vec<Pos> = board.empty_cells().collect();
    let mut moves: Vec<ScoredMove> = empties
        .into_iter()
        .map(|pos| ScoredMove {
            pos,
            score: move_promise(board, pos, color, stones),
        })
        .collect();

    moves.sort_by(|a, b| b.score.total_cmp(&a.score));

    let Some(top) = moves.first().map(|m| m.score) else {
        return moves;
    };
    let threshold = top / 100.0;
    moves.retain(|m| m.score > threshold || m.score == top);
    moves.truncate(limit);
    moves
}
