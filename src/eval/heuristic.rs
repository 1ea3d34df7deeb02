//! Static evaluation and the move-promise heuristic used for move ordering
//!
//! Every stone contributes the pattern score of each of its four axes, so a
//! run of three is counted once per member stone. Overlapping structures are
//! rewarded on purpose.

use crate::board::{Board, Pos, Stone, BOARD_SIZE};
use crate::rules::lines::runs_at;
use crate::rules::LineRun;

use super::patterns::{pattern_score, PatternScore};

/// Stone count from which quiet moves must touch an existing stone
const MIDGAME_STONES: u32 = 10;

/// Pattern score of the four axes through the stone at `pos`.
///
/// Returns 0 when `pos` does not hold `color`.
#[inline]
pub fn evaluate_stone(board: &Board, pos: Pos, color: Stone) -> f64 {
    runs_at(board, pos, color).map_or(0.0, |runs| runs.into_iter().map(pattern_score).sum())
}

/// Sum of [`evaluate_stone`] over every stone of `color`.
#[must_use]
pub fn evaluate_for_player(board: &Board, color: Stone) -> f64 {
    board.stones(color).map_or(0.0, |stones| {
        stones
            .iter_ones()
            .map(|pos| evaluate_stone(board, pos, color))
            .sum()
    })
}

/// Evaluate the board from the perspective of `color`: own total minus the
/// opponent's total.
#[must_use]
pub fn evaluate_position(board: &Board, color: Stone) -> f64 {
    evaluate_for_player(board, color) - evaluate_for_player(board, color.opponent())
}

/// Threat summary of one hypothetical stone
struct Placement {
    wins: bool,
    open_four: bool,
    open_threes: usize,
    pattern: f64,
}

impl Placement {
    fn probe(board: &mut Board, pos: Pos, color: Stone) -> Self {
        board.with_stone(pos, color, |b| {
            let runs = runs_at(b, pos, color).unwrap_or([LineRun {
                consecutive: 0,
                open_ends: 0,
            }; 4]);
            Placement {
                wins: runs.iter().any(|r| r.consecutive >= 5),
                open_four: runs.iter().any(|r| r.is_open_four()),
                open_threes: runs.iter().filter(|r| r.is_open_three()).count(),
                pattern: runs.into_iter().map(pattern_score).sum(),
            }
        })
    }
}

/// How promising it is for `color` to play the empty cell `pos`, without search.
///
/// Tactical outcomes return at once, strongest first: own five (`+inf`),
/// blocking a five, own open four, blocking an open four, own open threes,
/// blocking open threes. Quiet moves score proximity to existing stones
/// (more for own stones), the patterns they would form or block, and a
/// small centre bonus. `stones` is the number of stones on the board.
///
/// Occupied cells score `-inf`. The board is left unchanged.
#[must_use]
pub fn move_promise(board: &mut Board, pos: Pos, color: Stone, stones: u32) -> f64 {
    if !board.is_empty(pos) {
        return f64::NEG_INFINITY;
    }
    let opponent = color.opponent();
    let mine = Placement::probe(board, pos, color);
    if mine.wins {
        return f64::INFINITY;
    }
    let theirs = Placement::probe(board, pos, opponent);
    if theirs.wins {
        return PatternScore::FIVE * 0.9;
    }
    if mine.open_four {
        return PatternScore::OPEN_FOUR;
    }
    if theirs.open_four {
        return PatternScore::OPEN_FOUR * 0.9;
    }
    if mine.open_threes > 0 {
        return three_bonus(mine.open_threes);
    }
    if theirs.open_threes > 0 {
        return three_bonus(theirs.open_threes) * 0.8;
    }

    let radius: i32 = if stones < MIDGAME_STONES { 3 } else { 2 };
    let mut score = 0.0;
    let mut adjacent = false;
    for dr in -radius..=radius {
        for dc in -radius..=radius {
            if dr == 0 && dc == 0 {
                continue;
            }
            let Some(near) = pos.offset(dr, dc, 1) else {
                continue;
            };
            let stone = board.get(near);
            if stone == Stone::Empty {
                continue;
            }
            let distance = dr.abs().max(dc.abs());
            let weight = f64::from(radius + 1 - distance);
            score += weight * 10.0;
            if stone == color {
                score += weight * 5.0;
            }
            adjacent |= distance == 1;
        }
    }

    if stones >= MIDGAME_STONES && !adjacent {
        return 0.0;
    }

    score += mine.pattern * 0.8;
    score += theirs.pattern * 0.6;
    score + center_bonus(pos)
}

/// `openThree * (1 + 2(n - 1))` for `n` simultaneous open threes
#[inline]
fn three_bonus(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let extra = (count - 1) as f64;
    PatternScore::OPEN_THREE * (1.0 + extra * 2.0)
}

/// Small preference for the middle of the board
#[inline]
fn center_bonus(pos: Pos) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let half = BOARD_SIZE as f64 / 2.0;
    let dist = (f64::from(pos.row) - half).abs() + (f64::from(pos.col) - half).abs();
    #[allow(clippy::cast_precision_loss)]
    let bonus = (BOARD_SIZE as f64 - dist) * 2.0;
    bonus.max(0.0)
}
