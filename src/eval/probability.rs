//! Win-probability estimate shown alongside the engine's suggestion

use serde::{Deserialize, Serialize};

use crate::board::{Board, Stone};
use crate::rules::{check_win, find_open_four, find_winner};

use super::heuristic::evaluate_for_player;

/// Floor and ceiling for non-terminal estimates
pub const MIN_PROBABILITY: f64 = 0.05;
pub const MAX_PROBABILITY: f64 = 0.95;

/// Smallest softmax temperature
const MIN_TEMPERATURE: f64 = 1000.0;
/// Bonus per extra stone on the board, as a fraction of the temperature
const STONE_ADVANTAGE_STEP: f64 = 0.02;
const MAX_STONE_ADVANTAGE: f64 = 0.1;
/// Bonus for having the move, as a fraction of the temperature
const MOVE_ADVANTAGE: f64 = 0.05;

/// Probability of each side winning; `white == 1 - black`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WinProbability {
    pub black: f64,
    pub white: f64,
}

impl WinProbability {
    /// Split with `black` for black and the rest for white
    #[inline]
    pub fn black(black: f64) -> Self {
        Self {
            black,
            white: 1.0 - black,
        }
    }

    /// Certain win for `winner`
    #[inline]
    pub fn certain(winner: Stone) -> Self {
        match winner {
            Stone::White => Self::black(0.0),
            _ => Self::black(1.0),
        }
    }
}

/// Estimate each side's chance of winning with `to_move` on move.
///
/// Fives on the board are certain. An open four is a virtual win (0.95)
/// unless the other side is on move and can complete a five first.
/// Otherwise the per-color pattern totals go through a two-way softmax whose
/// temperature scales with their magnitude, and the result is clamped to
/// [0.05, 0.95].
#[must_use]
pub fn win_probability(board: &mut Board, to_move: Stone) -> WinProbability {
    if let Some(winner) = find_winner(board) {
        return WinProbability::certain(winner);
    }

    for holder in [Stone::Black, Stone::White] {
        if find_open_four(board, holder).is_none() {
            continue;
        }
        let defender = holder.opponent();
        if to_move == defender && can_complete_five(board, defender) {
            return WinProbability::certain(defender);
        }
        return WinProbability::black(if holder == Stone::Black {
            MAX_PROBABILITY
        } else {
            MIN_PROBABILITY
        });
    }

    if board.is_full() {
        return WinProbability::black(0.5);
    }

    let black_eval = evaluate_for_player(board, Stone::Black);
    let white_eval = evaluate_for_player(board, Stone::White);
    let temperature = MIN_TEMPERATURE.max(black_eval.abs() + white_eval.abs());

    let black_stones = board.count(Stone::Black);
    let white_stones = board.count(Stone::White);
    let stone_advantage =
        (f64::from(black_stones.abs_diff(white_stones)) * STONE_ADVANTAGE_STEP).min(MAX_STONE_ADVANTAGE);

    let bonus = |stone: Stone, mine: u32, theirs: u32| {
        let mut b = 0.0;
        if mine > theirs {
            b += stone_advantage * temperature;
        }
        if to_move == stone {
            b += MOVE_ADVANTAGE * temperature;
        }
        b
    };
    let black_adj = black_eval + bonus(Stone::Black, black_stones, white_stones);
    let white_adj = white_eval + bonus(Stone::White, white_stones, black_stones);

    // Two-way softmax written as a logistic to stay finite for large gaps
    let black = 1.0 / (1.0 + ((white_adj - black_adj) / temperature).exp());
    if !black.is_finite() {
        return WinProbability::black(0.5);
    }
    WinProbability::black(black.clamp(MIN_PROBABILITY, MAX_PROBABILITY))
}

/// Whether `color` has a move that completes five
fn can_complete_five(board: &mut Board, color: Stone) -> bool {
    let empties: Vec<_> = board.empty_cells().collect();
    empties
        .into_iter()
        .any(|pos| board.with_stone(pos, color, |b| check_win(b, pos)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Pos;

    fn place(board: &mut Board, cells: &[(u8, u8)], stone: Stone) {
        for &(r, c) in cells {
            board.place_stone(Pos::new(r, c), stone);
        }
    }

    #[test]
    fn test_five_is_certain() {
        let mut board = Board::new();
        place(&mut board, &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)], Stone::White);
        place(&mut board, &[(5, 5), (6, 6), (7, 7), (9, 9)], Stone::Black);
        let p = win_probability(&mut board, Stone::Black);
        assert_eq!(p, WinProbability { black: 0.0, white: 1.0 });
    }

    #[test]
    fn test_open_four_virtual_win() {
        let mut board = Board::new();
        place(&mut board, &[(7, 4), (7, 5), (7, 6), (7, 7)], Stone::Black);
        place(&mut board, &[(0, 0), (3, 9), (10, 2)], Stone::White);
        let p = win_probability(&mut board, Stone::White);
        assert_eq!(p.black, MAX_PROBABILITY);
    }

    #[test]
    fn test_open_four_refuted_by_defender_five() {
        let mut board = Board::new();
        place(&mut board, &[(7, 4), (7, 5), (7, 6), (7, 7)], Stone::Black);
        place(&mut board, &[(0, 0), (1, 0), (2, 0), (3, 0)], Stone::White);
        let p = win_probability(&mut board, Stone::White);
        assert_eq!(p, WinProbability { black: 0.0, white: 1.0 });
        // black on move keeps the virtual win
        let p = win_probability(&mut board, Stone::Black);
        assert_eq!(p.black, MAX_PROBABILITY);
    }

    #[test]
    fn test_empty_board_favours_side_to_move() {
        let mut board = Board::new();
        let black_first = win_probability(&mut board, Stone::Black);
        let white_first = win_probability(&mut board, Stone::White);
        assert!(black_first.black > 0.5);
        assert!((black_first.black - white_first.white).abs() < 1e-12);
    }

    #[test]
    fn test_probabilities_sum_and_clamp() {
        let mut board = Board::new();
        place(&mut board, &[(7, 7), (7, 8), (7, 9), (8, 8)], Stone::Black);
        place(&mut board, &[(1, 1)], Stone::White);
        let p = win_probability(&mut board, Stone::Black);
        assert!((p.black + p.white - 1.0).abs() < 1e-12);
        assert!(p.black <= MAX_PROBABILITY && p.black >= MIN_PROBABILITY);
        assert!(p.black > 0.5);
    }

    #[test]
    fn test_full_board_without_five_is_even() {
        let mut board = Board::new();
        // staggered pairs never line up five in any direction
        for pos in Pos::all() {
            let stone = if ((pos.col + 2 * pos.row) / 2) % 2 == 0 {
                Stone::Black
            } else {
                Stone::White
            };
            board.place_stone(pos, stone);
        }
        assert_eq!(find_winner(&board), None);
        assert_eq!(win_probability(&mut board, Stone::Black), WinProbability::black(0.5));
    }
}
