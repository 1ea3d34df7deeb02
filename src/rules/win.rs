//! Win condition checking: five or more stones in a row

use crate::board::{Board, Direction, Pos, Stone};

/// Number of same-colored stones in a row needed to win
pub const WIN_LENGTH: u32 = 5;

/// Whether the stone at `pos` is part of five-in-a-row.
///
/// Counts same-colored stones forward and backward along each axis
/// (bounded by the board edge) and includes `pos` itself once.
/// An empty cell never wins.
#[inline]
pub fn check_win(board: &Board, pos: Pos) -> bool {
    let color = board.get(pos);
    if color == Stone::Empty {
        return false;
    }
    Direction::ALL.iter().any(|&dir| {
        let (dr, dc) = dir.delta();
        1 + run_length(board, pos, dr, dc, color) + run_length(board, pos, -dr, -dc, color)
            >= WIN_LENGTH
    })
}

/// Same-colored stones strictly beyond `pos` in one direction
#[inline]
pub(crate) fn run_length(board: &Board, pos: Pos, dr: i32, dc: i32, color: Stone) -> u32 {
    let mut count = 0;
    let mut step = 1;
    while let Some(next) = pos.offset(dr, dc, step) {
        if board.get(next) != color {
            break;
        }
        count += 1;
        step += 1;
    }
    count
}

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    board
        .stones(stone)
        .is_some_and(|bb| bb.iter_ones().any(|pos| check_win(board, pos)))
}

/// Color owning a five on the board, black checked first
pub fn find_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&stone| has_five_in_row(board, stone))
}
