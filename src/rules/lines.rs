//! Line runs through a stone and threat predicates built on them

use crate::board::{Board, Direction, Pos, Stone};

use super::win::run_length;

/// A maximal run of same-colored stones through one cell along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRun {
    /// Stones in the run, including the origin cell once
    pub consecutive: u32,
    /// Run ends that are an in-bounds empty cell (0, 1 or 2)
    pub open_ends: u8,
}

impl LineRun {
    #[inline]
    pub fn is_open_four(self) -> bool {
        self.consecutive == 4 && self.open_ends == 2
    }

    #[inline]
    pub fn is_open_three(self) -> bool {
        self.consecutive == 3 && self.open_ends == 2
    }
}

/// Measure the run of `color` through `pos` along `dir` and count its open ends.
#[inline]
pub fn count_consecutive_with_openness(
    board: &Board,
    pos: Pos,
    dir: Direction,
    color: Stone,
) -> LineRun {
    let (dr, dc) = dir.delta();
    let forward = run_length(board, pos, dr, dc, color);
    let backward = run_length(board, pos, -dr, -dc, color);

    let is_open = |steps: i32, sign: i32| {
        pos.offset(dr * sign, dc * sign, steps)
            .is_some_and(|end| board.is_empty(end))
    };
    // `forward`/`backward` are at most 14
    #[allow(clippy::cast_possible_wrap)]
    let open_ends = u8::from(is_open(forward as i32 + 1, 1)) + u8::from(is_open(backward as i32 + 1, -1));

    LineRun {
        consecutive: 1 + forward + backward,
        open_ends,
    }
}

/// Runs through `pos` in all four directions, or `None` if `pos` is not `color`.
#[inline]
pub fn runs_at(board: &Board, pos: Pos, color: Stone) -> Option<[LineRun; 4]> {
    if color == Stone::Empty || board.get(pos) != color {
        return None;
    }
    Some(Direction::ALL.map(|dir| count_consecutive_with_openness(board, pos, dir, color)))
}

/// Four in a row through `pos` with both ends empty.
pub fn has_open_four(board: &Board, pos: Pos, color: Stone) -> bool {
    runs_at(board, pos, color).is_some_and(|runs| runs.iter().any(|r| r.is_open_four()))
}

/// Three in a row through `pos` with both ends empty.
pub fn has_open_three(board: &Board, pos: Pos, color: Stone) -> bool {
    count_open_threes(board, pos, color) > 0
}

/// Number of axes through `pos` carrying an open three.
pub fn count_open_threes(board: &Board, pos: Pos, color: Stone) -> usize {
    runs_at(board, pos, color).map_or(0, |runs| runs.iter().filter(|r| r.is_open_three()).count())
}

/// First stone of `color` (row-major) that sits in an open four.
pub fn find_open_four(board: &Board, color: Stone) -> Option<Pos> {
    board
        .stones(color)?
        .iter_ones()
        .find(|&pos| has_open_four(board, pos, color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(board: &mut Board, row: u8, cols: &[u8], stone: Stone) {
        for &c in cols {
            board.place_stone(Pos::new(row, c), stone);
        }
    }

    #[test]
    fn test_run_counts_stone_once() {
        let mut board = Board::new();
        board.place_stone(Pos::new(7, 7), Stone::Black);
        let run = count_consecutive_with_openness(&board, Pos::new(7, 7), Direction::Horizontal, Stone::Black);
        assert_eq!(run, LineRun { consecutive: 1, open_ends: 2 });
    }

    #[test]
    fn test_open_four_any_stone() {
        let mut board = Board::new();
        row_of(&mut board, 6, &[4, 5, 6, 7], Stone::Black);
        for c in 4..=7 {
            assert!(has_open_four(&board, Pos::new(6, c), Stone::Black));
        }
        assert_eq!(find_open_four(&board, Stone::Black), Some(Pos::new(6, 4)));
    }

    #[test]
    fn test_open_four_blocked_by_opponent() {
        let mut board = Board::new();
        row_of(&mut board, 6, &[4, 5, 6, 7], Stone::Black);
        board.place_stone(Pos::new(6, 8), Stone::White);
        assert!(!has_open_four(&board, Pos::new(6, 5), Stone::Black));
        let run = count_consecutive_with_openness(&board, Pos::new(6, 5), Direction::Horizontal, Stone::Black);
        assert_eq!(run.open_ends, 1);
    }

    #[test]
    fn test_open_four_blocked_by_edge() {
        let mut board = Board::new();
        row_of(&mut board, 2, &[0, 1, 2, 3], Stone::White);
        assert!(!has_open_four(&board, Pos::new(2, 0), Stone::White));
        assert_eq!(find_open_four(&board, Stone::White), None);
    }

    #[test]
    fn test_five_is_not_open_four() {
        let mut board = Board::new();
        row_of(&mut board, 6, &[4, 5, 6, 7, 8], Stone::Black);
        assert!(!has_open_four(&board, Pos::new(6, 6), Stone::Black));
    }

    #[test]
    fn test_open_three_and_double() {
        let mut board = Board::new();
        // horizontal _XXX_ and vertical _XXX_ sharing (7,7)
        row_of(&mut board, 7, &[6, 7, 8], Stone::Black);
        board.place_stone(Pos::new(6, 7), Stone::Black);
        board.place_stone(Pos::new(8, 7), Stone::Black);
        assert!(has_open_three(&board, Pos::new(7, 7), Stone::Black));
        assert_eq!(count_open_threes(&board, Pos::new(7, 7), Stone::Black), 2);
        assert_eq!(count_open_threes(&board, Pos::new(7, 6), Stone::Black), 1);
    }

    #[test]
    fn test_wrong_color_has_no_runs() {
        let mut board = Board::new();
        row_of(&mut board, 6, &[4, 5, 6, 7], Stone::Black);
        assert!(!has_open_four(&board, Pos::new(6, 5), Stone::White));
        assert_eq!(count_open_threes(&board, Pos::new(0, 0), Stone::Black), 0);
    }
}
