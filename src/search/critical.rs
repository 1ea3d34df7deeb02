//! Critical-move detection run before any tree search
//!
//! Threats are checked in strict priority order. Each check scans the empty
//! cells row-major with a hypothetical stone and the first hit wins, so a
//! lower-priority threat is only reported when no cell anywhere satisfies a
//! higher one.

use crate::board::{Board, Pos, Stone};
use crate::eval::PatternScore;
use crate::rules::{check_win, count_open_threes, has_open_four};

/// Tactical situations that bypass search, highest priority first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Threat {
    /// Mover completes five
    Win,
    /// Opponent would complete five here
    BlockFive,
    /// Mover makes an open four
    OpenFour,
    /// Opponent would make an open four here
    BlockOpenFour,
    /// Mover makes two or more open threes at once
    MultipleOpenThrees,
    /// Opponent would make two or more open threes here
    BlockMultipleOpenThrees,
    /// Mover makes an open three
    OpenThree,
}

impl Threat {
    /// Priority order
    pub const ALL: [Threat; 7] = [
        Threat::Win,
        Threat::BlockFive,
        Threat::OpenFour,
        Threat::BlockOpenFour,
        Threat::MultipleOpenThrees,
        Threat::BlockMultipleOpenThrees,
        Threat::OpenThree,
    ];

    /// Whether the hypothetical stone belongs to the opponent.
    #[inline]
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Threat::BlockFive | Threat::BlockOpenFour | Threat::BlockMultipleOpenThrees
        )
    }

    /// Score reported for a move answering this threat
    pub fn score(self) -> f64 {
        match self {
            Threat::Win => f64::INFINITY,
            Threat::BlockFive => PatternScore::FIVE / 2.0,
            Threat::OpenFour => PatternScore::OPEN_FOUR,
            Threat::BlockOpenFour => PatternScore::OPEN_FOUR / 2.0,
            Threat::MultipleOpenThrees => PatternScore::OPEN_THREE * 2.0,
            Threat::BlockMultipleOpenThrees | Threat::OpenThree => PatternScore::OPEN_THREE,
        }
    }

    /// Test the empty cell `pos` for this threat with `mover` to play.
    ///
    /// Returns the number of open threes formed for the three-based threats
    /// and 1 for the others, or `None` when the cell does not qualify. The
    /// board is left unchanged.
    pub fn detect(self, board: &mut Board, pos: Pos, mover: Stone) -> Option<usize> {
        if !board.is_empty(pos) {
            return None;
        }
        let stone = if self.is_block() { mover.opponent() } else { mover };
        let placed = board.place_scoped(pos, stone);
        match self {
            Threat::Win | Threat::BlockFive => check_win(&placed, pos).then_some(1),
            Threat::OpenFour | Threat::BlockOpenFour => has_open_four(&placed, pos, stone).then_some(1),
            Threat::MultipleOpenThrees | Threat::BlockMultipleOpenThrees => {
                let threes = count_open_threes(&placed, pos, stone);
                (threes >= 2).then_some(threes)
            }
            Threat::OpenThree => {
                let threes = count_open_threes(&placed, pos, stone);
                (threes >= 1).then_some(threes)
            }
        }
    }
}

/// A move answering a critical threat
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalMove {
    pub pos: Pos,
    pub threat: Threat,
    /// Open threes formed (1 for non-three threats)
    pub count: usize,
}

impl CriticalMove {
    #[inline]
    pub fn score(&self) -> f64 {
        self.threat.score()
    }
}

/// Highest-priority critical move for `mover`, if any.
pub fn find_critical_move(board: &mut Board, mover: Stone) -> Option<CriticalMove> {
    Threat::ALL
        .into_iter()
        .find_map(|threat| scan(board, threat, mover))
}

/// First empty cell (row-major) where `threat` holds.
pub fn scan(board: &mut Board, threat: Threat, mover: Stone) -> Option<CriticalMove> {
    let empties: Vec<Pos> = board.empty_cells().collect();
    empties.into_iter().find_map(|pos| {
        threat
            .detect(board, pos, mover)
            .map(|count| CriticalMove { pos, threat, count })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, cells: &[(u8, u8)], stone: Stone) {
        for &(r, c) in cells {
            board.place_stone(Pos::new(r, c), stone);
        }
    }

    #[test]
    fn test_win_found_first() {
        let mut board = Board::new();
        place(&mut board, &[(7, 3), (7, 4), (7, 5), (7, 6)], Stone::Black);
        place(&mut board, &[(7, 2)], Stone::White);
        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::Win);
        assert_eq!(hit.pos, Pos::new(7, 7));
        assert_eq!(hit.score(), f64::INFINITY);
    }

    #[test]
    fn test_win_beats_block() {
        let mut board = Board::new();
        // white threatens five at (3,4) which is earlier row-major than black's win
        place(&mut board, &[(3, 0), (3, 1), (3, 2), (3, 3)], Stone::White);
        place(&mut board, &[(10, 0), (10, 1), (10, 2), (10, 3)], Stone::Black);
        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::Win);
        assert_eq!(hit.pos, Pos::new(10, 4));
    }

    #[test]
    fn test_block_five() {
        let mut board = Board::new();
        place(&mut board, &[(2, 2), (3, 3), (4, 4), (5, 5)], Stone::White);
        place(&mut board, &[(1, 1)], Stone::Black);
        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::BlockFive);
        assert_eq!(hit.pos, Pos::new(6, 6));
        assert_eq!(hit.score(), PatternScore::FIVE / 2.0);
    }

    #[test]
    fn test_open_four_before_block_open_four() {
        let mut board = Board::new();
        place(&mut board, &[(7, 5), (7, 6), (7, 7)], Stone::Black);
        place(&mut board, &[(2, 5), (2, 6), (2, 7)], Stone::White);
        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::OpenFour);
        assert_eq!(hit.pos, Pos::new(7, 4));

        let hit = find_critical_move(&mut board, Stone::White).unwrap();
        assert_eq!(hit.threat, Threat::OpenFour);
        assert_eq!(hit.pos, Pos::new(2, 4));
    }

    #[test]
    fn test_block_open_four() {
        let mut board = Board::new();
        place(&mut board, &[(2, 5), (2, 6), (2, 7)], Stone::White);
        place(&mut board, &[(9, 9)], Stone::Black);
        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::BlockOpenFour);
        assert_eq!(hit.pos, Pos::new(2, 4));
        assert_eq!(hit.score(), PatternScore::OPEN_FOUR / 2.0);
    }

    #[test]
    fn test_double_three_counted() {
        let mut board = Board::new();
        // (7,7) joins _XX_ horizontally and vertically
        place(&mut board, &[(7, 5), (7, 6), (5, 7), (6, 7)], Stone::Black);
        let hit = scan(&mut board, Threat::MultipleOpenThrees, Stone::Black).unwrap();
        assert_eq!(hit.count, 2);
        assert_eq!(hit.score(), PatternScore::OPEN_THREE * 2.0);
        assert_eq!(hit.pos, Pos::new(7, 7));
        assert_eq!(scan(&mut board, Threat::OpenFour, Stone::Black), None);
    }

    #[test]
    fn test_block_fork_beats_own_open_three() {
        let mut board = Board::new();
        // white forks at (7,7); black can only extend a pair
        place(&mut board, &[(7, 5), (7, 6), (5, 7), (6, 7)], Stone::White);
        place(&mut board, &[(12, 2), (12, 3)], Stone::Black);
        assert!(scan(&mut board, Threat::OpenThree, Stone::Black).is_some());

        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::BlockMultipleOpenThrees);
        assert_eq!(hit.pos, Pos::new(7, 7));
        assert_eq!(hit.count, 2);
        assert_eq!(hit.score(), PatternScore::OPEN_THREE);
    }

    #[test]
    fn test_own_fork_beats_blocking_fork() {
        let mut board = Board::new();
        place(&mut board, &[(7, 5), (7, 6), (5, 7), (6, 7)], Stone::White);
        place(&mut board, &[(10, 10), (10, 11), (8, 12), (9, 12)], Stone::Black);

        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::MultipleOpenThrees);
        assert_eq!(hit.pos, Pos::new(10, 12));
        assert_eq!(hit.count, 2);

        let hit = find_critical_move(&mut board, Stone::White).unwrap();
        assert_eq!(hit.threat, Threat::MultipleOpenThrees);
        assert_eq!(hit.pos, Pos::new(7, 7));
    }

    #[test]
    fn test_single_open_three() {
        let mut board = Board::new();
        place(&mut board, &[(7, 7), (7, 8)], Stone::Black);
        let hit = find_critical_move(&mut board, Stone::Black).unwrap();
        assert_eq!(hit.threat, Threat::OpenThree);
        assert_eq!(hit.count, 1);
    }

    #[test]
    fn test_quiet_position_has_none() {
        let mut board = Board::new();
        place(&mut board, &[(7, 7)], Stone::Black);
        place(&mut board, &[(8, 8)], Stone::White);
        assert_eq!(find_critical_move(&mut board, Stone::Black), None);
    }

    #[test]
    fn test_detect_leaves_board_unchanged() {
        let mut board = Board::new();
        place(&mut board, &[(7, 5), (7, 6), (7, 7)], Stone::Black);
        let before = board.clone();
        for threat in Threat::ALL {
            let _ = scan(&mut board, threat, Stone::White);
        }
        assert_eq!(board, before);
        assert_eq!(Threat::Win.detect(&mut board, Pos::new(7, 6), Stone::Black), None);
    }
}
