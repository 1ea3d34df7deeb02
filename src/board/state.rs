//! Caller-facing position: one coordinate list per color

use serde::{Deserialize, Serialize};

use super::{Board, Pos, Stone};
use crate::error::{EngineError, EngineResult};

/// Position as exchanged with the game controller:
/// `{ "black": [[r, c], ...], "white": [[r, c], ...] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    #[serde(default)]
    pub black: Vec<[i32; 2]>,
    #[serde(default)]
    pub white: Vec<[i32; 2]>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper used by tests and the CLI
    pub fn with(mut self, stone: Stone, row: i32, col: i32) -> Self {
        match stone {
            Stone::Black => self.black.push([row, col]),
            Stone::White => self.white.push([row, col]),
            Stone::Empty => {}
        }
        self
    }

    /// Rebuild the dense grid, rejecting out-of-range or repeated coordinates.
    pub fn to_board(&self) -> EngineResult<Board> {
        let mut board = Board::new();
        for (coords, stone) in [(&self.black, Stone::Black), (&self.white, Stone::White)] {
            for &[row, col] in coords {
                let pos = Pos::try_new(row, col)
                    .ok_or(EngineError::InvalidCoordinate { row, col })?;
                if !board.is_empty(pos) {
                    return Err(EngineError::OverlappingStone {
                        row: pos.row,
                        col: pos.col,
                    });
                }
                board.place_stone(pos, stone);
            }
        }
        Ok(board)
    }

    /// Snapshot a board back into coordinate lists (row-major order)
    pub fn from_board(board: &Board) -> Self {
        let list = |stone: Stone| {
            board
                .stones(stone)
                .map(|bb| {
                    bb.iter_ones()
                        .map(|p| [i32::from(p.row), i32::from(p.col)])
                        .collect()
                })
                .unwrap_or_default()
        };
        Self {
            black: list(Stone::Black),
            white: list(Stone::White),
        }
    }

    /// Same position with the colors exchanged
    pub fn swapped(&self) -> Self {
        Self {
            black: self.white.clone(),
            white: self.black.clone(),
        }
    }
}

impl From<&Board> for BoardState {
    fn from(board: &Board) -> Self {
        Self::from_board(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_board_places_both_colors() {
        let state = BoardState::new()
            .with(Stone::Black, 7, 7)
            .with(Stone::White, 7, 8);
        let board = state.to_board().unwrap();
        assert_eq!(board.get(Pos::new(7, 7)), Stone::Black);
        assert_eq!(board.get(Pos::new(7, 8)), Stone::White);
        assert_eq!(board.stone_count(), 2);
    }

    #[test]
    fn test_rejects_out_of_range() {
        let state = BoardState::new().with(Stone::White, 15, 3);
        assert_eq!(
            state.to_board(),
            Err(EngineError::InvalidCoordinate { row: 15, col: 3 })
        );
        let state = BoardState::new().with(Stone::Black, -1, 0);
        assert!(matches!(
            state.to_board(),
            Err(EngineError::InvalidCoordinate { row: -1, col: 0 })
        ));
    }

    #[test]
    fn test_rejects_overlap() {
        let state = BoardState::new()
            .with(Stone::Black, 3, 4)
            .with(Stone::White, 3, 4);
        assert_eq!(
            state.to_board(),
            Err(EngineError::OverlappingStone { row: 3, col: 4 })
        );
    }

    #[test]
    fn test_json_shape() {
        let state: BoardState =
            serde_json::from_str(r#"{"black": [[7, 7]], "white": [[6, 6], [8, 8]]}"#).unwrap();
        assert_eq!(state.black, vec![[7, 7]]);
        assert_eq!(state.white.len(), 2);

        let missing: BoardState = serde_json::from_str(r#"{"black": [[0, 0]]}"#).unwrap();
        assert!(missing.white.is_empty());
    }

    #[test]
    fn test_round_trip_through_board() {
        let state = BoardState::new()
            .with(Stone::Black, 0, 0)
            .with(Stone::White, 14, 14);
        let board = state.to_board().unwrap();
        assert_eq!(BoardState::from_board(&board), state);
    }
}
