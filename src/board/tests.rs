use super::*;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
}

#[test]
fn test_pos_new() {
    let pos = Pos::new(7, 7);
    assert_eq!(pos.row, 7);
    assert_eq!(pos.col, 7);
    assert_eq!(pos, CENTER);
}

#[test]
fn test_pos_conversion() {
    let pos = Pos::new(7, 7); // Center
    assert_eq!(pos.to_index(), 7 * 15 + 7);
    assert_eq!(pos.to_index(), 112);

    let pos2 = Pos::from_index(112);
    assert_eq!(pos2, pos);
}

#[test]
fn test_pos_validity() {
    assert!(Pos::is_valid(0, 0));
    assert!(Pos::is_valid(14, 14));
    assert!(!Pos::is_valid(-1, 0));
    assert!(!Pos::is_valid(0, -1));
    assert!(!Pos::is_valid(15, 0));
    assert!(!Pos::is_valid(0, 15));
    assert_eq!(Pos::try_new(15, 2), None);
}

#[test]
fn test_board_constants() {
    assert_eq!(BOARD_SIZE, 15);
    assert_eq!(TOTAL_CELLS, 225);
}

#[test]
fn test_pos_ordering() {
    assert!(Pos::new(0, 0) < Pos::new(0, 1));
    assert!(Pos::new(0, 14) < Pos::new(1, 0));
}

#[test]
fn test_pos_offset_and_distance() {
    let p = Pos::new(0, 0);
    assert_eq!(p.offset(1, 1, 3), Some(Pos::new(3, 3)));
    assert_eq!(p.offset(-1, 0, 1), None);
    assert_eq!(Pos::new(7, 7).chebyshev(Pos::new(8, 6)), 1);
    assert_eq!(Pos::new(7, 7).manhattan(Pos::new(8, 6)), 2);
}

#[test]
fn test_direction_deltas() {
    let deltas: Vec<_> = Direction::ALL.iter().map(|d| d.delta()).collect();
    assert_eq!(deltas, vec![(0, 1), (1, 0), (1, 1), (1, -1)]);
}

#[test]
fn test_scoped_stone_restores() {
    let mut board = Board::new();
    board.place_stone(Pos::new(7, 7), Stone::Black);
    let before = board.clone();
    {
        let guard = board.place_scoped(Pos::new(7, 8), Stone::White);
        assert_eq!(guard.get(Pos::new(7, 8)), Stone::White);
        assert_eq!(guard.stone_count(), 2);
    }
    assert_eq!(board, before);
}

#[test]
fn test_scoped_stone_restores_on_panic() {
    let mut board = Board::new();
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        board.with_stone(Pos::new(3, 3), Stone::Black, |_| panic!("search blew up"));
    }));
    assert!(result.is_err());
    assert!(board.is_board_empty());
}

#[test]
fn test_nested_scoped_stones() {
    let mut board = Board::new();
    {
        let mut outer = board.place_scoped(Pos::new(1, 1), Stone::Black);
        {
            let inner = outer.place_scoped(Pos::new(2, 2), Stone::White);
            assert_eq!(inner.stone_count(), 2);
        }
        assert_eq!(outer.stone_count(), 1);
    }
    assert!(board.is_board_empty());
}

#[test]
fn test_empty_cells_and_full() {
    let mut board = Board::new();
    assert_eq!(board.empty_cells().count(), TOTAL_CELLS);
    for (i, pos) in Pos::all().enumerate() {
        let stone = if i % 2 == 0 { Stone::Black } else { Stone::White };
        board.place_stone(pos, stone);
    }
    assert!(board.is_full());
    assert_eq!(board.empty_cells().next(), None);
}
