//! Board tests - layout, move application and occupancy

use chessy::core::Board;
use chessy::types::{Move, Piece, PieceKind, Position, Side, BOARD_SIZE};

fn pos(row: u8, col: u8) -> Position {
    Position::new(row, col).unwrap()
}

#[test]
fn test_board_new_standard_layout() {
    let board = Board::new();
    let expected = [
        "RNBQKBNR", "PPPPPPPP", "        ", "        ", "        ", "        ", "pppppppp",
        "rnbqkbnr",
    ];
    for (row, line) in expected.iter().enumerate() {
        let actual: String = board.row_symbols(row as u8).iter().collect();
        assert_eq!(&actual, line, "row {}", row);
    }
}

#[test]
fn test_board_always_has_64_cells() {
    let mut board = Board::new();
    assert_eq!(board.cells().len(), 64);
    board.apply_move(Move::new(pos(1, 4), pos(3, 4)));
    assert_eq!(board.cells().len(), 64);
    assert_eq!(Position::all().count(), (BOARD_SIZE as usize) * (BOARD_SIZE as usize));
}

#[test]
fn test_apply_move_moves_symbol() {
    let mut board = Board::new();
    board.apply_move(Move::new(pos(1, 4), pos(3, 4)));
    assert!(board.is_empty(pos(1, 4)));
    assert_eq!(
        board.piece_at(pos(3, 4)),
        Some(Piece::new(PieceKind::Pawn, Side::Upper))
    );
}

#[test]
fn test_capture_replaces_destination() {
    let mut board = Board::from_rows(["", "", "", "   P", "    p", "", "", ""]);
    board.apply_move(Move::new(pos(3, 3), pos(4, 4)));
    assert_eq!(board.piece_at(pos(4, 4)), Piece::from_symbol('P'));
    assert_eq!(board.cells().iter().flatten().count(), 1);
}

#[test]
fn test_occupancy_tracks_board() {
    let mut board = Board::new();
    let before = board.occupancy();
    board.apply_move(Move::new(pos(6, 4), pos(4, 4)));
    let after = board.occupancy();

    let changed: Vec<Position> = before.differences(&after).collect();
    assert_eq!(changed, vec![pos(4, 4), pos(6, 4)]);
    assert_eq!(before.first_difference(&after), Some(pos(4, 4)));
}

#[test]
fn test_board_reset() {
    let mut board = Board::empty();
    assert!(board.cells().iter().all(Option::is_none));
    board.reset();
    assert_eq!(board, Board::new());
}
