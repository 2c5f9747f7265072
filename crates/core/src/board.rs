//! Board module - the logical 8x8 chessboard
//!
//! The board is an 8x8 grid where each cell is empty or holds a piece.
//! Uses a flat array (row-major, `row * 8 + col`) for cache locality and zero allocation.
//! Row 0 is the uppercase back rank, row 7 the lowercase back rank.

use crate::occupancy::OccupancySnapshot;
use crate::types::{square_symbol, Move, Piece, Position, Square, BOARD_SIZE, NUM_SQUARES};

/// Standard starting layout, one string per row (row 0 first).
const STANDARD_LAYOUT: [&str; BOARD_SIZE as usize] = [
    "RNBQKBNR",
    "PPPPPPPP",
    "        ",
    "        ",
    "        ",
    "        ",
    "pppppppp",
    "rnbqkbnr",
];

/// The logical board model - always exactly 64 cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order
    cells: [Square; NUM_SQUARES],
}

impl Board {
    /// Create a board in the standard starting layout.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.reset();
        board
    }

    /// Create a board with every cell empty.
    pub fn empty() -> Self {
        Self {
            cells: [None; NUM_SQUARES],
        }
    }

    /// Build a board from eight 8-character rows of piece symbols (space = empty).
    ///
    /// Characters that are not piece symbols are treated as empty. Short rows
    /// are padded with empty cells; extra characters are ignored.
    pub fn from_rows(rows: [&str; BOARD_SIZE as usize]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().take(BOARD_SIZE as usize).enumerate() {
                board.cells[row * BOARD_SIZE as usize + col] = Piece::from_symbol(ch);
            }
        }
        board
    }

    /// Overwrite all 64 cells with the standard starting layout.
    pub fn reset(&mut self) {
        *self = Self::from_rows(STANDARD_LAYOUT);
    }

    /// Piece at `pos`, `None` when the cell is empty.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Square {
        self.cells[pos.index()]
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.cells[pos.index()].is_none()
    }

    pub fn set(&mut self, pos: Position, square: Square) {
        self.cells[pos.index()] = square;
    }

    /// Move whatever is on `mv.start` to `mv.end`, then clear `mv.start`.
    ///
    /// The destination is overwritten unconditionally, which is how captures
    /// are modelled. Callers validate the move beforehand.
    pub fn apply_move(&mut self, mv: Move) {
        self.cells[mv.end.index()] = self.cells[mv.start.index()];
        self.cells[mv.start.index()] = None;
    }

    /// Occupancy implied by the board: a cell is occupied iff it holds a piece.
    pub fn occupancy(&self) -> OccupancySnapshot {
        let mut snap = OccupancySnapshot::empty();
        for pos in Position::all() {
            snap.set(pos, self.cells[pos.index()].is_some());
        }
        snap
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Square] {
        &self.cells
    }

    /// Symbols of one row, left to right (space for empty).
    pub fn row_symbols(&self, row: u8) -> [char; BOARD_SIZE as usize] {
        let mut out = [' '; BOARD_SIZE as usize];
        for (col, slot) in out.iter_mut().enumerate() {
            if let Some(pos) = Position::new(row, col as u8) {
                *slot = square_symbol(self.piece_at(pos));
            }
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Side};

    fn pos(row: u8, col: u8) -> Position {
        Position::new(row, col).unwrap()
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::new();
        assert_eq!(board.row_symbols(0).iter().collect::<String>(), "RNBQKBNR");
        assert_eq!(board.row_symbols(1).iter().collect::<String>(), "PPPPPPPP");
        for row in 2..6 {
            assert_eq!(board.row_symbols(row).iter().collect::<String>(), "        ");
        }
        assert_eq!(board.row_symbols(6).iter().collect::<String>(), "pppppppp");
        assert_eq!(board.row_symbols(7).iter().collect::<String>(), "rnbqkbnr");
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 32);
    }

    #[test]
    fn test_reset_restores_layout() {
        let mut board = Board::new();
        board.apply_move(Move::new(pos(1, 4), pos(3, 4)));
        board.set(pos(4, 4), Piece::from_symbol('q'));
        assert_ne!(board, Board::new());
        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_apply_move_overwrites_destination() {
        let mut board = Board::empty();
        board.set(pos(3, 3), Piece::from_symbol('R'));
        board.set(pos(3, 6), Piece::from_symbol('n'));

        board.apply_move(Move::new(pos(3, 3), pos(3, 6)));

        assert_eq!(board.piece_at(pos(3, 3)), None);
        assert_eq!(
            board.piece_at(pos(3, 6)),
            Some(Piece::new(PieceKind::Rook, Side::Upper))
        );
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 1);
    }

    #[test]
    fn test_occupancy_matches_pieces() {
        let board = Board::new();
        let occ = board.occupancy();
        for p in Position::all() {
            assert_eq!(occ.get(p), board.piece_at(p).is_some(), "mismatch at {}", p);
        }
        assert_eq!(occ.count(), 32);
    }

    #[test]
    fn test_from_rows_ignores_unknown_symbols() {
        let board = Board::from_rows(["x", "", "", "", "", "", "", "K"]);
        assert!(board.is_empty(pos(0, 0)));
        assert_eq!(board.piece_at(pos(7, 0)), Piece::from_symbol('K'));
    }
}
