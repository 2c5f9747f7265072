//! Rules module - per-piece destination generation
//!
//! Answers one question: which squares can the piece on `origin` physically
//! reach given the pieces in its way. There is no check, pin, castling,
//! en passant or promotion logic.
//!
//! - **Sliding pieces** (rook, bishop, queen) step along each ray until the
//!   board edge or the first occupied square; that square is included only
//!   when it holds an enemy piece.
//! - **Leapers** (knight, king) try a fixed offset table; a target is legal
//!   when it is on the board and empty or enemy-occupied.
//! - **Pawns** advance towards the opposing back rank, may advance two from
//!   their start rank, and capture one square diagonally forward.
//!
//! The pawn two-square advance only checks that the landing square is empty,
//! not the square it passes over. Callers relying on full chess legality must
//! not use this generator.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::types::{Move, Piece, PieceKind, Position, Side, MAX_CANDIDATES};

/// Destinations for one origin, in generation order.
pub type Candidates = ArrayVec<Position, MAX_CANDIDATES>;

/// Ray or leap direction as `(d_row, d_col)`.
pub type Direction = (i8, i8);

pub const ROOK_DIRS: [Direction; 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

pub const BISHOP_DIRS: [Direction; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

pub const QUEEN_DIRS: [Direction; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

pub const KING_OFFSETS: [Direction; 8] = QUEEN_DIRS;

/// Forward direction and start rank of a pawn of `side`.
pub fn pawn_params(side: Side) -> (i8, u8) {
    match side {
        Side::Lower => (-1, 6),
        Side::Upper => (1, 1),
    }
}

/// Legal destinations for the piece on `origin`; empty when `origin` is empty.
pub fn candidates(board: &Board, origin: Position) -> Candidates {
    let mut out = Candidates::new();
    let Some(piece) = board.piece_at(origin) else {
        return out;
    };

    match piece.kind {
        PieceKind::Pawn => pawn_moves(board, origin, piece, &mut out),
        PieceKind::Rook => slide(board, origin, piece, &ROOK_DIRS, &mut out),
        PieceKind::Knight => leap(board, origin, piece, &KNIGHT_OFFSETS, &mut out),
        PieceKind::Bishop => slide(board, origin, piece, &BISHOP_DIRS, &mut out),
        PieceKind::Queen => slide(board, origin, piece, &QUEEN_DIRS, &mut out),
        PieceKind::King => leap(board, origin, piece, &KING_OFFSETS, &mut out),
    }

    out
}

/// `true` when `mv.end` is among the destinations of `mv.start`.
pub fn is_legal(board: &Board, mv: Move) -> bool {
    candidates(board, mv.start).contains(&mv.end)
}

#[inline]
fn is_enemy(board: &Board, mover: Piece, target: Position) -> bool {
    board
        .piece_at(target)
        .map(|other| mover.is_enemy_of(&other))
        .unwrap_or(false)
}

fn pawn_moves(board: &Board, origin: Position, piece: Piece, out: &mut Candidates) {
    let (dir, start_row) = pawn_params(piece.side);

    // Two-square advance: landing square only.
    if origin.row() == start_row {
        if let Some(two_ahead) = origin.offset(2 * dir, 0) {
            if board.is_empty(two_ahead) {
                out.push(two_ahead);
            }
        }
    }

    if let Some(one_ahead) = origin.offset(dir, 0) {
        if board.is_empty(one_ahead) {
            out.push(one_ahead);
        }
    }

    for dc in [-1, 1] {
        if let Some(target) = origin.offset(dir, dc) {
            if is_enemy(board, piece, target) {
                out.push(target);
            }
        }
    }
}

fn slide(board: &Board, origin: Position, piece: Piece, dirs: &[Direction], out: &mut Candidates) {
    for &(dr, dc) in dirs {
        let mut cur = origin;
        while let Some(next) = cur.offset(dr, dc) {
            match board.piece_at(next) {
                None => out.push(next),
                Some(other) => {
                    if piece.is_enemy_of(&other) {
                        out.push(next);
                    }
                    break;
                }
            }
            cur = next;
        }
    }
}

fn leap(board: &Board, origin: Position, piece: Piece, offsets: &[Direction], out: &mut Candidates) {
    for &(dr, dc) in offsets {
        if let Some(target) = origin.offset(dr, dc) {
            if board.is_empty(target) || is_enemy(board, piece, target) {
                out.push(target);
            }
        }
    }
}
