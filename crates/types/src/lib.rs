//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules, session logic, terminal rendering, LED output).
//!
//! # Board Coordinates
//!
//! - **Rows**: 0-7, row 0 is the back rank of the uppercase side
//! - **Columns**: 0-7, column 0 is file `a`
//! - **Algebraic**: file = `'a' + col`, rank = `8 - row`
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `POLL_INTERVAL_MS` | 100 | Interval between sensor polls while waiting for a move |
//! | `FEEDBACK_MS` | 500 | How long success/failure feedback stays lit |
//! | `SETUP_RETRY_MS` | 500 | Delay between setup verification attempts |
//!
//! # Examples
//!
//! ```
//! use chessy_types::{Piece, PieceKind, Position, Side};
//!
//! let e2 = Position::from_algebraic("e2").unwrap();
//! assert_eq!((e2.row(), e2.col()), (6, 4));
//! assert_eq!(e2.to_string(), "e2");
//!
//! let pawn = Piece::from_symbol('P').unwrap();
//! assert_eq!(pawn.kind, PieceKind::Pawn);
//! assert_eq!(pawn.side, Side::Upper);
//! assert_eq!(pawn.symbol(), 'P');
//! ```

use std::fmt;

/// Board edge length (8 rows, 8 columns).
pub const BOARD_SIZE: u8 = 8;

/// Number of squares on the board.
pub const NUM_SQUARES: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Interval between sensor polls while waiting for a pick-up or put-down.
pub const POLL_INTERVAL_MS: u64 = 100;

/// How long move feedback stays on the board before the next turn.
pub const FEEDBACK_MS: u64 = 500;

/// Delay between setup verification attempts.
pub const SETUP_RETRY_MS: u64 = 500;

/// Maximum number of destinations any piece can have (queen in the centre: 27).
pub const MAX_CANDIDATES: usize = 32;


/// A square on the 8x8 board.
///
/// Always within `[0,7] x [0,7]`; construct through [`Position::new`] or
/// [`Position::offset`], both of which reject off-board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    /// Create a position, returning `None` when out of bounds.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.row
    }

    pub const fn col(self) -> u8 {
        self.col
    }

    /// Row-major index (`row * 8 + col`).
    #[inline(always)]
    pub const fn index(self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index >= NUM_SQUARES {
            return None;
        }
        Some(Self {
            row: (index / BOARD_SIZE as usize) as u8,
            col: (index % BOARD_SIZE as usize) as u8,
        })
    }

    /// Step by `(dr, dc)`; `None` if the result leaves the board.
    #[inline]
    pub fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i8 + dr;
        let col = self.col as i8 + dc;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..NUM_SQUARES).filter_map(Self::from_index)
    }

    /// Parse a two-character algebraic token such as `e2` (file is case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use chessy_types::Position;
    ///
    /// assert_eq!(Position::from_algebraic("a8"), Position::new(0, 0));
    /// assert_eq!(Position::from_algebraic("H1"), Position::new(7, 7));
    /// assert_eq!(Position::from_algebraic("z9"), None);
    /// ```
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = BOARD_SIZE - (rank as u8 - b'0');
        Self::new(row, col)
    }

    pub fn file_char(self) -> char {
        (b'a' + self.col) as char
    }

    pub fn rank_number(self) -> u8 {
        BOARD_SIZE - self.row
    }

    pub fn to_algebraic(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_number())
    }
}

/// The two sides, identified by the letter case of their symbols.
///
/// - **Upper**: uppercase symbols, back rank on row 0, pawns start on row 1 and advance +1
/// - **Lower**: lowercase symbols, back rank on row 7, pawns start on row 6 and advance -1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Upper,
    Lower,
}

impl Side {
    /// Side encoded by a symbol's letter case; `None` for non-letters.
    pub fn of_symbol(ch: char) -> Option<Self> {
        if ch.is_ascii_uppercase() {
            Some(Side::Upper)
        } else if ch.is_ascii_lowercase() {
            Some(Side::Lower)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Upper => "upper",
            Side::Lower => "lower",
        }
    }
}

/// The six piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Kind from a symbol, ignoring case.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'r' => Some(PieceKind::Rook),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Lowercase letter for this kind.
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Rook => 'r',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

/// A piece: kind and side, decoded from (and encoded back to) one ASCII symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    /// Decode a symbol such as `'N'` or `'q'`. Space and unknown letters yield `None`.
    pub fn from_symbol(ch: char) -> Option<Self> {
        Some(Self {
            kind: PieceKind::from_char(ch)?,
            side: Side::of_symbol(ch)?,
        })
    }

    pub fn symbol(&self) -> char {
        let ch = self.kind.as_char();
        match self.side {
            Side::Upper => ch.to_ascii_uppercase(),
            Side::Lower => ch,
        }
    }

    /// `true` when `other` belongs to the opposite side.
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.side != other.side
    }
}

/// A cell on the board
///
/// - `None`: Empty cell (printed as a space)
/// - `Some(Piece)`: Cell holding the given piece
pub type Square = Option<Piece>;

/// Symbol for a square, space when empty.
pub fn square_symbol(square: Square) -> char {
    square.map(|p| p.symbol()).unwrap_or(' ')
}

/// A committed or candidate move from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub start: Position,
    pub end: Position,
}

impl Move {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.start, self.end)
    }
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }

    pub const fn to_hex(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }
}

/// Board highlight palette.
pub mod palette {
    use super::Rgb;

    pub const EMPTY: Rgb = Rgb::from_hex(0x000000);
    pub const SELECTED: Rgb = Rgb::from_hex(0xFFFF00);
    pub const VALID_MOVE: Rgb = Rgb::from_hex(0x00FF00);
    pub const INVALID_MOVE: Rgb = Rgb::from_hex(0xFF0000);
    pub const UPPER_PIECE: Rgb = Rgb::from_hex(0xFFFFFF);
    pub const LOWER_PIECE: Rgb = Rgb::from_hex(0x808080);
    pub const ERROR: Rgb = Rgb::from_hex(0xFF0000);

    use super::Side;

    /// Colour used to show an occupied square belonging to `side`.
    pub fn side_color(side: Side) -> Rgb {
        match side {
            Side::Upper => UPPER_PIECE,
            Side::Lower => LOWER_PIECE,
        }
    }
}
