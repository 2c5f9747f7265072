//! Output sink for board feedback.
//!
//! A [`DisplaySink`] is anything that can light individual squares and show
//! text: the LED strip under the board, a terminal, a test recorder. The
//! helpers at the bottom of this module paint the standard feedback frames
//! (selection, move result, setup errors) through that interface so that every
//! sink shows the same thing.

use std::fmt;

use crate::board::Board;
use crate::error::Result;
use crate::move_log::MoveLog;
use crate::setup::{Mismatch, MismatchKind};
use crate::types::{palette, Move, Piece, Position, Rgb, Side, NUM_SQUARES};

/// Help text listing the console commands.
pub const HELP_TEXT: &str = "\
Commands:
  h       show this help
  p       print the board
  m       print the move list
  r       reset the game
  q       quit
  <sq>    select a square, e.g. e2 (first the piece, then its destination)";

/// Textual messages shown to the players.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    SetupPrompt,
    SetupMismatch(Mismatch),
    SetupIncorrect,
    SetupVerified,
    NoPieceAt(Position),
    Selected {
        origin: Position,
        piece: Piece,
        candidates: usize,
    },
    InvalidMove(Move),
    Moved {
        piece: Piece,
        mv: Move,
    },
    Turn(Side),
    BoardReset,
    Help,
    Unrecognized(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::SetupPrompt => {
                f.write_str("Please set up the board according to the displayed state...")
            }
            Notice::SetupMismatch(m) => match m.kind {
                MismatchKind::Missing => write!(f, "Error: Missing piece at {}", m.pos),
                MismatchKind::Extra => write!(f, "Error: Extra piece at {}", m.pos),
            },
            Notice::SetupIncorrect => {
                f.write_str("Board setup incorrect. Please fix the highlighted positions.")
            }
            Notice::SetupVerified => f.write_str("Board setup verified!"),
            Notice::NoPieceAt(pos) => write!(f, "Error: No piece at {}", pos),
            Notice::Selected {
                origin,
                piece,
                candidates,
            } => write!(
                f,
                "Selected {} at {} ({} legal destination{})",
                piece.symbol(),
                origin,
                candidates,
                if *candidates == 1 { "" } else { "s" }
            ),
            Notice::InvalidMove(mv) => write!(f, "Invalid move {}", mv),
            Notice::Moved { piece, mv } => {
                write!(f, "moving {} from {} to {}", piece.symbol(), mv.start, mv.end)
            }
            Notice::Turn(side) => write!(f, "{} to move", side_label(*side)),
            Notice::BoardReset => f.write_str("Board reset to the starting position"),
            Notice::Help => f.write_str(HELP_TEXT),
            Notice::Unrecognized(line) => {
                write!(f, "Unrecognized input {:?} (type h for help)", line)
            }
        }
    }
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Upper => "Uppercase",
        Side::Lower => "Lowercase",
    }
}

/// Renders per-square highlights and text.
///
/// `set_cell` and `clear` only stage changes; `present` makes them visible.
pub trait DisplaySink {
    fn set_cell(&mut self, pos: Position, color: Rgb);
    fn clear(&mut self);
    fn present(&mut self) -> Result<()>;
    fn show_board(&mut self, board: &Board) -> Result<()>;
    fn show_moves(&mut self, log: &MoveLog) -> Result<()>;
    fn notice(&mut self, notice: &Notice) -> Result<()>;
}

impl<D: DisplaySink + ?Sized> DisplaySink for &mut D {
    fn set_cell(&mut self, pos: Position, color: Rgb) {
        (**self).set_cell(pos, color)
    }
    fn clear(&mut self) {
        (**self).clear()
    }
    fn present(&mut self) -> Result<()> {
        (**self).present()
    }
    fn show_board(&mut self, board: &Board) -> Result<()> {
        (**self).show_board(board)
    }
    fn show_moves(&mut self, log: &MoveLog) -> Result<()> {
        (**self).show_moves(log)
    }
    fn notice(&mut self, notice: &Notice) -> Result<()> {
        (**self).notice(notice)
    }
}

/// Light every occupied square in its side colour, the origin in yellow and
/// every candidate in green, then present.
pub fn paint_selection<D: DisplaySink + ?Sized>(
    sink: &mut D,
    board: &Board,
    origin: Position,
    candidates: &[Position],
) -> Result<()> {
    sink.clear();
    for pos in Position::all() {
        if let Some(piece) = board.piece_at(pos) {
            sink.set_cell(pos, palette::side_color(piece.side));
        }
    }
    sink.set_cell(origin, palette::SELECTED);
    for &dest in candidates {
        sink.set_cell(dest, palette::VALID_MOVE);
    }
    sink.present()
}

/// Light the destination green (accepted) or red (rejected), then present.
pub fn paint_result<D: DisplaySink + ?Sized>(
    sink: &mut D,
    destination: Position,
    accepted: bool,
) -> Result<()> {
    let color = if accepted {
        palette::VALID_MOVE
    } else {
        palette::INVALID_MOVE
    };
    sink.set_cell(destination, color);
    sink.present()
}

/// Light every offending setup square in the error colour, then present.
pub fn paint_mismatches<D: DisplaySink + ?Sized>(sink: &mut D, mismatches: &[Mismatch]) -> Result<()> {
    sink.clear();
    for m in mismatches {
        sink.set_cell(m.pos, palette::ERROR);
    }
    sink.present()
}

/// Turn every square off and present.
pub fn blank<D: DisplaySink + ?Sized>(sink: &mut D) -> Result<()> {
    sink.clear();
    sink.present()
}

/// In-memory sink that records everything it is asked to show.
///
/// Used by tests and by headless runs; `presented` holds the last frame that
/// was made visible, `staged` the frame being built.
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    pub staged: [Rgb; NUM_SQUARES],
    pub presented: [Rgb; NUM_SQUARES],
    pub present_count: usize,
    pub boards_shown: usize,
    pub lines: Vec<String>,
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self {
            staged: [palette::EMPTY; NUM_SQUARES],
            presented: [palette::EMPTY; NUM_SQUARES],
            present_count: 0,
            boards_shown: 0,
            lines: Vec::new(),
        }
    }
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn presented_at(&self, pos: Position) -> Rgb {
        self.presented[pos.index()]
    }

    /// `true` when any recorded text line contains `needle`.
    pub fn said(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl DisplaySink for RecordingDisplay {
    fn set_cell(&mut self, pos: Position, color: Rgb) {
        self.staged[pos.index()] = color;
    }

    fn clear(&mut self) {
        self.staged = [palette::EMPTY; NUM_SQUARES];
    }

    fn present(&mut self) -> Result<()> {
        self.presented = self.staged;
        self.present_count += 1;
        Ok(())
    }

    fn show_board(&mut self, _board: &Board) -> Result<()> {
        self.boards_shown += 1;
        Ok(())
    }

    fn show_moves(&mut self, log: &MoveLog) -> Result<()> {
        self.lines.extend(log.to_string().lines().map(str::to_string));
        Ok(())
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        self.lines.push(notice.to_string());
        Ok(())
    }
}
