//! Terminal [`DisplaySink`]: square highlights drawn over a coloured board,
//! text written as plain lines.

use std::io::Write;

use crate::board_view::{BoardView, Highlights};
use crate::core::display::{DisplaySink, Notice};
use crate::core::{Board, ChessyError, MoveLog, Result};
use crate::renderer::InlineRenderer;
use crate::text::{format_board, format_moves, ColumnOrder};
use crate::types::{palette, Position, Rgb, NUM_SQUARES};

pub struct TermDisplay<W: Write> {
    renderer: InlineRenderer<W>,
    view: BoardView,
    order: ColumnOrder,
    color: bool,
    board: Board,
    staged: Highlights,
}

impl<W: Write> TermDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            renderer: InlineRenderer::new(out),
            view: BoardView::default(),
            order: ColumnOrder::Normal,
            color: true,
            board: Board::new(),
            staged: [None; NUM_SQUARES],
        }
    }

    pub fn with_order(mut self, order: ColumnOrder) -> Self {
        self.order = order;
        self.view = self.view.with_order(order);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn get_ref(&self) -> &W {
        self.renderer.get_ref()
    }

    pub fn into_inner(self) -> W {
        self.renderer.into_inner()
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let out = self.renderer.get_mut();
        out.write_all(text.as_bytes())
            .and_then(|_| out.flush())
            .map_err(|e| ChessyError::Display(e.to_string()))
    }

    fn lit_squares(&self) -> String {
        let mut parts = Vec::new();
        for pos in Position::all() {
            if let Some(color) = self.staged[pos.index()] {
                parts.push(format!("{}:{}", pos, color_name(color)));
            }
        }
        parts.join(" ")
    }
}

impl<W: Write> DisplaySink for TermDisplay<W> {
    fn set_cell(&mut self, pos: Position, color: Rgb) {
        // Piece colours are already carried by the letters on the board.
        let lit = match color {
            palette::UPPER_PIECE | palette::LOWER_PIECE | palette::EMPTY => None,
            other => Some(other),
        };
        self.staged[pos.index()] = lit;
    }

    fn clear(&mut self) {
        self.staged = [None; NUM_SQUARES];
    }

    fn present(&mut self) -> Result<()> {
        if self.staged.iter().all(Option::is_none) {
            return Ok(());
        }
        if self.color {
            let fb = self.view.render(&self.board, &self.staged);
            self.renderer
                .draw(&fb)
                .map_err(|e| ChessyError::Display(e.to_string()))
        } else {
            let line = format!("lit: {}\n", self.lit_squares());
            self.write_text(&line)
        }
    }

    fn show_board(&mut self, board: &Board) -> Result<()> {
        self.board = board.clone();
        let text = format_board(board, self.order);
        self.write_text(&text)
    }

    fn show_moves(&mut self, log: &MoveLog) -> Result<()> {
        let text = format_moves(log);
        self.write_text(&text)
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        let line = format!("{notice}\n");
        self.write_text(&line)
    }
}

fn color_name(color: Rgb) -> &'static str {
    match color {
        palette::SELECTED => "selected",
        palette::VALID_MOVE => "valid",
        palette::INVALID_MOVE => "invalid",
        _ => "lit",
    }
}
