//! BoardView: maps a board plus square highlights into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::Board;
use crate::fb::{CellStyle, FrameBuffer};
use crate::text::ColumnOrder;
use crate::types::{palette, Position, Rgb, Side, BOARD_SIZE, NUM_SQUARES};

/// Per-square highlight overlay (`None` = no highlight).
pub type Highlights = [Option<Rgb>; NUM_SQUARES];

const LIGHT_SQUARE: Rgb = Rgb::new(60, 60, 70);
const DARK_SQUARE: Rgb = Rgb::new(35, 35, 45);
const LABEL_FG: Rgb = Rgb::new(150, 150, 160);
const BORDER_FG: Rgb = Rgb::new(200, 200, 200);
const ON_HIGHLIGHT_FG: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal renderer for the board.
pub struct BoardView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    order: ColumnOrder,
}

impl Default for BoardView {
    fn default() -> Self {
        // 3 columns per square keeps the piece letter centred.
        Self {
            cell_w: 3,
            order: ColumnOrder::Normal,
        }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    pub fn with_order(mut self, order: ColumnOrder) -> Self {
        self.order = order;
        self
    }

    /// Framebuffer size needed for one board: labels and border on each side.
    pub fn frame_size(&self) -> (u16, u16) {
        let w = 2 + (BOARD_SIZE as u16) * self.cell_w + 2;
        let h = 1 + 1 + BOARD_SIZE as u16 + 1 + 1;
        (w, h)
    }

    /// Render into an existing framebuffer of at least [`Self::frame_size`].
    pub fn render_into(&self, board: &Board, highlights: &Highlights, fb: &mut FrameBuffer) {
        let (w, h) = self.frame_size();
        let label = CellStyle::new(LABEL_FG, Rgb::new(0, 0, 0));
        let border = CellStyle::new(BORDER_FG, Rgb::new(0, 0, 0));

        // File labels above and below.
        for (i, col) in self.order.columns().iter().enumerate() {
            let x = 2 + (i as u16) * self.cell_w + self.cell_w / 2;
            let file = (b'a' + col) as char;
            fb.put_char(x, 0, file, label);
            fb.put_char(x, h - 1, file, label);
        }

        self.draw_border(fb, 1, 1, w - 2, h - 2, border);

        for row in 0..BOARD_SIZE {
            let y = 2 + row as u16;
            let rank = (b'0' + BOARD_SIZE - row) as char;
            fb.put_char(0, y, rank, label);
            fb.put_char(w - 1, y, rank, label);

            for (i, col) in self.order.columns().iter().enumerate() {
                let Some(pos) = Position::new(row, *col) else {
                    continue;
                };
                let x = 2 + (i as u16) * self.cell_w;
                self.draw_square(fb, x, y, pos, board, highlights[pos.index()]);
            }
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, board: &Board, highlights: &Highlights) -> FrameBuffer {
        let (w, h) = self.frame_size();
        let mut fb = FrameBuffer::new(w, h);
        self.render_into(board, highlights, &mut fb);
        fb
    }

    fn draw_square(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        pos: Position,
        board: &Board,
        highlight: Option<Rgb>,
    ) {
        let base = if (pos.row() + pos.col()) % 2 == 0 {
            LIGHT_SQUARE
        } else {
            DARK_SQUARE
        };
        let piece = board.piece_at(pos);
        let (bg, fg) = match highlight {
            Some(color) => (color, ON_HIGHLIGHT_FG),
            None => (
                base,
                piece.map(|p| piece_fg(p.side)).unwrap_or(LABEL_FG),
            ),
        };
        let mut style = CellStyle::new(fg, bg);
        if piece.is_some() {
            style = style.bold();
        }

        for dx in 0..self.cell_w {
            fb.put_char(x + dx, y, ' ', style);
        }
        let ch = piece.map(|p| p.symbol()).unwrap_or(' ');
        fb.put_char(x + self.cell_w / 2, y, ch, style);
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }
}

fn piece_fg(side: Side) -> Rgb {
    match side {
        Side::Upper => palette::UPPER_PIECE,
        Side::Lower => Rgb::new(240, 170, 60),
    }
}
