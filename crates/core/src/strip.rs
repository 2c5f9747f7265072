//! LED strip mapping.
//!
//! The 64 pixels under the board are wired as one serpentine strip: even rows
//! run left to right, odd rows right to left. [`StripDisplay`] turns square
//! highlights into pixel writes; text output goes to the log because the
//! board itself has no text display.

use crate::board::Board;
use crate::display::{DisplaySink, Notice};
use crate::error::Result;
use crate::move_log::MoveLog;
use crate::types::{Position, Rgb, BOARD_SIZE, NUM_SQUARES};

/// Pixel index of a square on the serpentine strip.
#[inline]
pub fn strip_index(pos: Position) -> usize {
    let row = pos.row() as usize;
    let col = pos.col() as usize;
    let width = BOARD_SIZE as usize;
    if row % 2 == 0 {
        row * width + col
    } else {
        row * width + (width - 1 - col)
    }
}

/// Addressable pixel strip driver seam.
pub trait PixelStrip {
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()>;
    fn clear(&mut self) -> Result<()>;
    fn refresh(&mut self) -> Result<()>;
}

/// [`DisplaySink`] over a 64-pixel serpentine strip.
pub struct StripDisplay<P> {
    strip: P,
    frame: [Option<Rgb>; NUM_SQUARES],
    cleared: bool,
}

impl<P: PixelStrip> StripDisplay<P> {
    pub fn new(strip: P) -> Self {
        Self {
            strip,
            frame: [None; NUM_SQUARES],
            cleared: false,
        }
    }

    pub fn strip(&self) -> &P {
        &self.strip
    }

    pub fn into_inner(self) -> P {
        self.strip
    }
}

impl<P: PixelStrip> DisplaySink for StripDisplay<P> {
    fn set_cell(&mut self, pos: Position, color: Rgb) {
        self.frame[pos.index()] = Some(color);
    }

    fn clear(&mut self) {
        self.frame = [None; NUM_SQUARES];
        self.cleared = true;
    }

    fn present(&mut self) -> Result<()> {
        if self.cleared {
            self.strip.clear()?;
            self.cleared = false;
        }
        for pos in Position::all() {
            if let Some(color) = self.frame[pos.index()].take() {
                self.strip.set_pixel(strip_index(pos), color)?;
            }
        }
        self.strip.refresh()
    }

    fn show_board(&mut self, board: &Board) -> Result<()> {
        for row in 0..BOARD_SIZE {
            let line: String = board.row_symbols(row).iter().collect();
            tracing::info!(row = 8 - row, "|{}|", line);
        }
        Ok(())
    }

    fn show_moves(&mut self, log: &MoveLog) -> Result<()> {
        for (n, mv) in log.numbered() {
            tracing::info!("{}. {}", n, mv);
        }
        Ok(())
    }

    fn notice(&mut self, notice: &Notice) -> Result<()> {
        tracing::info!("{}", notice);
        Ok(())
    }
}
