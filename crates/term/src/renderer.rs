//! InlineRenderer: writes a framebuffer to a line-oriented terminal.
//!
//! The console front end reads whole lines from stdin, so the renderer never
//! enters raw mode or the alternate screen. Frames are printed in place in the
//! scrollback, one styled row per line.

use std::io::Write;

use anyhow::Result;

use crossterm::{
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer};
use crate::types::Rgb;

pub struct InlineRenderer<W: Write> {
    out: W,
    buf: Vec<u8>,
}

impl<W: Write> InlineRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(4 * 1024),
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print one frame with colours.
    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.buf.clear();
        encode_frame_into(fb, &mut self.buf)?;
        self.flush_buf()
    }

    /// Print one frame as plain characters.
    pub fn draw_plain(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.out.write_all(fb.to_plain_text().as_bytes())?;
        self.out.flush()?;
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.out.write_all(&self.buf)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Encode a frame as styled lines into `out`.
///
/// Styles are reset at the end of every row so a frame never bleeds into the
/// text printed after it.
pub fn encode_frame_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    for y in 0..fb.height() {
        let mut current_style: Option<CellStyle> = None;
        for x in 0..fb.width() {
            let cell = fb.get(x, y).unwrap_or_default();
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
        out.queue(ResetColor)?;
        out.queue(SetAttribute(Attribute::Reset))?;
        out.queue(Print('\n'))?;
    }
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetForegroundColor(rgb_to_color(style.fg)))?;
    out.queue(SetBackgroundColor(rgb_to_color(style.bg)))?;
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    Ok(())
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_conversion_keeps_channels() {
        let style = CellStyle::default();
        assert_eq!(
            rgb_to_color(style.fg),
            Color::Rgb {
                r: style.fg.r,
                g: style.fg.g,
                b: style.fg.b
            }
        );
    }

    #[test]
    fn encoded_frame_has_one_line_per_row() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(0, 0, "abc", CellStyle::default());
        fb.put_str(0, 1, "def", CellStyle::default().bold());

        let mut out = Vec::new();
        encode_frame_into(&fb, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches('\n').count(), 2);
        assert!(text.contains("abc"));
        assert!(text.contains("def"));
        assert!(text.contains("\x1b["));
    }

    #[test]
    fn plain_draw_writes_no_escape_codes() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "ok", CellStyle::default());
        let mut r = InlineRenderer::new(Vec::new());
        r.draw_plain(&fb).unwrap();
        assert_eq!(String::from_utf8(r.into_inner()).unwrap(), "ok\n");
    }
}
