//! TermPresenter: downsamples a pixel frame onto the terminal grid.
//!
//! Each character cell shows two pixels stacked vertically with the '▀'
//! half block, so an N-row terminal carries 2N pixel rows. Frames are
//! resampled with nearest-neighbor to whatever size the terminal reports,
//! which keeps the presenter independent of the world resolution.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use gridlight_render::{PixelBuffer, Rgb};

const HALF_BLOCK: char = '\u{2580}';

/// Terminal rows reserved for the HUD line.
const HUD_ROWS: u16 = 1;

pub struct TermPresenter {
    stdout: io::Stdout,
    buf: Vec<u8>,
    last_size: Option<(u16, u16)>,
}

impl Default for TermPresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl TermPresenter {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            buf: Vec::with_capacity(256 * 1024),
            last_size: None,
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Draw one frame plus the HUD line.
    pub fn present(&mut self, frame: &PixelBuffer, hud: &str) -> Result<()> {
        let (cols, rows) = terminal::size()?;
        if rows <= HUD_ROWS || cols == 0 {
            return Ok(());
        }

        self.buf.clear();
        if self.last_size != Some((cols, rows)) {
            // Size changed (or first frame): drop stale glyphs outside the
            // area we are about to overwrite.
            self.buf.queue(terminal::Clear(terminal::ClearType::All))?;
            self.last_size = Some((cols, rows));
        }

        self.buf.queue(cursor::MoveTo(0, 0))?;
        self.buf.queue(ResetColor)?;
        self.buf.queue(Print(truncated(hud, cols as usize)))?;

        encode_frame_into(frame, cols, rows - HUD_ROWS, HUD_ROWS, &mut self.buf)?;
        self.flush_buf()
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

fn truncated(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Encode the resampled frame as half-block glyphs into `out`.
///
/// Builds a crossterm command sequence without touching stdout; color
/// changes are emitted only when a glyph's pair differs from the previous
/// one, which keeps the escape stream short on flat regions.
fn encode_frame_into(
    frame: &PixelBuffer,
    cols: u16,
    rows: u16,
    row_offset: u16,
    out: &mut Vec<u8>,
) -> Result<()> {
    let src_w = frame.width();
    let src_h = frame.height();
    if src_w == 0 || src_h == 0 {
        return Ok(());
    }

    let pixel_rows = rows as usize * 2;
    let mut current: Option<(Rgb, Rgb)> = None;

    for cy in 0..rows {
        out.queue(cursor::MoveTo(0, cy + row_offset))?;

        for cx in 0..cols {
            let sx = cx as usize * src_w / cols as usize;
            let sy_top = (cy as usize * 2) * src_h / pixel_rows;
            let sy_bot = (cy as usize * 2 + 1) * src_h / pixel_rows;

            let top = frame.get(sx, sy_top).unwrap_or(Rgb::new(0, 0, 0));
            let bot = frame.get(sx, sy_bot).unwrap_or(Rgb::new(0, 0, 0));

            if current != Some((top, bot)) {
                out.queue(SetForegroundColor(to_color(top)))?;
                out.queue(SetBackgroundColor(to_color(bot)))?;
                current = Some((top, bot));
            }
            out.queue(Print(HALF_BLOCK))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
