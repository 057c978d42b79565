//! TerminalRenderer: presents a palette-indexed surface on a real terminal.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block (`▀`): foreground is the top pixel, background the bottom one.
//! The first frame is drawn in full; later frames only emit changed runs.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::palette::{Palette, Rgb};
use crate::surface::Surface;

const HALF_BLOCK: char = '▀';

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Surface>,
    buf: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
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

    /// Force the next draw to be a full redraw.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Presents `screen`, keeping a copy to diff the next frame against.
    ///
    /// Colors come from the surface's palette, or grayscale if it has none.
    pub fn draw(&mut self, screen: &Surface) -> Result<()> {
        let fallback;
        let palette = match screen.palette() {
            Some(p) => p,
            None => {
                fallback = Palette::grayscale();
                &fallback
            }
        };

        self.buf.clear();
        match self.last.as_ref() {
            Some(prev) if same_size(prev, screen) => {
                encode_diff_into(prev, screen, palette, &mut self.buf)?;
            }
            _ => encode_full_into(screen, palette, &mut self.buf)?,
        }
        self.flush_buf()?;

        match self.last.as_mut() {
            Some(prev) if same_size(prev, screen) => prev.copy_pixels_from(screen),
            _ => self.last = Some(screen.clone()),
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Terminal rows needed for a surface of `height` pixels.
pub fn cell_rows(height: u16) -> u16 {
    height.div_ceil(2)
}

/// Encode a full-frame redraw into `out`.
pub fn encode_full_into(screen: &Surface, palette: &Palette, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;

    let mut current: Option<(Rgb, Rgb)> = None;
    let rows = cell_rows(screen.height());
    for row in 0..rows {
        for x in 0..screen.width() {
            put_cell(out, cell_colors(screen, palette, x, row), &mut current)?;
        }
        if row + 1 < rows {
            out.queue(Print("\r\n"))?;
        }
    }

    out.queue(ResetColor)?;
    Ok(())
}

/// Encode a diff redraw (changed runs) into `out`.
pub fn encode_diff_into(
    prev: &Surface,
    next: &Surface,
    palette: &Palette,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut current: Option<(Rgb, Rgb)> = None;

    for_each_changed_run(prev, next, |x, row, len| {
        out.queue(cursor::MoveTo(x, row))?;
        for dx in 0..len {
            put_cell(out, cell_colors(next, palette, x + dx, row), &mut current)?;
        }
        Ok(())
    })?;

    out.queue(ResetColor)?;
    Ok(())
}

fn put_cell(
    out: &mut Vec<u8>,
    colors: (Rgb, Rgb),
    current: &mut Option<(Rgb, Rgb)>,
) -> Result<()> {
    if *current != Some(colors) {
        out.queue(SetForegroundColor(rgb_to_color(colors.0)))?;
        out.queue(SetBackgroundColor(rgb_to_color(colors.1)))?;
        *current = Some(colors);
    }
    out.queue(Print(HALF_BLOCK))?;
    Ok(())
}

fn pixel_pair(screen: &Surface, x: u16, row: u16) -> (u8, u8) {
    let y = i32::from(row) * 2;
    let top = screen.pixel(i32::from(x), y).unwrap_or_default();
    let bottom = screen.pixel(i32::from(x), y + 1).unwrap_or_default();
    (top, bottom)
}

fn cell_colors(screen: &Surface, palette: &Palette, x: u16, row: u16) -> (Rgb, Rgb) {
    let (top, bottom) = pixel_pair(screen, x, row);
    (palette.color(top), palette.color(bottom))
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn same_size(a: &Surface, b: &Surface) -> bool {
    a.width() == b.width() && a.height() == b.height()
}

fn for_each_changed_run(
    prev: &Surface,
    next: &Surface,
    mut f: impl FnMut(u16, u16, u16) -> Result<()>,
) -> Result<()> {
    let w = next.width();
    let rows = cell_rows(next.height());

    if !same_size(prev, next) {
        for row in 0..rows {
            f(0, row, w)?;
        }
        return Ok(());
    }

    for row in 0..rows {
        let mut x = 0;
        while x < w {
            if pixel_pair(prev, x, row) == pixel_pair(next, x, row) {
                x += 1;
                continue;
            }

            let start = x;
            x += 1;
            while x < w && pixel_pair(prev, x, row) != pixel_pair(next, x, row) {
                x += 1;
            }
            f(start, row, x - start)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn odd_heights_round_up_to_whole_rows() {
        assert_eq!(cell_rows(0), 0);
        assert_eq!(cell_rows(3), 2);
        assert_eq!(cell_rows(4), 2);
    }

    #[test]
    fn cell_uses_top_and_bottom_pixels() {
        let mut s = Surface::new(1, 2, 0, 0);
        s.set_pixel(0, 0, 10);
        s.set_pixel(0, 1, 20);
        let pal = Palette::grayscale();
        assert_eq!(
            cell_colors(&s, &pal, 0, 0),
            (Rgb::new(10, 10, 10), Rgb::new(20, 20, 20))
        );
    }

    #[test]
    fn changed_run_iterator_coalesces_adjacent_cells() {
        let a = Surface::new(5, 2, 0, 0);
        let mut b = Surface::new(5, 2, 0, 0);
        for x in 1..=3 {
            b.set_pixel(x, 1, 9);
        }

        let mut runs = Vec::new();
        for_each_changed_run(&a, &b, |x, row, len| {
            runs.push((x, row, len));
            Ok(())
        })
        .unwrap();
        assert_eq!(runs, vec![(1, 0, 3)]);
    }

    #[test]
    fn full_encode_emits_one_glyph_per_cell() {
        let s = Surface::new(3, 4, 0, 0);
        let mut out = Vec::new();
        encode_full_into(&s, &Palette::grayscale(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
    }
}
