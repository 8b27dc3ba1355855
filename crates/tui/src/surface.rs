//! Terminal drawing surface.
//!
//! Maps the chart's pixel coordinates onto terminal cells using a fixed
//! cell size, so the chart core can paint into a ratatui [`Buffer`].

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use hgantt_chart::{CellGrid, PixelRect, Rgb, Surface};

use crate::navigation::to_color;

/// Pixel size of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 8.0,
            height: 16.0,
        }
    }
}

impl CellSize {
    /// Pixel extent of an area of cells.
    pub fn pixels(&self, area: Rect) -> (f64, f64) {
        (
            f64::from(area.width) * self.width,
            f64::from(area.height) * self.height,
        )
    }

    /// The raster the chart snaps its bars to.
    pub fn grid(&self) -> CellGrid {
        CellGrid {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel position of the centre of the cell at `(col, row)`.
    pub fn cell_center(&self, col: u16, row: u16) -> (f64, f64) {
        (
            (f64::from(col) + 0.5) * self.width,
            (f64::from(row) + 0.5) * self.height,
        )
    }
}

/// Line glyphs by direction.
mod glyph {
    pub const VERTICAL: &str = "\u{2502}"; // │
    pub const HORIZONTAL: &str = "\u{2500}"; // ─
    pub const DIAGONAL: &str = "\u{00B7}"; // ·
}

/// A [`Surface`] backed by a region of a ratatui buffer.
pub struct TerminalSurface<'a> {
    buf: &'a mut Buffer,
    area: Rect,
    cell: CellSize,
}

impl<'a> TerminalSurface<'a> {
    pub fn new(buf: &'a mut Buffer, area: Rect, cell: CellSize) -> Self {
        Self { buf, area, cell }
    }

    /// Column of a pixel x, relative to the area.
    fn col(&self, x: f64) -> i64 {
        (x / self.cell.width).floor() as i64
    }

    /// Row of a pixel y, relative to the area.
    fn row(&self, y: f64) -> i64 {
        (y / self.cell.height).floor() as i64
    }

    /// Apply `f` to the cell at area-relative `(col, row)` if it is visible.
    fn with_cell(&mut self, col: i64, row: i64, f: impl FnOnce(&mut ratatui::buffer::Cell)) {
        if col < 0
            || row < 0
            || col >= i64::from(self.area.width)
            || row >= i64::from(self.area.height)
        {
            return;
        }
        let x = self.area.x + col as u16;
        let y = self.area.y + row as u16;
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            f(cell);
        }
    }
}

impl Surface for TerminalSurface<'_> {
    fn size(&self) -> (f64, f64) {
        self.cell.pixels(self.area)
    }

    fn clear(&mut self) {
        for y in self.area.top()..self.area.bottom() {
            for x in self.area.left()..self.area.right() {
                if let Some(cell) = self.buf.cell_mut((x, y)) {
                    cell.reset();
                }
            }
        }
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Rgb) {
        let (cols, rows) = self.cell.grid().span(&rect);
        let cols = cols.start.max(0)..cols.end.min(i64::from(self.area.width));
        let rows = rows.start.max(0)..rows.end.min(i64::from(self.area.height));

        let bg = to_color(color);
        for row in rows {
            for col in cols.clone() {
                self.with_cell(col, row, |cell| {
                    cell.set_symbol(" ").set_bg(bg);
                });
            }
        }
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb) {
        let (c0, r0) = (self.col(from.0), self.row(from.1));
        let (c1, r1) = (self.col(to.0), self.row(to.1));
        let (dc, dr) = (c1 - c0, r1 - r0);

        let symbol = if dc == 0 {
            glyph::VERTICAL
        } else if dr == 0 {
            glyph::HORIZONTAL
        } else {
            glyph::DIAGONAL
        };
        let fg = to_color(color);

        let steps = dc.abs().max(dr.abs());
        for step in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                step as f64 / steps as f64
            };
            let col = c0 + (dc as f64 * t).round() as i64;
            let row = r0 + (dr as f64 * t).round() as i64;
            self.with_cell(col, row, |cell| {
                cell.set_symbol(symbol).set_fg(fg);
            });
        }
    }

    /// The glyph row is the one holding the point half a cell above the
    /// baseline.
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: Rgb) {
        let row = self.row(y - self.cell.height / 2.0);
        if row < 0 || row >= i64::from(self.area.height) {
            return;
        }

        let col = self.col(x);
        let skip = (-col).max(0) as usize;
        let col = col.max(0);
        let available = i64::from(self.area.width) - col;
        if available <= 0 {
            return;
        }

        let visible: String = text.chars().skip(skip).collect();
        self.buf.set_stringn(
            self.area.x + col as u16,
            self.area.y + row as u16,
            visible,
            available as usize,
            Style::default().fg(to_color(color)),
        );
    }
}
