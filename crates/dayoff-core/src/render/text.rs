use std::f64::consts::TAU;
use std::fmt;

use super::{palette, Rgb, Surface};

/// Character raster for terminals.
///
/// Each cell covers a block of logical pixels and takes the glyph of the
/// last shape that covered the cell's center. Terminal cells are about
/// twice as tall as wide, so the presets use half as many rows as columns
/// per logical unit.
#[derive(Debug, Clone)]
pub struct TextCanvas {
    width: f64,
    height: f64,
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TextCanvas {
    pub fn new(width: f64, height: f64, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            width,
            height,
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    pub fn for_wheel() -> Self {
        Self::new(300.0, 300.0, 60, 30)
    }

    pub fn for_board() -> Self {
        Self::new(300.0, 400.0, 40, 27)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell(&self, col: usize, row: usize) -> Option<char> {
        if col < self.cols && row < self.rows {
            Some(self.cells[row * self.cols + col])
        } else {
            None
        }
    }

    /// Glyph of the cell containing logical point `(x, y)`.
    pub fn glyph_at(&self, x: f64, y: f64) -> Option<char> {
        let (col, row) = self.to_cell(x, y)?;
        self.cell(col, row)
    }

    pub fn row_text(&self, row: usize) -> String {
        self.cells[row * self.cols..(row + 1) * self.cols].iter().collect()
    }

    fn cell_w(&self) -> f64 {
        self.width / self.cols as f64
    }

    fn cell_h(&self) -> f64 {
        self.height / self.rows as f64
    }

    fn to_cell(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        if x < 0.0 || y < 0.0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(((x / self.cell_w()) as usize, (y / self.cell_h()) as usize))
    }

    /// Fill every cell whose center satisfies `inside`.
    fn fill_where(&mut self, glyph: char, inside: impl Fn(f64, f64) -> bool) {
        let (cw, ch) = (self.cell_w(), self.cell_h());
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = (col as f64 + 0.5) * cw;
                let y = (row as f64 + 0.5) * ch;
                if inside(x, y) {
                    self.cells[row * self.cols + col] = glyph;
                }
            }
        }
    }
}

/// Glyph for a palette color.
fn glyph(color: Rgb) -> char {
    match color {
        palette::HOLIDAY => '#',
        palette::MONDAY => '=',
        palette::FRIDAY => '~',
        palette::PEG => 'o',
        palette::MARKER => '@',
        palette::OUTLINE => '%',
        palette::WHEEL_BG => '.',
        palette::BOARD_BG | palette::PAGE => ' ',
        _ => '+',
    }
}

fn edge(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

impl Surface for TextCanvas {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgb) {
        self.cells.fill(glyph(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb) {
        self.fill_where(glyph(color), |px, py| {
            px >= x && px < x + w && py >= y && py < y + h
        });
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb) {
        // Small shapes still mark the cell they sit in.
        if r < self.cell_w().min(self.cell_h()) {
            if let Some((col, row)) = self.to_cell(cx, cy) {
                self.cells[row * self.cols + col] = glyph(color);
            }
            return;
        }
        self.fill_where(glyph(color), |px, py| {
            (px - cx).powi(2) + (py - cy).powi(2) <= r * r
        });
    }

    fn fill_sector(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64, color: Rgb) {
        let sweep = end - start;
        self.fill_where(glyph(color), |px, py| {
            let (dx, dy) = (px - cx, py - cy);
            if dx * dx + dy * dy > r * r {
                return false;
            }
            sweep >= TAU || (dy.atan2(dx) - start).rem_euclid(TAU) < sweep
        });
    }

    fn fill_triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64), color: Rgb) {
        self.fill_where(glyph(color), |px, py| {
            let p = (px, py);
            let (d1, d2, d3) = (edge(p, a, b), edge(p, b, c), edge(p, c, a));
            let neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
            let pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
            !(neg && pos)
        });
    }

    fn draw_text(&mut self, x: f64, y: f64, text: &str, _color: Rgb) {
        let Some((col, row)) = self.to_cell(x.clamp(0.0, self.width - 1e-9), y) else {
            return;
        };
        let len = text.chars().count();
        let first = col.saturating_sub(len / 2);
        for (i, ch) in text.chars().enumerate() {
            let c = first + i;
            if c >= self.cols {
                break;
            }
            self.cells[row * self.cols + c] = ch;
        }
    }
}

impl fmt::Display for TextCanvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            writeln!(f, "{}", self.row_text(row).trim_end())?;
        }
        Ok(())
    }
}
