//! Drawing surface and the wheel/board painters.
//!
//! Painters work in fixed logical coordinates (300×300 for the wheel,
//! 300×400 for the board) and only talk to the [`Surface`] trait, so any
//! backend that can fill a few primitive shapes can host the animation.

mod painter;
mod text;

pub use painter::{paint, paint_board, paint_wheel, slot_color, PLACEHOLDER};
pub use text::TextCanvas;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }
}

pub mod palette {
    use super::Rgb;

    pub const HOLIDAY: Rgb = Rgb::from_hex(0xFF6B6B);
    pub const MONDAY: Rgb = Rgb::from_hex(0x4ECDC4);
    pub const FRIDAY: Rgb = Rgb::from_hex(0xFFE66D);
    pub const BOARD_BG: Rgb = Rgb::from_hex(0x1A237E);
    pub const PEG: Rgb = Rgb::from_hex(0xFFD700);
    pub const WHEEL_BG: Rgb = Rgb::from_hex(0xF8F8F8);
    pub const OUTLINE: Rgb = Rgb::from_hex(0x333333);
    pub const MARKER: Rgb = Rgb::from_hex(0xFF0000);
    pub const PAGE: Rgb = Rgb::from_hex(0xFFFFFF);
    pub const INK: Rgb = Rgb::from_hex(0x000000);
}

/// A 2D drawing target in logical pixels, y axis pointing down.
pub trait Surface {
    /// Logical width and height.
    fn size(&self) -> (f64, f64);

    fn clear(&mut self, color: Rgb);

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgb);

    fn fill_circle(&mut self, cx: f64, cy: f64, r: f64, color: Rgb);

    /// Pie slice from `start` to `end` radians, clockwise on screen.
    fn fill_sector(&mut self, cx: f64, cy: f64, r: f64, start: f64, end: f64, color: Rgb);

    fn fill_triangle(&mut self, a: (f64, f64), b: (f64, f64), c: (f64, f64), color: Rgb);

    /// Text centered horizontally on `x`, vertically on `y`.
    fn draw_text(&mut self, x: f64, y: f64, text: &str, color: Rgb);
}
