//! 2D rendering module
//!
//! The game draws through the `Surface` trait: clear, filled rectangles,
//! filled circles and centred text. `CanvasSurface` backs it with an HTML
//! canvas on web; `RecordingSurface` captures draw commands for tests and the
//! headless replay driver.

pub mod frame;
pub mod recording;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use frame::draw_frame;
pub use recording::{DrawCommand, RecordingSurface};

use glam::Vec2;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Phosphor green of old terminals
    pub const TERMINAL_GREEN: Color = Color::rgb(0x4a, 0xf6, 0x26);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// CSS hex notation, e.g. `#4af626`
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Current size in pixels (width, height)
    fn size(&self) -> (f32, f32);

    /// Fill the whole surface
    fn clear(&mut self, color: Color);

    /// Fill an axis-aligned rectangle given its top-left corner
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);

    /// Draw text horizontally centred on `x` with its baseline at `y`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font_px: f32, color: Color);
}
