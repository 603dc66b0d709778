//! Canvas rendering module
//!
//! The draw pass only needs three primitives, so any backend implementing
//! [`Canvas`] can host the games: the browser 2D context in `web`, or the
//! command recorder used by the native runner and the tests.

pub mod draw;
pub mod recording;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use draw::{Hud, render};
pub use recording::{DrawCommand, RecordingCanvas};
#[cfg(target_arch = "wasm32")]
pub use web::WebCanvas;

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// CSS `textAlign` keyword
    pub fn as_css(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Minimal drawing surface
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: &str);

    /// Fill an axis-aligned rectangle (top-left origin)
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);

    /// Draw a line of text with its baseline at `y`
    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign);
}
