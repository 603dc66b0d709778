//! Browser 2D context backend

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Canvas, TextAlign};
use crate::consts::{COURT_HEIGHT, COURT_WIDTH};
use crate::error::{HostError, Result};

/// A `<canvas>` sized to the court, drawn through its 2D context
pub struct WebCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl WebCanvas {
    /// Look up `#id`, size it to the court and grab its 2D context
    pub fn from_element_id(id: &str) -> Result<Self> {
        let document = web_sys::window()
            .ok_or(HostError::NoWindow)?
            .document()
            .ok_or(HostError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(id)
            .ok_or_else(|| HostError::MissingCanvas(id.to_string()))?
            .dyn_into()
            .map_err(|_| HostError::NotACanvas(id.to_string()))?;

        // Court pixels map 1:1 to backing pixels; CSS handles scaling
        canvas.set_width(COURT_WIDTH as u32);
        canvas.set_height(COURT_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or(HostError::NoContext2d)?
            .dyn_into()
            .map_err(|_| HostError::NoContext2d)?;
        ctx.set_image_smoothing_enabled(false);

        Ok(Self { canvas, ctx })
    }

    pub fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Canvas for WebCanvas {
    fn clear(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(font);
        self.ctx.set_text_align(align.as_css());
        if let Err(e) = self.ctx.fill_text(text, x as f64, y as f64) {
            log::warn!("fill_text failed: {e:?}");
        }
    }
}
