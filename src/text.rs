//! Text metrics seam.
//!
//! Text shapes derive their pixel `width`/`height` from font metrics, but
//! real metrics only exist where a canvas context does. The engine core
//! talks to a [`TextMeasurer`] trait instead: the browser wrapper backs it
//! with `ctx.measure_text`, and [`HeuristicTextMeasurer`] approximates glyph
//! advance everywhere else (including native tests).

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use web_sys::CanvasRenderingContext2d;

use crate::consts::TEXT_LINE_HEIGHT;

/// Measures a single line of text at a given font size.
pub trait TextMeasurer {
    /// Width of `line` in world units when set at `font_size`.
    fn line_width(&self, line: &str, font_size: f64) -> f64;
}

/// Metrics-free approximation: average glyph advance of 0.6 em.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn line_width(&self, line: &str, font_size: f64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let chars = line.chars().count() as f64;
        chars * font_size * 0.6
    }
}

/// Real glyph metrics through a canvas 2D context. Falls back to the
/// heuristic if the context rejects a measurement.
#[derive(Debug, Clone)]
pub struct CanvasTextMeasurer {
    ctx: CanvasRenderingContext2d,
}

impl CanvasTextMeasurer {
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }
}

impl TextMeasurer for CanvasTextMeasurer {
    fn line_width(&self, line: &str, font_size: f64) -> f64 {
        self.ctx.set_font(&format!("{font_size}px sans-serif"));
        match self.ctx.measure_text(line) {
            Ok(metrics) => metrics.width(),
            Err(_) => HeuristicTextMeasurer.line_width(line, font_size),
        }
    }
}

/// Width and height of a (possibly multi-line) text block at `font_size`:
/// the widest line by the measurer, and line count times the line height.
#[must_use]
pub fn measure_block(measurer: &dyn TextMeasurer, text: &str, font_size: f64) -> (f64, f64) {
    let mut width = 0.0_f64;
    let mut lines = 0_usize;
    for line in text.lines() {
        width = width.max(measurer.line_width(line, font_size));
        lines += 1;
    }
    let lines = lines.max(1);
    #[allow(clippy::cast_precision_loss)]
    let height = lines as f64 * font_size * TEXT_LINE_HEIGHT;
    (width, height)
}
