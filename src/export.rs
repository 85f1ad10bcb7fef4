//! PNG export through an offscreen canvas.
//!
//! The export surface is sized to the scene's union bounding box plus a
//! fixed margin, supersampled for crispness, and painted with the same
//! per-shape routine as the live canvas. The result is a data URL plus a
//! timestamped filename for the host's download anchor.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlCanvasElement;

use crate::consts::{BACKGROUND_FILL, EXPORT_PADDING, EXPORT_SCALE};
use crate::error::{EngineError, EngineResult};
use crate::outline::{StrokeCache, StrokeOutliner};
use crate::render::{self, ImageStore};
use crate::scene::Scene;

/// Render the scene to a PNG, returning `(data_url, filename)`.
///
/// # Errors
///
/// Returns [`EngineError::Render`] when the scene is empty (nothing to
/// export) or the offscreen surface cannot be created or encoded.
pub fn export_png(
    scene: &Scene,
    strokes: &mut StrokeCache,
    outliner: &dyn StrokeOutliner,
    images: &mut ImageStore,
) -> EngineResult<(String, String)> {
    let Some(bounds) = scene.bounds() else {
        return Err(EngineError::Render("nothing to export".to_owned()));
    };

    let width = (bounds.width() + EXPORT_PADDING * 2.0) * EXPORT_SCALE;
    let height = (bounds.height() + EXPORT_PADDING * 2.0) * EXPORT_SCALE;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| EngineError::Render("no document".to_owned()))?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| EngineError::Render("not a canvas element".to_owned()))?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        canvas.set_width(width.ceil().max(1.0) as u32);
        canvas.set_height(height.ceil().max(1.0) as u32);
    }

    let ctx = canvas
        .get_context("2d")
        .map_err(js_err)?
        .ok_or(EngineError::NoContext)?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| EngineError::NoContext)?;

    ctx.set_fill_style_str(BACKGROUND_FILL);
    ctx.fill_rect(0.0, 0.0, width, height);
    ctx.scale(EXPORT_SCALE, EXPORT_SCALE).map_err(js_err)?;
    ctx.translate(EXPORT_PADDING - bounds.min_x, EXPORT_PADDING - bounds.min_y)
        .map_err(js_err)?;

    for shape in scene.shapes() {
        render::draw_shape(&ctx, shape, strokes, outliner, images).map_err(js_err)?;
    }

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(js_err)?;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let stamp = js_sys::Date::now() as u64;
    Ok((data_url, format!("slateboard-{stamp}.png")))
}

fn js_err(e: JsValue) -> EngineError {
    EngineError::Render(format!("{e:?}"))
}
