//! Canvas2D render pipeline.
//!
//! One full repaint per frame: reset the device-pixel transform, clear,
//! apply the camera, paint every shape in scene order (groups recurse), then
//! the in-progress shape, then selection overlays in world space so their
//! screen weight is divided by zoom. No dirty rectangles or layering; the
//! scene sizes this engine targets repaint comfortably in full.

use js_sys::Array;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::camera::{Camera, Point};
use crate::consts::{
    ARROWHEAD_ANGLE, ARROWHEAD_LENGTH, BACKGROUND_FILL, HANDLE_FILL, HANDLE_HALF_SIZE_PX,
    PENCIL_OUTLINE_WIDTH, SELECTION_PADDING, SELECTION_STROKE, TEXT_LINE_HEIGHT,
};
use crate::hit;
use crate::input::{Gesture, UiState};
use crate::outline::{StrokeCache, StrokeOutliner};
use crate::scene::Scene;
use crate::shape::{Bounds, Shape, ShapeKind, StrokeStyle};

/// Decoded images keyed by source URL.
///
/// Image shapes carry only their `src`; the store owns the browser-side
/// `HtmlImageElement` and starts decoding on first sight. Shapes whose image
/// has not finished decoding render as a placeholder until a later frame.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: std::collections::HashMap<String, HtmlImageElement>,
}

impl ImageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The element for `src`, creating it and starting the load on first
    /// request. `None` when the element cannot be created at all.
    pub fn get_or_start(&mut self, src: &str) -> Option<&HtmlImageElement> {
        if !self.images.contains_key(src) {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(src);
                    self.images.insert(src.to_owned(), img);
                }
                Err(_) => return None,
            }
        }
        self.images.get(src)
    }
}

/// Paint the full frame.
///
/// # Errors
///
/// Returns the underlying `JsValue` if a Canvas2D call fails.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    camera: &Camera,
    ui: &UiState,
    gesture: &Gesture,
    strokes: &mut StrokeCache,
    outliner: &dyn StrokeOutliner,
    images: &mut ImageStore,
    viewport_width: f64,
    viewport_height: f64,
    dpr: f64,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str(BACKGROUND_FILL);
    ctx.fill_rect(0.0, 0.0, viewport_width, viewport_height);

    ctx.save();
    ctx.translate(camera.x, camera.y)?;
    ctx.scale(camera.z, camera.z)?;

    for shape in scene.shapes() {
        draw_shape(ctx, shape, strokes, outliner, images)?;
    }
    if let Gesture::Drawing { shape } = gesture {
        draw_shape(ctx, shape, strokes, outliner, images)?;
    }

    draw_selection(ctx, scene, ui, camera.z)?;
    if let Gesture::BoxSelecting { start, current } = gesture {
        draw_marquee(ctx, *start, *current, camera.z)?;
    }

    ctx.restore();
    Ok(())
}

/// Paint one shape (and, for groups, its subtree) in world coordinates.
///
/// Shared with PNG export, which paints onto an offscreen context with a
/// different outer transform.
///
/// # Errors
///
/// Returns the underlying `JsValue` if a Canvas2D call fails.
pub(crate) fn draw_shape(
    ctx: &CanvasRenderingContext2d,
    shape: &Shape,
    strokes: &mut StrokeCache,
    outliner: &dyn StrokeOutliner,
    images: &mut ImageStore,
) -> Result<(), JsValue> {
    ctx.set_stroke_style_str(&shape.stroke_color);
    ctx.set_line_width(shape.stroke_width);
    apply_dash(ctx, shape.stroke_style, shape.stroke_width)?;

    match &shape.kind {
        ShapeKind::Rect { width, height } => {
            ctx.stroke_rect(shape.x, shape.y, *width, *height);
        }
        ShapeKind::Diamond { width, height } => {
            let cx = shape.x + width / 2.0;
            let cy = shape.y + height / 2.0;
            ctx.begin_path();
            ctx.move_to(cx, shape.y);
            ctx.line_to(shape.x + width, cy);
            ctx.line_to(cx, shape.y + height);
            ctx.line_to(shape.x, cy);
            ctx.close_path();
            ctx.stroke();
        }
        ShapeKind::Circle { radius } => {
            ctx.begin_path();
            ctx.arc(shape.x, shape.y, radius.abs(), 0.0, std::f64::consts::TAU)?;
            ctx.stroke();
        }
        ShapeKind::Line { end_x, end_y } => {
            ctx.begin_path();
            ctx.move_to(shape.x, shape.y);
            ctx.line_to(*end_x, *end_y);
            ctx.stroke();
        }
        ShapeKind::Arrow { end_x, end_y } => {
            let angle = (end_y - shape.y).atan2(end_x - shape.x);
            ctx.begin_path();
            ctx.move_to(shape.x, shape.y);
            ctx.line_to(*end_x, *end_y);
            ctx.move_to(*end_x, *end_y);
            ctx.line_to(
                end_x - ARROWHEAD_LENGTH * (angle - ARROWHEAD_ANGLE).cos(),
                end_y - ARROWHEAD_LENGTH * (angle - ARROWHEAD_ANGLE).sin(),
            );
            ctx.move_to(*end_x, *end_y);
            ctx.line_to(
                end_x - ARROWHEAD_LENGTH * (angle + ARROWHEAD_ANGLE).cos(),
                end_y - ARROWHEAD_LENGTH * (angle + ARROWHEAD_ANGLE).sin(),
            );
            ctx.stroke();
        }
        ShapeKind::Pencil { points } => {
            // Default 2px stroke maps to the 10px baseline ink width.
            let ink = shape.stroke_width * PENCIL_OUTLINE_WIDTH / 2.0;
            ctx.set_fill_style_str(&shape.stroke_color);
            let outline = strokes.get_or_compute(shape.id, points, ink, outliner);
            if outline.len() >= 3 {
                ctx.begin_path();
                ctx.move_to(outline[0].x, outline[0].y);
                for p in &outline[1..] {
                    ctx.line_to(p.x, p.y);
                }
                ctx.close_path();
                ctx.fill();
            } else if let Some(p) = points.first() {
                // Single-sample stroke: a dot of the ink radius.
                ctx.begin_path();
                ctx.arc(p.x, p.y, ink / 2.0, 0.0, std::f64::consts::TAU)?;
                ctx.fill();
            }
        }
        ShapeKind::Text { text, font_size, .. } => {
            ctx.set_fill_style_str(&shape.stroke_color);
            ctx.set_font(&format!("{font_size}px sans-serif"));
            ctx.set_text_baseline("top");
            let mut line_y = shape.y;
            for line in text.lines() {
                ctx.fill_text(line, shape.x, line_y)?;
                line_y += font_size * TEXT_LINE_HEIGHT;
            }
        }
        ShapeKind::Image { src, width, height } => {
            match images.get_or_start(src) {
                Some(img) if img.complete() => {
                    ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img, shape.x, shape.y, *width, *height,
                    )?;
                }
                _ => {
                    // Still decoding (or unavailable): dashed placeholder.
                    ctx.set_stroke_style_str("#9ca3af");
                    apply_dash(ctx, StrokeStyle::Dashed, 2.0)?;
                    ctx.stroke_rect(shape.x, shape.y, *width, *height);
                }
            }
        }
        ShapeKind::Group { children, .. } => {
            for child in children {
                draw_shape(ctx, child, strokes, outliner, images)?;
            }
        }
    }
    Ok(())
}

/// Dash pattern for a stroke style, scaled by stroke width so dashes stay
/// proportional to line weight.
fn apply_dash(
    ctx: &CanvasRenderingContext2d,
    style: StrokeStyle,
    width: f64,
) -> Result<(), JsValue> {
    let pattern = match style {
        StrokeStyle::Solid => Array::new(),
        StrokeStyle::Dashed => Array::of2(
            &JsValue::from_f64(width * 4.0),
            &JsValue::from_f64(width * 2.5),
        ),
        StrokeStyle::Dotted => Array::of2(
            &JsValue::from_f64(2.0),
            &JsValue::from_f64(width * 2.5),
        ),
    };
    ctx.set_line_dash(&pattern)
}

/// Padded dashed boxes around every selected shape; resize handles only
/// when the selection is a single shape (a multi-selection has no resize
/// affordance).
fn draw_selection(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    ui: &UiState,
    zoom: f64,
) -> Result<(), JsValue> {
    if ui.selected.is_empty() {
        return Ok(());
    }
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.set_line_dash(&Array::of2(
        &JsValue::from_f64(4.0 / zoom),
        &JsValue::from_f64(4.0 / zoom),
    ))?;

    for id in &ui.selected {
        if let Some(shape) = scene.get(id) {
            let b = shape.bounds().expand(SELECTION_PADDING);
            ctx.stroke_rect(b.min_x, b.min_y, b.width(), b.height());
        }
    }

    if let [id] = ui.selected[..] {
        if let Some(shape) = scene.get(&id) {
            ctx.set_line_dash(&Array::new())?;
            ctx.set_fill_style_str(HANDLE_FILL);
            let half = HANDLE_HALF_SIZE_PX / zoom;
            for (_, pos) in hit::handle_positions(shape) {
                ctx.fill_rect(pos.x - half, pos.y - half, half * 2.0, half * 2.0);
                ctx.stroke_rect(pos.x - half, pos.y - half, half * 2.0, half * 2.0);
            }
        }
    }

    ctx.set_line_dash(&Array::new())
}

/// Rubber-band selection rectangle.
fn draw_marquee(
    ctx: &CanvasRenderingContext2d,
    start: Point,
    current: Point,
    zoom: f64,
) -> Result<(), JsValue> {
    let b = Bounds::from_corners(start, current);
    ctx.set_stroke_style_str(SELECTION_STROKE);
    ctx.set_line_width(1.0 / zoom);
    ctx.set_line_dash(&Array::of2(
        &JsValue::from_f64(4.0 / zoom),
        &JsValue::from_f64(4.0 / zoom),
    ))?;
    ctx.set_fill_style_str("rgba(147, 197, 253, 0.15)");
    ctx.fill_rect(b.min_x, b.min_y, b.width(), b.height());
    ctx.stroke_rect(b.min_x, b.min_y, b.width(), b.height());
    ctx.set_line_dash(&Array::new())
}
