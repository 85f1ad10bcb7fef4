//! Resize and scale transforms.
//!
//! Every resize recomputes from the deep copy of the shape captured at
//! gesture start (`original`), so the edges opposite the dragged handle stay
//! pinned to their start-of-gesture values: anchor-preserving resize with
//! no incremental drift. Group resize derives one `(scale_x, scale_y)` pair
//! and applies it depth-first to every descendant relative to the group's
//! original top-left.

#[cfg(test)]
#[path = "transform_test.rs"]
mod transform_test;

use crate::camera::Point;
use crate::hit::Handle;
use crate::shape::{Shape, ShapeKind};
use crate::text::{TextMeasurer, measure_block};

/// Resize `shape` so the dragged `handle` follows the pointer at `p`,
/// recomputing from `original` (the shape as it was at gesture start).
///
/// Handles that a variant does not expose are ignored (e.g. an edge handle
/// reported by the border fallback on a pencil stroke).
pub fn resize(
    shape: &mut Shape,
    original: &Shape,
    handle: Handle,
    p: Point,
    measurer: &dyn TextMeasurer,
) {
    match &original.kind {
        ShapeKind::Rect { .. } | ShapeKind::Diamond { .. } | ShapeKind::Image { .. } => {
            let (b, _, _) = scaled_bounds(&original.bounds(), handle, p);
            shape.x = b.0;
            shape.y = b.1;
            set_box_size(shape, b.2, b.3);
        }
        ShapeKind::Circle { .. } => {
            let radius = match handle {
                Handle::E | Handle::W => (p.x - original.x).abs(),
                Handle::N | Handle::S => (p.y - original.y).abs(),
                _ => return,
            };
            if let ShapeKind::Circle { radius: r } = &mut shape.kind {
                *r = radius;
            }
        }
        ShapeKind::Line { .. } | ShapeKind::Arrow { .. } => match handle {
            Handle::Start => {
                shape.x = p.x;
                shape.y = p.y;
            }
            Handle::End => {
                if let ShapeKind::Line { end_x, end_y } | ShapeKind::Arrow { end_x, end_y } =
                    &mut shape.kind
                {
                    *end_x = p.x;
                    *end_y = p.y;
                }
            }
            _ => {}
        },
        ShapeKind::Pencil { points: orig_points } => {
            // Corner handles only; remap every sample by independent X/Y
            // scale factors anchored at the opposite corner.
            if !matches!(handle, Handle::Nw | Handle::Ne | Handle::Se | Handle::Sw) {
                return;
            }
            let ob = original.bounds();
            let (nb, sx, sy) = scaled_bounds(&ob, handle, p);
            if let ShapeKind::Pencil { points } = &mut shape.kind {
                *points = orig_points
                    .iter()
                    .map(|pt| Point {
                        x: nb.0 + (pt.x - ob.min_x) * sx,
                        y: nb.1 + (pt.y - ob.min_y) * sy,
                    })
                    .collect();
            }
            shape.x = nb.0;
            shape.y = nb.1;
        }
        ShapeKind::Text { font_size, .. } => {
            resize_text(shape, original, *font_size, handle, p, measurer);
        }
        ShapeKind::Group { .. } => {
            let (b, sx, sy) = scaled_bounds(&original.bounds(), handle, p);
            *shape = original.clone();
            scale_into(shape, original, b.0, b.1, sx, sy, measurer);
        }
    }
}

/// New box `(x, y, w, h)` plus per-axis scale factors after moving `handle`
/// to `p`, starting from normalized bounds `ob`.
fn scaled_bounds(
    ob: &crate::shape::Bounds,
    handle: Handle,
    p: Point,
) -> ((f64, f64, f64, f64), f64, f64) {
    let mut min_x = ob.min_x;
    let mut min_y = ob.min_y;
    let mut max_x = ob.max_x;
    let mut max_y = ob.max_y;
    if handle.moves_left() {
        min_x = p.x;
    }
    if handle.moves_right() {
        max_x = p.x;
    }
    if handle.moves_top() {
        min_y = p.y;
    }
    if handle.moves_bottom() {
        max_y = p.y;
    }
    let sx = if ob.width() > 0.0 { (max_x - min_x) / ob.width() } else { 1.0 };
    let sy = if ob.height() > 0.0 { (max_y - min_y) / ob.height() } else { 1.0 };
    ((min_x, min_y, max_x - min_x, max_y - min_y), sx, sy)
}

fn set_box_size(shape: &mut Shape, w: f64, h: f64) {
    match &mut shape.kind {
        ShapeKind::Rect { width, height }
        | ShapeKind::Diamond { width, height }
        | ShapeKind::Image { width, height, .. }
        | ShapeKind::Group { width, height, .. }
        | ShapeKind::Text { width, height, .. } => {
            *width = w;
            *height = h;
        }
        _ => {}
    }
}

/// Text resize: rescale the font by the dominant axis, re-derive the pixel
/// box from metrics at the new size, then anchor the box so the edges
/// opposite the dragged handle stay fixed (growth goes toward the handle).
fn resize_text(
    shape: &mut Shape,
    original: &Shape,
    orig_font: f64,
    handle: Handle,
    p: Point,
    measurer: &dyn TextMeasurer,
) {
    let ob = original.bounds();
    let (_, sx, sy) = scaled_bounds(&ob, handle, p);
    let dominant = if sx.abs() >= sy.abs() { sx.abs() } else { sy.abs() };
    let new_font = (orig_font * dominant).max(1.0);

    let ShapeKind::Text { text, .. } = &original.kind else {
        return;
    };
    let (w, h) = measure_block(measurer, text, new_font);

    let x = if handle.moves_left() { ob.max_x - w } else { ob.min_x };
    let y = if handle.moves_top() { ob.max_y - h } else { ob.min_y };
    shape.x = x;
    shape.y = y;
    if let ShapeKind::Text { font_size, width, height, .. } = &mut shape.kind {
        *font_size = new_font;
        *width = w;
        *height = h;
    }
}

/// Depth-first affine rescale of a group subtree.
///
/// `shape` starts as a copy of `original`; every descendant position is
/// remapped from its original offset against the group's original top-left
/// `(original.x, original.y)` into `(nx, ny)` plus the scaled offset.
fn scale_into(
    shape: &mut Shape,
    original: &Shape,
    nx: f64,
    ny: f64,
    sx: f64,
    sy: f64,
    measurer: &dyn TextMeasurer,
) {
    let ox = original.x;
    let oy = original.y;
    shape.x = nx;
    shape.y = ny;
    set_box_size(
        shape,
        width_of(original) * sx,
        height_of(original) * sy,
    );

    if let (
        ShapeKind::Group { children, .. },
        ShapeKind::Group { children: orig_children, .. },
    ) = (&mut shape.kind, &original.kind)
    {
        for (child, orig_child) in children.iter_mut().zip(orig_children) {
            let np = Point {
                x: nx + (orig_child.x - ox) * sx,
                y: ny + (orig_child.y - oy) * sy,
            };
            scale_child(child, orig_child, np, nx, ny, ox, oy, sx, sy, measurer);
        }
    }
}

/// Rescale one descendant in place. `(np)` is its remapped anchor; the
/// `(ox, oy)` → `(nx, ny)` frame is the root group's, shared by the whole
/// subtree so nested groups land on the same affine map.
#[allow(clippy::too_many_arguments)]
fn scale_child(
    child: &mut Shape,
    orig: &Shape,
    np: Point,
    nx: f64,
    ny: f64,
    ox: f64,
    oy: f64,
    sx: f64,
    sy: f64,
    measurer: &dyn TextMeasurer,
) {
    let remap = |pt: Point| Point {
        x: nx + (pt.x - ox) * sx,
        y: ny + (pt.y - oy) * sy,
    };
    let dominant = if sx.abs() >= sy.abs() { sx.abs() } else { sy.abs() };

    child.x = np.x;
    child.y = np.y;
    match (&mut child.kind, &orig.kind) {
        (
            ShapeKind::Rect { width, height } | ShapeKind::Diamond { width, height },
            ShapeKind::Rect { width: ow, height: oh } | ShapeKind::Diamond { width: ow, height: oh },
        )
        | (
            ShapeKind::Image { width, height, .. },
            ShapeKind::Image { width: ow, height: oh, .. },
        ) => {
            *width = ow * sx;
            *height = oh * sy;
        }
        (ShapeKind::Circle { radius }, ShapeKind::Circle { radius: or }) => {
            *radius = or * dominant;
        }
        (
            ShapeKind::Line { end_x, end_y } | ShapeKind::Arrow { end_x, end_y },
            ShapeKind::Line { end_x: oex, end_y: oey } | ShapeKind::Arrow { end_x: oex, end_y: oey },
        ) => {
            let e = remap(Point::new(*oex, *oey));
            *end_x = e.x;
            *end_y = e.y;
        }
        (ShapeKind::Pencil { points }, ShapeKind::Pencil { points: orig_points }) => {
            *points = orig_points.iter().map(|&pt| remap(pt)).collect();
        }
        (
            ShapeKind::Text { font_size, width, height, .. },
            ShapeKind::Text { text, font_size: of, .. },
        ) => {
            let nf = (of * dominant).max(1.0);
            let (w, h) = measure_block(measurer, text, nf);
            *font_size = nf;
            *width = w;
            *height = h;
        }
        (
            ShapeKind::Group { width, height, children },
            ShapeKind::Group { width: ow, height: oh, children: orig_children },
        ) => {
            *width = ow * sx;
            *height = oh * sy;
            for (grandchild, orig_grandchild) in children.iter_mut().zip(orig_children) {
                let gp = remap(Point::new(orig_grandchild.x, orig_grandchild.y));
                scale_child(grandchild, orig_grandchild, gp, nx, ny, ox, oy, sx, sy, measurer);
            }
        }
        _ => {}
    }
}

fn width_of(shape: &Shape) -> f64 {
    match &shape.kind {
        ShapeKind::Rect { width, .. }
        | ShapeKind::Diamond { width, .. }
        | ShapeKind::Image { width, .. }
        | ShapeKind::Text { width, .. }
        | ShapeKind::Group { width, .. } => *width,
        _ => shape.bounds().width(),
    }
}

fn height_of(shape: &Shape) -> f64 {
    match &shape.kind {
        ShapeKind::Rect { height, .. }
        | ShapeKind::Diamond { height, .. }
        | ShapeKind::Image { height, .. }
        | ShapeKind::Text { height, .. }
        | ShapeKind::Group { height, .. } => *height,
        _ => shape.bounds().height(),
    }
}
