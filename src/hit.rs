//! Hit-testing against shapes and resize-handle targeting.
//!
//! `shape_at` walks the top-level list back-to-front so the topmost shape
//! under the pointer wins. `handle_at` tests a selected shape's handle
//! squares first, then (for box-like shapes) falls back to proximity against
//! the padded selection border so a near-miss on a thin edge still starts a
//! resize. Both tolerances are screen-space sizes divided by zoom, so the
//! targets feel constant on screen at any zoom level.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::consts::{BORDER_HIT_PX, HANDLE_HIT_PX, SEGMENT_HIT_THRESHOLD, SELECTION_PADDING};
use crate::shape::{Shape, ShapeKind};

/// A named resize handle on a selected shape.
///
/// Box-like shapes expose all eight compass handles; circles the four
/// cardinal ones; pencil strokes the four corners; lines and arrows their
/// two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Nw,
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Start,
    End,
}

impl Handle {
    /// CSS cursor name shown while hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
            Self::Start | Self::End => "crosshair",
        }
    }

    /// Whether dragging this handle moves the left edge of a box.
    #[must_use]
    pub fn moves_left(self) -> bool {
        matches!(self, Self::Nw | Self::W | Self::Sw)
    }

    /// Whether dragging this handle moves the right edge of a box.
    #[must_use]
    pub fn moves_right(self) -> bool {
        matches!(self, Self::Ne | Self::E | Self::Se)
    }

    /// Whether dragging this handle moves the top edge of a box.
    #[must_use]
    pub fn moves_top(self) -> bool {
        matches!(self, Self::Nw | Self::N | Self::Ne)
    }

    /// Whether dragging this handle moves the bottom edge of a box.
    #[must_use]
    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::Sw | Self::S | Self::Se)
    }
}

/// Topmost shape whose geometry contains `world_pt`, if any.
#[must_use]
pub fn shape_at<'a>(shapes: &'a [Shape], world_pt: Point) -> Option<&'a Shape> {
    shapes.iter().rev().find(|s| shape_contains(s, world_pt))
}

/// Whether a single shape's geometry contains `p`.
#[must_use]
pub fn shape_contains(shape: &Shape, p: Point) -> bool {
    match &shape.kind {
        ShapeKind::Rect { .. }
        | ShapeKind::Text { .. }
        | ShapeKind::Image { .. }
        | ShapeKind::Group { .. } => shape.bounds().contains(p),
        ShapeKind::Diamond { width, height } => {
            let hw = (width / 2.0).abs();
            let hh = (height / 2.0).abs();
            if hw <= 0.0 || hh <= 0.0 {
                return false;
            }
            let cx = shape.x + width / 2.0;
            let cy = shape.y + height / 2.0;
            (p.x - cx).abs() / hw + (p.y - cy).abs() / hh <= 1.0
        }
        ShapeKind::Circle { radius } => {
            let dx = p.x - shape.x;
            let dy = p.y - shape.y;
            (dx * dx + dy * dy).sqrt() <= *radius
        }
        ShapeKind::Line { end_x, end_y } | ShapeKind::Arrow { end_x, end_y } => {
            distance_to_segment(
                p,
                Point::new(shape.x, shape.y),
                Point::new(*end_x, *end_y),
            ) <= SEGMENT_HIT_THRESHOLD
        }
        ShapeKind::Pencil { points } => points.windows(2).any(|pair| {
            distance_to_segment(p, pair[0], pair[1]) <= SEGMENT_HIT_THRESHOLD
        }),
    }
}

/// Perpendicular distance from `p` to the segment `a`→`b`, clamped to the
/// segment's extent.
#[must_use]
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let cx = b.x - a.x;
    let cy = b.y - a.y;
    let len_sq = cx * cx + cy * cy;

    let t = if len_sq == 0.0 {
        -1.0
    } else {
        ((p.x - a.x) * cx + (p.y - a.y) * cy) / len_sq
    };

    let (nx, ny) = if t < 0.0 {
        (a.x, a.y)
    } else if t > 1.0 {
        (b.x, b.y)
    } else {
        (a.x + t * cx, a.y + t * cy)
    };

    let dx = p.x - nx;
    let dy = p.y - ny;
    (dx * dx + dy * dy).sqrt()
}

/// The shape's handles with their world positions, in a fixed order.
#[must_use]
pub fn handle_positions(shape: &Shape) -> Vec<(Handle, Point)> {
    let b = shape.bounds();
    let mx = (b.min_x + b.max_x) / 2.0;
    let my = (b.min_y + b.max_y) / 2.0;

    match &shape.kind {
        ShapeKind::Rect { .. }
        | ShapeKind::Diamond { .. }
        | ShapeKind::Text { .. }
        | ShapeKind::Image { .. }
        | ShapeKind::Group { .. } => vec![
            (Handle::Nw, Point::new(b.min_x, b.min_y)),
            (Handle::N, Point::new(mx, b.min_y)),
            (Handle::Ne, Point::new(b.max_x, b.min_y)),
            (Handle::E, Point::new(b.max_x, my)),
            (Handle::Se, Point::new(b.max_x, b.max_y)),
            (Handle::S, Point::new(mx, b.max_y)),
            (Handle::Sw, Point::new(b.min_x, b.max_y)),
            (Handle::W, Point::new(b.min_x, my)),
        ],
        ShapeKind::Circle { radius } => vec![
            (Handle::N, Point::new(shape.x, shape.y - radius)),
            (Handle::E, Point::new(shape.x + radius, shape.y)),
            (Handle::S, Point::new(shape.x, shape.y + radius)),
            (Handle::W, Point::new(shape.x - radius, shape.y)),
        ],
        ShapeKind::Line { end_x, end_y } | ShapeKind::Arrow { end_x, end_y } => vec![
            (Handle::Start, Point::new(shape.x, shape.y)),
            (Handle::End, Point::new(*end_x, *end_y)),
        ],
        ShapeKind::Pencil { .. } => vec![
            (Handle::Nw, Point::new(b.min_x, b.min_y)),
            (Handle::Ne, Point::new(b.max_x, b.min_y)),
            (Handle::Se, Point::new(b.max_x, b.max_y)),
            (Handle::Sw, Point::new(b.min_x, b.max_y)),
        ],
    }
}

/// The handle under `world_pt` for a selected shape, if any.
///
/// Handle squares are tested first within `HANDLE_HIT_PX / zoom`; box-like
/// shapes then get a wider `BORDER_HIT_PX / zoom` test against the padded
/// selection border (corners before edges). Lines and arrows have endpoint
/// handles only, with no border fallback.
#[must_use]
pub fn handle_at(shape: &Shape, world_pt: Point, zoom: f64) -> Option<Handle> {
    let hit = HANDLE_HIT_PX / zoom;
    for (handle, pos) in handle_positions(shape) {
        if (world_pt.x - pos.x).abs() <= hit && (world_pt.y - pos.y).abs() <= hit {
            return Some(handle);
        }
    }

    if matches!(shape.kind, ShapeKind::Line { .. } | ShapeKind::Arrow { .. }) {
        return None;
    }

    let b = shape.bounds().expand(SELECTION_PADDING);
    let edge = BORDER_HIT_PX / zoom;
    let near_l = (world_pt.x - b.min_x).abs() <= edge;
    let near_r = (world_pt.x - b.max_x).abs() <= edge;
    let near_t = (world_pt.y - b.min_y).abs() <= edge;
    let near_b = (world_pt.y - b.max_y).abs() <= edge;
    let in_x = world_pt.x >= b.min_x - edge && world_pt.x <= b.max_x + edge;
    let in_y = world_pt.y >= b.min_y - edge && world_pt.y <= b.max_y + edge;

    // Corners win over edges.
    if near_t && near_l {
        return Some(Handle::Nw);
    }
    if near_t && near_r {
        return Some(Handle::Ne);
    }
    if near_b && near_l {
        return Some(Handle::Sw);
    }
    if near_b && near_r {
        return Some(Handle::Se);
    }
    if near_t && in_x {
        return Some(Handle::N);
    }
    if near_b && in_x {
        return Some(Handle::S);
    }
    if near_l && in_y {
        return Some(Handle::W);
    }
    if near_r && in_y {
        return Some(Handle::E);
    }

    None
}
