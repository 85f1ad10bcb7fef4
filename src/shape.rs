//! Shape model: the tagged shape union and per-variant geometry helpers.
//!
//! Shapes are a closed sum type: a struct of fields common to every variant
//! (`id`, anchor position, stroke styling) plus a [`ShapeKind`] payload that
//! carries variant-specific geometry. The serialized form is flat JSON with a
//! `type` tag and camelCase field names, which is also the persisted and
//! import/export schema.
//!
//! Groups own their children exclusively: a shape is either top-level in the
//! scene or a descendant of exactly one group, never both.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// Mint a fresh shape id.
#[must_use]
pub fn new_id() -> ShapeId {
    Uuid::new_v4()
}

/// Stroke dash style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Continuous stroke (the migration default for legacy documents).
    #[default]
    Solid,
    /// Long dashes scaled by stroke width.
    Dashed,
    /// Short dots scaled by stroke width.
    Dotted,
}

/// Variant-specific shape geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle; `width`/`height` may be negative mid-drag.
    Rect { width: f64, height: f64 },
    /// Rhombus with vertices at the bounding-box edge midpoints.
    Diamond { width: f64, height: f64 },
    /// Circle centered on the shape anchor.
    Circle { radius: f64 },
    /// Straight segment from the anchor to `(end_x, end_y)`.
    Line { end_x: f64, end_y: f64 },
    /// Directed segment with an arrowhead at `(end_x, end_y)`.
    Arrow { end_x: f64, end_y: f64 },
    /// Freehand stroke as ordered pointer samples in world space.
    Pencil { points: Vec<Point> },
    /// Text block; `width`/`height` are derived from font metrics.
    Text {
        text: String,
        font_size: f64,
        width: f64,
        height: f64,
    },
    /// Raster image referenced by `src`; decoded pixels are owned by the
    /// browser-side image store, not the shape.
    Image { src: String, width: f64, height: f64 },
    /// Container owning child shapes; `width`/`height` are the union box of
    /// the children at grouping time, kept in sync by affine rescale.
    Group {
        width: f64,
        height: f64,
        children: Vec<Shape>,
    },
}

/// A shape as stored in the scene and on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// Unique, immutable identifier.
    pub id: ShapeId,
    /// Anchor x in world coordinates (top-left for boxes, center for
    /// circles, segment start for lines/arrows).
    pub x: f64,
    /// Anchor y in world coordinates.
    pub y: f64,
    /// Stroke color as a CSS color string.
    pub stroke_color: String,
    /// Stroke width in world units.
    pub stroke_width: f64,
    /// Dash style; legacy documents without this field load as `Solid`.
    #[serde(default)]
    pub stroke_style: StrokeStyle,
    /// Variant geometry.
    #[serde(flatten)]
    pub kind: ShapeKind,
}

/// Axis-aligned bounding box in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self { min_x, min_y, max_x, max_y }
    }

    /// Normalized box from two opposite corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    #[must_use]
    pub fn intersects(&self, other: &Bounds) -> bool {
        self.min_x <= other.max_x
            && self.max_x >= other.min_x
            && self.min_y <= other.max_y
            && self.max_y >= other.min_y
    }

    /// Smallest box covering both boxes.
    #[must_use]
    pub fn union(&self, other: &Bounds) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Box grown by `pad` on every side.
    #[must_use]
    pub fn expand(&self, pad: f64) -> Self {
        Self {
            min_x: self.min_x - pad,
            min_y: self.min_y - pad,
            max_x: self.max_x + pad,
            max_y: self.max_y + pad,
        }
    }
}

impl Shape {
    /// Axis-aligned bounding box of this shape's geometry.
    ///
    /// Each variant uses its own geometry: segment extremes for lines and
    /// pencil strokes, center ± radius for circles, the stored box for
    /// groups. Non-finite fields are folded in as-is.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        match &self.kind {
            ShapeKind::Rect { width, height }
            | ShapeKind::Diamond { width, height }
            | ShapeKind::Group { width, height, .. }
            | ShapeKind::Text { width, height, .. }
            | ShapeKind::Image { width, height, .. } => Bounds::from_corners(
                Point::new(self.x, self.y),
                Point::new(self.x + width, self.y + height),
            ),
            ShapeKind::Circle { radius } => Bounds::new(
                self.x - radius,
                self.y - radius,
                self.x + radius,
                self.y + radius,
            ),
            ShapeKind::Line { end_x, end_y } | ShapeKind::Arrow { end_x, end_y } => {
                Bounds::from_corners(Point::new(self.x, self.y), Point::new(*end_x, *end_y))
            }
            ShapeKind::Pencil { points } => {
                let mut b = Bounds::new(self.x, self.y, self.x, self.y);
                for p in points {
                    b.min_x = b.min_x.min(p.x);
                    b.min_y = b.min_y.min(p.y);
                    b.max_x = b.max_x.max(p.x);
                    b.max_y = b.max_y.max(p.y);
                }
                b
            }
        }
    }

    /// Translate the shape (and every endpoint, sample point, and group
    /// descendant) by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
        match &mut self.kind {
            ShapeKind::Line { end_x, end_y } | ShapeKind::Arrow { end_x, end_y } => {
                *end_x += dx;
                *end_y += dy;
            }
            ShapeKind::Pencil { points } => {
                for p in points.iter_mut() {
                    p.x += dx;
                    p.y += dy;
                }
            }
            ShapeKind::Group { children, .. } => {
                for child in children.iter_mut() {
                    child.translate(dx, dy);
                }
            }
            _ => {}
        }
    }

    /// Whether this shape is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ShapeKind::Group { .. })
    }

    /// Collect the ids of every pencil shape in this subtree (used to
    /// invalidate cached stroke outlines after a transform).
    pub fn collect_pencil_ids(&self, out: &mut Vec<ShapeId>) {
        match &self.kind {
            ShapeKind::Pencil { .. } => out.push(self.id),
            ShapeKind::Group { children, .. } => {
                for child in children {
                    child.collect_pencil_ids(out);
                }
            }
            _ => {}
        }
    }
}
