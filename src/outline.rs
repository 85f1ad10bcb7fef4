//! Stroke smoothing seam and the per-shape outline cache.
//!
//! Pencil shapes are not stroked as raw polylines; their sample points are
//! handed to a [`StrokeOutliner`] service that returns a closed outline
//! polygon approximating smooth ink, which the render pipeline fills. The
//! service is a seam: hosts may inject their own smoother, and the crate
//! ships [`ChaikinOutliner`] as the default.
//!
//! Outlines are cached per shape id and recomputed only after an explicit
//! [`StrokeCache::invalidate`] at the mutation site (drag, resize, point
//! append), never by key expiry.

#[cfg(test)]
#[path = "outline_test.rs"]
mod outline_test;

use std::collections::HashMap;

use crate::camera::Point;
use crate::shape::ShapeId;

/// Converts a raw pointer-sample polyline into a closed outline polygon.
pub trait StrokeOutliner {
    /// Outline `points` as ink of the given width. Fewer than two points
    /// yields an empty polygon.
    fn outline(&self, points: &[Point], width: f64) -> Vec<Point>;
}

/// Default smoother: Chaikin corner-cutting passes over the polyline, then
/// a constant half-width offset on both sides to close the polygon.
#[derive(Debug, Clone, Copy)]
pub struct ChaikinOutliner {
    /// Number of corner-cutting passes.
    pub passes: usize,
}

impl Default for ChaikinOutliner {
    fn default() -> Self {
        Self { passes: 2 }
    }
}

impl StrokeOutliner for ChaikinOutliner {
    fn outline(&self, points: &[Point], width: f64) -> Vec<Point> {
        if points.len() < 2 {
            return Vec::new();
        }
        let smoothed = chaikin(points, self.passes);
        offset_polygon(&smoothed, width / 2.0)
    }
}

/// One Chaikin pass replaces each interior vertex with points a quarter of
/// the way along its adjacent segments; endpoints are kept.
fn chaikin(points: &[Point], passes: usize) -> Vec<Point> {
    let mut current: Vec<Point> = points.to_vec();
    for _ in 0..passes {
        if current.len() < 3 {
            break;
        }
        let mut next = Vec::with_capacity(current.len() * 2);
        next.push(current[0]);
        for pair in current.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            next.push(Point::new(
                a.x * 0.75 + b.x * 0.25,
                a.y * 0.75 + b.y * 0.25,
            ));
            next.push(Point::new(
                a.x * 0.25 + b.x * 0.75,
                a.y * 0.25 + b.y * 0.75,
            ));
        }
        next.push(current[current.len() - 1]);
        current = next;
    }
    current
}

/// Offset the polyline by `half` on each side using averaged segment
/// normals; the left side forward plus the right side reversed closes the
/// outline.
fn offset_polygon(points: &[Point], half: f64) -> Vec<Point> {
    let normals: Vec<Point> = (0..points.len())
        .map(|i| vertex_normal(points, i))
        .collect();

    let mut outline = Vec::with_capacity(points.len() * 2);
    for (p, n) in points.iter().zip(&normals) {
        outline.push(Point::new(p.x + n.x * half, p.y + n.y * half));
    }
    for (p, n) in points.iter().zip(&normals).rev() {
        outline.push(Point::new(p.x - n.x * half, p.y - n.y * half));
    }
    outline
}

/// Unit normal at vertex `i`, averaging the normals of its adjacent
/// segments. Degenerate (zero-length) neighborhoods fall back to a fixed
/// axis so the outline stays finite.
fn vertex_normal(points: &[Point], i: usize) -> Point {
    let prev = if i == 0 { points[0] } else { points[i - 1] };
    let next = if i + 1 == points.len() { points[i] } else { points[i + 1] };
    let dx = next.x - prev.x;
    let dy = next.y - prev.y;
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        Point::new(0.0, -1.0)
    } else {
        Point::new(-dy / len, dx / len)
    }
}

/// Cache of computed outlines, keyed by shape id.
#[derive(Debug, Default)]
pub struct StrokeCache {
    outlines: HashMap<ShapeId, Vec<Point>>,
}

impl StrokeCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the cached outline for a shape whose points changed.
    pub fn invalidate(&mut self, id: &ShapeId) {
        self.outlines.remove(id);
    }

    /// Drop every cached outline (scene replaced wholesale).
    pub fn clear(&mut self) {
        self.outlines.clear();
    }

    /// The cached outline for `id`, computing it through `outliner` on miss.
    pub fn get_or_compute(
        &mut self,
        id: ShapeId,
        points: &[Point],
        width: f64,
        outliner: &dyn StrokeOutliner,
    ) -> &[Point] {
        self.outlines
            .entry(id)
            .or_insert_with(|| outliner.outline(points, width))
    }

    /// Whether an outline is currently cached for `id`.
    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.outlines.contains_key(id)
    }
}
