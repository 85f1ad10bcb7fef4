#![allow(clippy::clone_on_copy, clippy::float_cmp)]

use super::*;
use std::cell::Cell;

use crate::shape::new_id;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// --- ChaikinOutliner ---

#[test]
fn fewer_than_two_points_yield_nothing() {
    let outliner = ChaikinOutliner::default();
    assert!(outliner.outline(&[], 4.0).is_empty());
    assert!(outliner.outline(&[Point::new(1.0, 1.0)], 4.0).is_empty());
}

#[test]
fn straight_segment_outlines_to_a_band() {
    let outliner = ChaikinOutliner::default();
    let outline = outliner.outline(&[Point::new(0.0, 0.0), Point::new(10.0, 0.0)], 4.0);
    assert_eq!(outline.len(), 4);
    assert!(approx(outline[0].y, 2.0));
    assert!(approx(outline[1].y, 2.0));
    assert!(approx(outline[2].y, -2.0));
    assert!(approx(outline[3].y, -2.0));
}

#[test]
fn outline_has_two_points_per_smoothed_vertex() {
    let outliner = ChaikinOutliner { passes: 0 };
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(20.0, 0.0),
    ];
    let outline = outliner.outline(&points, 4.0);
    assert_eq!(outline.len(), 6);
}

#[test]
fn smoothing_passes_add_vertices() {
    let points = vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(20.0, 0.0),
    ];
    let flat = ChaikinOutliner { passes: 0 }.outline(&points, 4.0);
    let smoothed = ChaikinOutliner { passes: 2 }.outline(&points, 4.0);
    assert!(smoothed.len() > flat.len());
}

#[test]
fn outline_is_always_finite() {
    // Repeated points produce zero-length neighborhoods.
    let points = vec![
        Point::new(5.0, 5.0),
        Point::new(5.0, 5.0),
        Point::new(5.0, 5.0),
    ];
    let outline = ChaikinOutliner::default().outline(&points, 4.0);
    assert!(outline.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
}

// --- StrokeCache ---

/// Counts outline computations to observe cache hits.
struct CountingOutliner {
    calls: Cell<usize>,
}

impl StrokeOutliner for CountingOutliner {
    fn outline(&self, points: &[Point], _width: f64) -> Vec<Point> {
        self.calls.set(self.calls.get() + 1);
        points.to_vec()
    }
}

#[test]
fn cache_computes_once_per_id() {
    let outliner = CountingOutliner { calls: Cell::new(0) };
    let mut cache = StrokeCache::new();
    let id = new_id();
    let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];

    cache.get_or_compute(id, &points, 4.0, &outliner);
    cache.get_or_compute(id, &points, 4.0, &outliner);
    assert_eq!(outliner.calls.get(), 1);
    assert!(cache.contains(&id));
}

#[test]
fn invalidate_forces_recompute() {
    let outliner = CountingOutliner { calls: Cell::new(0) };
    let mut cache = StrokeCache::new();
    let id = new_id();
    let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];

    cache.get_or_compute(id, &points, 4.0, &outliner);
    cache.invalidate(&id);
    assert!(!cache.contains(&id));
    cache.get_or_compute(id, &points, 4.0, &outliner);
    assert_eq!(outliner.calls.get(), 2);
}

#[test]
fn invalidate_is_per_id() {
    let outliner = CountingOutliner { calls: Cell::new(0) };
    let mut cache = StrokeCache::new();
    let (a, b) = (new_id(), new_id());
    let points = [Point::new(0.0, 0.0), Point::new(1.0, 1.0)];

    cache.get_or_compute(a, &points, 4.0, &outliner);
    cache.get_or_compute(b, &points, 4.0, &outliner);
    cache.invalidate(&a);
    assert!(!cache.contains(&a));
    assert!(cache.contains(&b));
}

#[test]
fn clear_drops_everything() {
    let outliner = CountingOutliner { calls: Cell::new(0) };
    let mut cache = StrokeCache::new();
    let id = new_id();
    cache.get_or_compute(id, &[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], 4.0, &outliner);
    cache.clear();
    assert!(!cache.contains(&id));
}
