#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom on the infinite canvas.
///
/// `x` / `y` are the world-to-screen translation in CSS pixels; `z` is the
/// zoom factor, clamped to `[MIN_ZOOM, MAX_ZOOM]` after every change.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, z: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.z,
            y: (screen.y - self.y) / self.z,
        }
    }

    /// Convert a world-space point to screen coordinates (CSS pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.z + self.x,
            y: world.y * self.z + self.y,
        }
    }

    /// Convert a screen-space distance (pixels) to world-space distance.
    #[must_use]
    pub fn screen_dist_to_world(&self, screen_dist: f64) -> f64 {
        screen_dist / self.z
    }

    /// Pan by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Set the zoom to `new_z` (clamped), keeping the world point under the
    /// screen-space `anchor` fixed. This is what makes wheel-zoom track the
    /// pointer and button-zoom track the viewport center.
    pub fn zoom_toward(&mut self, anchor: Point, new_z: f64) {
        let clamped = new_z.clamp(MIN_ZOOM, MAX_ZOOM);
        let world = self.screen_to_world(anchor);
        self.z = clamped;
        self.x = anchor.x - world.x * clamped;
        self.y = anchor.y - world.y * clamped;
    }

    /// Current zoom as a rounded integer percentage, for the host UI.
    #[must_use]
    pub fn zoom_percent(&self) -> i32 {
        #[allow(clippy::cast_possible_truncation)]
        let pct = (self.z * 100.0).round() as i32;
        pct
    }
}
