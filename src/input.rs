//! Input model: tools, modifier keys, stroke defaults, and the gesture
//! state machine.
//!
//! `Gesture` is the single active pointer interaction tracked between
//! pointer-down and pointer-up; the variants are mutually exclusive and each
//! carries the context needed to compute incremental deltas and commit on
//! release.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::hit::Handle;
use crate::shape::{Shape, ShapeId, StrokeStyle};

/// Which tool is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pointer / selection tool (default).
    #[default]
    Select,
    /// Pan the canvas by dragging.
    Hand,
    /// Draw a rectangle.
    Rect,
    /// Draw a diamond.
    Diamond,
    /// Draw a circle from its center.
    Circle,
    /// Draw a straight line segment.
    Line,
    /// Draw a directed arrow.
    Arrow,
    /// Draw a freehand stroke.
    Pencil,
    /// Place a text block via the host's inline editor.
    Text,
    /// Place a pending image.
    Image,
    /// Delete shapes under the pointer.
    Eraser,
}

impl Tool {
    /// Whether this tool constructs a new shape by dragging.
    #[must_use]
    pub fn is_drawing(self) -> bool {
        matches!(
            self,
            Self::Rect | Self::Diamond | Self::Circle | Self::Line | Self::Arrow | Self::Pencil
        )
    }

    /// Default CSS cursor for this tool.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Hand => "grab",
            Self::Eraser | Self::Pencil => "crosshair",
            Self::Text => "text",
            _ => "default",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// A keyboard key as reported by the browser (e.g. `"Delete"`, `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// Stroke styling applied to newly created shapes.
#[derive(Debug, Clone)]
pub struct StrokeOptions {
    /// Stroke color as a CSS color string.
    pub color: String,
    /// Stroke width in world units.
    pub width: f64,
    /// Dash style.
    pub style: StrokeStyle,
}

impl Default for StrokeOptions {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
            width: 2.0,
            style: StrokeStyle::Solid,
        }
    }
}

/// Persistent UI state visible to the renderer and the host.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Currently active tool.
    pub tool: Tool,
    /// Ids of the selected top-level shapes, in selection order.
    pub selected: Vec<ShapeId>,
    /// Stroke defaults for new shapes.
    pub stroke: StrokeOptions,
    /// Image source waiting to be placed by the image tool.
    pub pending_image: Option<String>,
}

/// The active pointer gesture.
///
/// Exactly one variant is live at any instant; pointer-up always returns to
/// `Idle`. There is no cancellation; a gesture runs to release.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Hand-tool pan; tracks the previous screen position for deltas.
    Panning {
        /// Screen position at the previous pointer event.
        last_screen: Point,
    },
    /// Moving the current selection; tracks the previous world position.
    Dragging {
        /// World position at the previous pointer event.
        last_world: Point,
    },
    /// Resizing one selected shape via a handle. `original` is a deep copy
    /// captured at gesture start; every move recomputes from it so the
    /// anchored edges never accumulate drift.
    Resizing {
        /// Id of the shape being resized.
        id: ShapeId,
        /// The handle being dragged.
        handle: Handle,
        /// Deep copy of the shape at resize start.
        original: Shape,
    },
    /// Constructing a new shape; the shape lives here until commit.
    Drawing {
        /// The in-progress shape (not yet in the scene).
        shape: Shape,
    },
    /// Eraser held down; passing over shapes deletes them.
    Erasing,
    /// Rubber-band selection from `start` to the current pointer.
    BoxSelecting {
        /// World position where the drag started.
        start: Point,
        /// World position of the latest pointer event.
        current: Point,
    },
}
