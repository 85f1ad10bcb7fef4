//! Shared numeric and style constants for the engine.

// ── Camera ──────────────────────────────────────────────────────

/// Lower zoom clamp.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom clamp.
pub const MAX_ZOOM: f64 = 5.0;

/// Zoom delta per wheel pixel when pinching / ctrl-scrolling.
pub const WHEEL_ZOOM_SPEED: f64 = 0.005;

// ── Hit-testing ─────────────────────────────────────────────────

/// Perpendicular-distance slop for line/arrow/pencil segments, in world
/// units at zoom 1 (callers divide screen distances by zoom before testing).
pub const SEGMENT_HIT_THRESHOLD: f64 = 10.0;

/// Screen-space half-size of a resize handle's hit square.
pub const HANDLE_HIT_PX: f64 = 9.0;

/// Screen-space tolerance for the bounding-border resize fallback.
pub const BORDER_HIT_PX: f64 = 7.0;

/// World-unit padding between a shape's geometry and its selection box.
pub const SELECTION_PADDING: f64 = 8.0;

// ── Rendering ───────────────────────────────────────────────────

/// Screen-space half-size of a drawn resize handle square.
pub const HANDLE_HALF_SIZE_PX: f64 = 5.0;

/// Arrowhead wing length in world units.
pub const ARROWHEAD_LENGTH: f64 = 20.0;

/// Arrowhead wing angle off the shaft, in radians (30°).
pub const ARROWHEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Selection box and handle outline color.
pub const SELECTION_STROKE: &str = "#93c5fd";

/// Handle square fill color.
pub const HANDLE_FILL: &str = "#eff6ff";

/// Canvas background fill.
pub const BACKGROUND_FILL: &str = "#ffffff";

/// Ink width fed to the stroke-smoothing service for pencil outlines.
pub const PENCIL_OUTLINE_WIDTH: f64 = 10.0;

// ── Text ────────────────────────────────────────────────────────

/// Font size for newly committed text shapes, in world units.
pub const TEXT_FONT_SIZE: f64 = 24.0;

/// Line height as a multiple of font size.
pub const TEXT_LINE_HEIGHT: f64 = 1.25;

// ── Images ──────────────────────────────────────────────────────

/// Placeholder width for a freshly placed image shape.
pub const IMAGE_DEFAULT_WIDTH: f64 = 240.0;

/// Placeholder height for a freshly placed image shape.
pub const IMAGE_DEFAULT_HEIGHT: f64 = 180.0;

// ── Export ──────────────────────────────────────────────────────

/// World-unit padding around the scene bounding box in exports.
pub const EXPORT_PADDING: f64 = 40.0;

/// Supersampling factor for raster export.
pub const EXPORT_SCALE: f64 = 2.0;

// ── Persistence ─────────────────────────────────────────────────

/// localStorage key for the autosaved scene.
pub const STORAGE_KEY: &str = "slateboard_shapes";
