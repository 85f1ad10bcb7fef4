//! Top-level engine: the pure, natively-testable [`EngineCore`] and the
//! browser-bound [`Engine`] wrapper.
//!
//! `EngineCore` owns the scene, camera, selection, gesture state machine,
//! history, and stroke-outline cache. Every input handler and command
//! mutates synchronously and returns [`Event`]s describing what the host
//! should reflect (zoom label, selection, cursor) and what the wrapper
//! should do (persist, repaint). Nothing in `EngineCore` touches the DOM.
//!
//! `Engine` binds a core to a canvas element: it renders, autosaves to
//! localStorage, measures text through the real 2D context, and owns the
//! image store for decoded bitmaps.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Storage};

use crate::camera::{Camera, Point};
use crate::consts::{
    IMAGE_DEFAULT_HEIGHT, IMAGE_DEFAULT_WIDTH, TEXT_FONT_SIZE, WHEEL_ZOOM_SPEED,
};
use crate::error::{EngineError, EngineResult};
use crate::hit;
use crate::history::History;
use crate::input::{Gesture, Key, Modifiers, Tool, UiState, WheelDelta};
use crate::outline::{ChaikinOutliner, StrokeCache, StrokeOutliner};
use crate::persist;
use crate::render::{self, ImageStore};
use crate::scene::Scene;
use crate::shape::{self, Bounds, Shape, ShapeId, ShapeKind, StrokeStyle};
use crate::text::{CanvasTextMeasurer, HeuristicTextMeasurer, TextMeasurer, measure_block};
use crate::{export, transform};

/// Events returned from input handlers and commands for the host to process.
#[derive(Debug, Clone)]
pub enum Event {
    /// Zoom changed; payload is the rounded integer percentage.
    ZoomChanged(i32),
    /// The selection changed; payload is the current selected ids.
    SelectionChanged(Vec<ShapeId>),
    /// The engine switched tools on its own (auto-select after drawing or
    /// clicking existing geometry with a drawing tool).
    ToolChanged(Tool),
    /// The number of top-level shapes changed.
    ShapeCountChanged(usize),
    /// The pointer cursor should change to the named CSS cursor.
    CursorChanged(String),
    /// The host should open its inline text editor at the given position,
    /// pre-seeded with the current style, and call
    /// [`EngineCore::commit_text`] with the result.
    EditTextRequested {
        /// World position where the text shape will be anchored.
        world: Point,
        /// Screen position for placing the editor widget.
        screen: Point,
        /// Font size to seed the editor with.
        font_size: f64,
        /// Stroke color to seed the editor with.
        color: String,
    },
    /// The scene changed; the wrapper persists on this.
    SceneMutated,
    /// The canvas needs a repaint.
    RenderNeeded,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from [`Engine`] so it can be tested without a browser.
pub struct EngineCore {
    /// The ordered shape list.
    pub scene: Scene,
    /// Pan/zoom state.
    pub camera: Camera,
    /// Tool, selection, and stroke defaults.
    pub ui: UiState,
    /// The active pointer gesture.
    pub gesture: Gesture,
    /// Undo/redo snapshots.
    pub history: History,
    /// Cached pencil outlines.
    pub strokes: StrokeCache,
    /// Viewport width in CSS pixels.
    pub viewport_width: f64,
    /// Viewport height in CSS pixels.
    pub viewport_height: f64,
    /// Device pixel ratio.
    pub dpr: f64,
    measurer: Box<dyn TextMeasurer>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::default(),
            ui: UiState::default(),
            gesture: Gesture::Idle,
            history: History::new(),
            strokes: StrokeCache::new(),
            viewport_width: 0.0,
            viewport_height: 0.0,
            dpr: 1.0,
            measurer: Box::new(HeuristicTextMeasurer),
        }
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Core backed by a specific text measurer (the browser wrapper passes
    /// a canvas-context measurer here).
    #[must_use]
    pub fn with_measurer(measurer: Box<dyn TextMeasurer>) -> Self {
        Self { measurer, ..Self::default() }
    }

    /// Update viewport dimensions and device pixel ratio.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.viewport_width = width_css;
        self.viewport_height = height_css;
        self.dpr = dpr;
    }

    /// Replace the scene wholesale without touching history (startup load).
    pub fn load_scene(&mut self, shapes: Vec<Shape>) -> Vec<Event> {
        self.scene.restore(shapes);
        self.strokes.clear();
        self.ui.selected.clear();
        vec![
            Event::ShapeCountChanged(self.scene.len()),
            Event::RenderNeeded,
        ]
    }

    // ── Pointer events ──────────────────────────────────────────

    /// Pointer pressed at `screen` (CSS pixels).
    pub fn pointer_down(&mut self, screen: Point, _modifiers: Modifiers) -> Vec<Event> {
        let world = self.camera.screen_to_world(screen);
        let mut events = Vec::new();

        match self.ui.tool {
            Tool::Hand => {
                self.gesture = Gesture::Panning { last_screen: screen };
                events.push(Event::CursorChanged("grabbing".to_owned()));
            }
            Tool::Eraser => {
                self.erase_at(world, &mut events);
                self.gesture = Gesture::Erasing;
            }
            Tool::Select => self.select_pointer_down(world, &mut events),
            Tool::Text => {
                events.push(Event::EditTextRequested {
                    world,
                    screen,
                    font_size: TEXT_FONT_SIZE,
                    color: self.ui.stroke.color.clone(),
                });
            }
            Tool::Image => self.place_pending_image(world, &mut events),
            _ => self.drawing_pointer_down(world, &mut events),
        }
        events
    }

    /// Pointer moved to `screen`.
    pub fn pointer_move(&mut self, screen: Point) -> Vec<Event> {
        let world = self.camera.screen_to_world(screen);
        let mut events = Vec::new();

        match &mut self.gesture {
            Gesture::Panning { last_screen } => {
                let dx = screen.x - last_screen.x;
                let dy = screen.y - last_screen.y;
                *last_screen = screen;
                self.camera.pan_by(dx, dy);
                events.push(Event::RenderNeeded);
            }
            Gesture::Erasing => self.erase_at(world, &mut events),
            Gesture::Resizing { id, handle, original } => {
                let id = *id;
                let handle = *handle;
                if let Some(shape) = self.scene.get_mut(&id) {
                    transform::resize(shape, original, handle, world, self.measurer.as_ref());
                    let mut pencils = Vec::new();
                    shape.collect_pencil_ids(&mut pencils);
                    for pid in &pencils {
                        self.strokes.invalidate(pid);
                    }
                }
                events.push(Event::RenderNeeded);
            }
            Gesture::Dragging { last_world } => {
                let dx = world.x - last_world.x;
                let dy = world.y - last_world.y;
                *last_world = world;
                let selected = self.ui.selected.clone();
                for id in &selected {
                    if let Some(shape) = self.scene.get_mut(id) {
                        shape.translate(dx, dy);
                        let mut pencils = Vec::new();
                        shape.collect_pencil_ids(&mut pencils);
                        for pid in &pencils {
                            self.strokes.invalidate(pid);
                        }
                    }
                }
                events.push(Event::RenderNeeded);
            }
            Gesture::Drawing { shape } => {
                match &mut shape.kind {
                    ShapeKind::Rect { width, height } | ShapeKind::Diamond { width, height } => {
                        *width = world.x - shape.x;
                        *height = world.y - shape.y;
                    }
                    ShapeKind::Circle { radius } => {
                        let dx = world.x - shape.x;
                        let dy = world.y - shape.y;
                        *radius = (dx * dx + dy * dy).sqrt();
                    }
                    ShapeKind::Line { end_x, end_y } | ShapeKind::Arrow { end_x, end_y } => {
                        *end_x = world.x;
                        *end_y = world.y;
                    }
                    ShapeKind::Pencil { points } => {
                        points.push(world);
                        self.strokes.invalidate(&shape.id);
                    }
                    _ => {}
                }
                events.push(Event::RenderNeeded);
            }
            Gesture::BoxSelecting { current, .. } => {
                *current = world;
                events.push(Event::RenderNeeded);
            }
            Gesture::Idle => {
                if self.ui.tool == Tool::Select {
                    if let [id] = self.ui.selected[..] {
                        if let Some(shape) = self.scene.get(&id) {
                            let cursor = hit::handle_at(shape, world, self.camera.z)
                                .map_or("default", hit::Handle::cursor);
                            events.push(Event::CursorChanged(cursor.to_owned()));
                        }
                    }
                }
            }
        }
        events
    }

    /// Pointer released at `screen`.
    pub fn pointer_up(&mut self, screen: Point) -> Vec<Event> {
        let world = self.camera.screen_to_world(screen);
        let mut events = Vec::new();

        match std::mem::take(&mut self.gesture) {
            Gesture::Idle | Gesture::Erasing => {}
            Gesture::Panning { .. } => {
                events.push(Event::CursorChanged("grab".to_owned()));
            }
            Gesture::Resizing { .. } | Gesture::Dragging { .. } => {
                events.push(Event::SceneMutated);
                events.push(Event::RenderNeeded);
            }
            Gesture::Drawing { shape } => self.commit_drawn(shape, &mut events),
            Gesture::BoxSelecting { start, .. } => {
                let rect = Bounds::from_corners(start, world);
                // Inclusion policy: a shape is selected when its bounding
                // box intersects the rubber band (full containment implies
                // intersection, so one test covers both).
                let picked: Vec<ShapeId> = self
                    .scene
                    .shapes()
                    .iter()
                    .filter(|s| s.bounds().intersects(&rect))
                    .map(|s| s.id)
                    .collect();
                self.set_selection(picked, &mut events);
                events.push(Event::RenderNeeded);
            }
        }
        events
    }

    /// Wheel / trackpad scroll. Ctrl or meta means pinch-zoom toward the
    /// pointer; a plain wheel pans.
    pub fn wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Event> {
        let mut events = Vec::new();
        if modifiers.ctrl || modifiers.meta {
            let target = self.camera.z - delta.dy * WHEEL_ZOOM_SPEED;
            self.camera.zoom_toward(screen, target);
            events.push(Event::ZoomChanged(self.camera.zoom_percent()));
        } else {
            self.camera.pan_by(-delta.dx, -delta.dy);
        }
        events.push(Event::RenderNeeded);
        events
    }

    /// Keyboard input.
    pub fn key_down(&mut self, key: &Key) -> Vec<Event> {
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(),
            "Escape" => {
                let mut events = Vec::new();
                if !self.ui.selected.is_empty() {
                    self.set_selection(Vec::new(), &mut events);
                    events.push(Event::RenderNeeded);
                }
                events
            }
            _ => Vec::new(),
        }
    }

    // ── Commands ────────────────────────────────────────────────

    /// Set the active tool. Switching away from select drops the selection.
    pub fn set_tool(&mut self, tool: Tool) -> Vec<Event> {
        self.ui.tool = tool;
        let mut events = vec![Event::CursorChanged(tool.cursor().to_owned())];
        if tool != Tool::Select && !self.ui.selected.is_empty() {
            self.set_selection(Vec::new(), &mut events);
            events.push(Event::RenderNeeded);
        }
        events
    }

    /// Set the stroke color default and restyle the selection, if any.
    pub fn set_color(&mut self, color: String) -> Vec<Event> {
        self.ui.stroke.color = color.clone();
        self.restyle_selection(&|s| s.stroke_color = color.clone())
    }

    /// Set the stroke width default and restyle the selection, if any.
    pub fn set_width(&mut self, width: f64) -> Vec<Event> {
        self.ui.stroke.width = width;
        self.restyle_selection(&|s| s.stroke_width = width)
    }

    /// Set the dash style default and restyle the selection, if any.
    pub fn set_stroke_style(&mut self, style: StrokeStyle) -> Vec<Event> {
        self.ui.stroke.style = style;
        self.restyle_selection(&|s| s.stroke_style = style)
    }

    /// Zoom by `delta` anchored at the viewport center (toolbar buttons).
    pub fn set_zoom(&mut self, delta: f64) -> Vec<Event> {
        let center = Point::new(self.viewport_width / 2.0, self.viewport_height / 2.0);
        self.camera.zoom_toward(center, self.camera.z + delta);
        vec![
            Event::ZoomChanged(self.camera.zoom_percent()),
            Event::RenderNeeded,
        ]
    }

    /// Undo the most recent mutation, if any.
    pub fn undo(&mut self) -> Vec<Event> {
        let Some(previous) = self.history.undo(self.scene.snapshot()) else {
            return Vec::new();
        };
        self.swap_scene(previous)
    }

    /// Redo the most recently undone mutation, if any.
    pub fn redo(&mut self) -> Vec<Event> {
        let Some(next) = self.history.redo(self.scene.snapshot()) else {
            return Vec::new();
        };
        self.swap_scene(next)
    }

    /// Remove every shape. No-op on an empty scene.
    pub fn clear_canvas(&mut self) -> Vec<Event> {
        if self.scene.is_empty() {
            return Vec::new();
        }
        self.history.record(self.scene.snapshot());
        self.scene.clear();
        self.strokes.clear();
        let mut events = Vec::new();
        self.set_selection(Vec::new(), &mut events);
        events.push(Event::ShapeCountChanged(0));
        events.push(Event::SceneMutated);
        events.push(Event::RenderNeeded);
        events
    }

    /// Delete the selected shapes. No-op without a selection.
    pub fn delete_selection(&mut self) -> Vec<Event> {
        if self.ui.selected.is_empty() {
            return Vec::new();
        }
        self.history.record(self.scene.snapshot());
        for id in self.ui.selected.clone() {
            if let Some(shape) = self.scene.remove(&id) {
                let mut pencils = Vec::new();
                shape.collect_pencil_ids(&mut pencils);
                for pid in &pencils {
                    self.strokes.invalidate(pid);
                }
            }
        }
        let mut events = Vec::new();
        self.set_selection(Vec::new(), &mut events);
        events.push(Event::ShapeCountChanged(self.scene.len()));
        events.push(Event::SceneMutated);
        events.push(Event::RenderNeeded);
        events
    }

    /// Fold the selection (two or more shapes) into a group.
    pub fn group_shapes(&mut self) -> Vec<Event> {
        if self.ui.selected.len() < 2 {
            return Vec::new();
        }
        let before = self.scene.snapshot();
        let Some(gid) = self.scene.group(&self.ui.selected.clone()) else {
            return Vec::new();
        };
        self.history.record(before);
        let mut events = Vec::new();
        self.set_selection(vec![gid], &mut events);
        events.push(Event::ShapeCountChanged(self.scene.len()));
        events.push(Event::SceneMutated);
        events.push(Event::RenderNeeded);
        events
    }

    /// Dissolve the selection when it is exactly one group.
    pub fn ungroup_shapes(&mut self) -> Vec<Event> {
        let [id] = self.ui.selected[..] else {
            return Vec::new();
        };
        let before = self.scene.snapshot();
        let Some(child_ids) = self.scene.ungroup(&id) else {
            return Vec::new();
        };
        self.history.record(before);
        let mut events = Vec::new();
        self.set_selection(child_ids, &mut events);
        events.push(Event::ShapeCountChanged(self.scene.len()));
        events.push(Event::SceneMutated);
        events.push(Event::RenderNeeded);
        events
    }

    /// Raise each selected shape one layer.
    pub fn bring_forward(&mut self) -> Vec<Event> {
        self.reorder(|scene, ids| scene.bring_forward(ids))
    }

    /// Lower each selected shape one layer.
    pub fn send_backward(&mut self) -> Vec<Event> {
        self.reorder(|scene, ids| scene.send_backward(ids))
    }

    /// Move the selection to the top of the stack.
    pub fn bring_to_front(&mut self) -> Vec<Event> {
        self.reorder(|scene, ids| scene.bring_to_front(ids))
    }

    /// Move the selection to the bottom of the stack.
    pub fn send_to_back(&mut self) -> Vec<Event> {
        self.reorder(|scene, ids| scene.send_to_back(ids))
    }

    /// Replace the scene with an imported document (either accepted JSON
    /// form). A parse failure leaves the scene unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Import`] on malformed input.
    pub fn import_drawing(&mut self, json: &str) -> EngineResult<Vec<Event>> {
        let shapes = persist::from_json(json)?;
        self.history.record(self.scene.snapshot());
        let mut events = self.load_scene(shapes);
        events.push(Event::SceneMutated);
        Ok(events)
    }

    /// Commit text from the host's inline editor. Empty or whitespace-only
    /// input discards the pending text shape.
    pub fn commit_text(&mut self, world: Point, text: &str) -> Vec<Event> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let (width, height) = measure_block(self.measurer.as_ref(), text, TEXT_FONT_SIZE);
        let shape = Shape {
            id: shape::new_id(),
            x: world.x,
            y: world.y,
            stroke_color: self.ui.stroke.color.clone(),
            stroke_width: self.ui.stroke.width,
            stroke_style: self.ui.stroke.style,
            kind: ShapeKind::Text {
                text: text.to_owned(),
                font_size: TEXT_FONT_SIZE,
                width,
                height,
            },
        };
        let mut events = Vec::new();
        self.commit_drawn(shape, &mut events);
        events
    }

    /// Stage an image source for placement by the image tool.
    pub fn set_pending_image(&mut self, src: String) {
        self.ui.pending_image = Some(src);
    }

    // ── Queries ─────────────────────────────────────────────────

    /// The currently selected shape ids.
    #[must_use]
    pub fn selection(&self) -> &[ShapeId] {
        &self.ui.selected
    }

    /// Number of top-level shapes.
    #[must_use]
    pub fn shape_count(&self) -> usize {
        self.scene.len()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    // ── Internals ───────────────────────────────────────────────

    fn select_pointer_down(&mut self, world: Point, events: &mut Vec<Event>) {
        // A single selected shape exposes handles; a handle press starts a
        // resize with a deep copy as the anchor reference.
        if let [id] = self.ui.selected[..] {
            if let Some(shape) = self.scene.get(&id) {
                if let Some(handle) = hit::handle_at(shape, world, self.camera.z) {
                    self.history.record(self.scene.snapshot());
                    self.gesture = Gesture::Resizing {
                        id,
                        handle,
                        original: shape.clone(),
                    };
                    return;
                }
            }
        }

        match hit::shape_at(self.scene.shapes(), world) {
            Some(shape) if self.ui.selected.contains(&shape.id) => {
                self.history.record(self.scene.snapshot());
                self.gesture = Gesture::Dragging { last_world: world };
            }
            Some(shape) => {
                let id = shape.id;
                self.set_selection(vec![id], events);
                events.push(Event::RenderNeeded);
            }
            None => {
                self.set_selection(Vec::new(), events);
                self.gesture = Gesture::BoxSelecting { start: world, current: world };
                events.push(Event::RenderNeeded);
            }
        }
    }

    fn drawing_pointer_down(&mut self, world: Point, events: &mut Vec<Event>) {
        // Click-to-select: pressing on existing geometry with a drawing
        // tool switches to select instead of starting a new shape.
        if let Some(hit_shape) = hit::shape_at(self.scene.shapes(), world) {
            let id = hit_shape.id;
            self.ui.tool = Tool::Select;
            self.set_selection(vec![id], events);
            events.push(Event::ToolChanged(Tool::Select));
            events.push(Event::CursorChanged("default".to_owned()));
            events.push(Event::RenderNeeded);
            return;
        }

        let stroke = &self.ui.stroke;
        let kind = match self.ui.tool {
            Tool::Rect => ShapeKind::Rect { width: 0.0, height: 0.0 },
            Tool::Diamond => ShapeKind::Diamond { width: 0.0, height: 0.0 },
            Tool::Circle => ShapeKind::Circle { radius: 0.0 },
            Tool::Line => ShapeKind::Line { end_x: world.x, end_y: world.y },
            Tool::Arrow => ShapeKind::Arrow { end_x: world.x, end_y: world.y },
            Tool::Pencil => ShapeKind::Pencil { points: vec![world] },
            _ => return,
        };
        self.gesture = Gesture::Drawing {
            shape: Shape {
                id: shape::new_id(),
                x: world.x,
                y: world.y,
                stroke_color: stroke.color.clone(),
                stroke_width: stroke.width,
                stroke_style: stroke.style,
                kind,
            },
        };
    }

    fn place_pending_image(&mut self, world: Point, events: &mut Vec<Event>) {
        let Some(src) = self.ui.pending_image.take() else {
            return;
        };
        let shape = Shape {
            id: shape::new_id(),
            x: world.x,
            y: world.y,
            stroke_color: self.ui.stroke.color.clone(),
            stroke_width: self.ui.stroke.width,
            stroke_style: self.ui.stroke.style,
            kind: ShapeKind::Image {
                src,
                width: IMAGE_DEFAULT_WIDTH,
                height: IMAGE_DEFAULT_HEIGHT,
            },
        };
        self.commit_drawn(shape, events);
    }

    /// Push a finished shape into the scene, auto-select it, and hand the
    /// tool back to select.
    fn commit_drawn(&mut self, shape: Shape, events: &mut Vec<Event>) {
        self.history.record(self.scene.snapshot());
        let id = shape.id;
        self.scene.push(shape);
        self.ui.tool = Tool::Select;
        self.set_selection(vec![id], events);
        events.push(Event::ToolChanged(Tool::Select));
        events.push(Event::CursorChanged("default".to_owned()));
        events.push(Event::ShapeCountChanged(self.scene.len()));
        events.push(Event::SceneMutated);
        events.push(Event::RenderNeeded);
    }

    /// Erase the topmost shape under the pointer, one history entry per hit.
    fn erase_at(&mut self, world: Point, events: &mut Vec<Event>) {
        let Some(shape) = hit::shape_at(self.scene.shapes(), world) else {
            return;
        };
        let id = shape.id;
        self.history.record(self.scene.snapshot());
        if let Some(removed) = self.scene.remove(&id) {
            let mut pencils = Vec::new();
            removed.collect_pencil_ids(&mut pencils);
            for pid in &pencils {
                self.strokes.invalidate(pid);
            }
        }
        if self.ui.selected.contains(&id) {
            let remaining = self.ui.selected.iter().copied().filter(|s| *s != id).collect();
            self.set_selection(remaining, events);
        }
        events.push(Event::ShapeCountChanged(self.scene.len()));
        events.push(Event::SceneMutated);
        events.push(Event::RenderNeeded);
    }

    fn set_selection(&mut self, ids: Vec<ShapeId>, events: &mut Vec<Event>) {
        if self.ui.selected != ids {
            self.ui.selected = ids;
            events.push(Event::SelectionChanged(self.ui.selected.clone()));
        }
    }

    /// Apply a style mutation to every selected shape (recursing into
    /// groups), with one history entry. No selection means the change only
    /// affects future shapes.
    fn restyle_selection(&mut self, apply: &dyn Fn(&mut Shape)) -> Vec<Event> {
        if self.ui.tool != Tool::Select || self.ui.selected.is_empty() {
            return Vec::new();
        }
        self.history.record(self.scene.snapshot());
        for id in self.ui.selected.clone() {
            if let Some(shape) = self.scene.get_mut(&id) {
                restyle(shape, apply);
            }
        }
        vec![Event::SceneMutated, Event::RenderNeeded]
    }

    fn reorder(&mut self, op: impl Fn(&mut Scene, &[ShapeId])) -> Vec<Event> {
        if self.ui.selected.is_empty() {
            return Vec::new();
        }
        self.history.record(self.scene.snapshot());
        op(&mut self.scene, &self.ui.selected.clone());
        vec![Event::SceneMutated, Event::RenderNeeded]
    }

    /// Install a snapshot produced by undo/redo and prune stale selection.
    fn swap_scene(&mut self, shapes: Vec<Shape>) -> Vec<Event> {
        self.scene.restore(shapes);
        self.strokes.clear();
        let mut events = Vec::new();
        let surviving: Vec<ShapeId> = self
            .ui
            .selected
            .iter()
            .copied()
            .filter(|id| self.scene.get(id).is_some())
            .collect();
        self.set_selection(surviving, &mut events);
        events.push(Event::ShapeCountChanged(self.scene.len()));
        events.push(Event::SceneMutated);
        events.push(Event::RenderNeeded);
        events
    }
}

/// Apply a style mutation to a shape and, for groups, every descendant.
fn restyle(shape: &mut Shape, apply: &dyn Fn(&mut Shape)) {
    apply(shape);
    if let ShapeKind::Group { children, .. } = &mut shape.kind {
        for child in children.iter_mut() {
            restyle(child, apply);
        }
    }
}

/// The full canvas engine: an [`EngineCore`] bound to a browser canvas.
///
/// The wrapper reacts to [`Event::SceneMutated`] by autosaving and to
/// [`Event::RenderNeeded`] by repainting, then passes the events through to
/// the host. Render and storage failures are logged, never thrown; after
/// construction the engine does not fail out of an event handler.
pub struct Engine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    storage: Option<Storage>,
    images: ImageStore,
    outliner: Box<dyn StrokeOutliner>,
    /// Core engine state.
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element and load the
    /// autosaved scene.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NoContext`] when no 2D context is available,
    /// the one unrecoverable construction failure.
    pub fn new(canvas: HtmlCanvasElement) -> EngineResult<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| EngineError::Render(format!("{e:?}")))?
            .ok_or(EngineError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| EngineError::NoContext)?;

        let storage = match web_sys::window().map(|w| w.local_storage()) {
            Some(Ok(s)) => s,
            _ => None,
        };

        let mut core =
            EngineCore::with_measurer(Box::new(CanvasTextMeasurer::new(ctx.clone())));
        if let Some(store) = &storage {
            core.load_scene(persist::load_local(store));
        }

        let mut engine = Self {
            canvas,
            ctx,
            storage,
            images: ImageStore::new(),
            outliner: Box::new(ChaikinOutliner::default()),
            core,
        };
        engine.repaint();
        Ok(engine)
    }

    /// Replace the stroke-smoothing service.
    pub fn set_outliner(&mut self, outliner: Box<dyn StrokeOutliner>) {
        self.outliner = outliner;
        self.core.strokes.clear();
    }

    /// Update viewport dimensions and device pixel ratio, resizing the
    /// backing store to match.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) {
        self.core.set_viewport(width_css, height_css, dpr);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            self.canvas.set_width((width_css * dpr).max(0.0) as u32);
            self.canvas.set_height((height_css * dpr).max(0.0) as u32);
        }
        self.repaint();
    }

    // ── Input events (delegated, with persistence/repaint applied) ──

    pub fn on_pointer_down(&mut self, screen: Point, modifiers: Modifiers) -> Vec<Event> {
        let events = self.core.pointer_down(screen, modifiers);
        self.process(events)
    }

    pub fn on_pointer_move(&mut self, screen: Point) -> Vec<Event> {
        let events = self.core.pointer_move(screen);
        self.process(events)
    }

    pub fn on_pointer_up(&mut self, screen: Point) -> Vec<Event> {
        let events = self.core.pointer_up(screen);
        self.process(events)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Event> {
        let events = self.core.wheel(screen, delta, modifiers);
        self.process(events)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Event> {
        let events = self.core.key_down(key);
        self.process(events)
    }

    // ── Commands (delegated) ────────────────────────────────────

    pub fn set_tool(&mut self, tool: Tool) -> Vec<Event> {
        let events = self.core.set_tool(tool);
        self.process(events)
    }

    pub fn set_color(&mut self, color: String) -> Vec<Event> {
        let events = self.core.set_color(color);
        self.process(events)
    }

    pub fn set_width(&mut self, width: f64) -> Vec<Event> {
        let events = self.core.set_width(width);
        self.process(events)
    }

    pub fn set_stroke_style(&mut self, style: StrokeStyle) -> Vec<Event> {
        let events = self.core.set_stroke_style(style);
        self.process(events)
    }

    pub fn set_zoom(&mut self, delta: f64) -> Vec<Event> {
        let events = self.core.set_zoom(delta);
        self.process(events)
    }

    pub fn undo(&mut self) -> Vec<Event> {
        let events = self.core.undo();
        self.process(events)
    }

    pub fn redo(&mut self) -> Vec<Event> {
        let events = self.core.redo();
        self.process(events)
    }

    pub fn clear_canvas(&mut self) -> Vec<Event> {
        let events = self.core.clear_canvas();
        self.process(events)
    }

    pub fn group_shapes(&mut self) -> Vec<Event> {
        let events = self.core.group_shapes();
        self.process(events)
    }

    pub fn ungroup_shapes(&mut self) -> Vec<Event> {
        let events = self.core.ungroup_shapes();
        self.process(events)
    }

    pub fn bring_forward(&mut self) -> Vec<Event> {
        let events = self.core.bring_forward();
        self.process(events)
    }

    pub fn send_backward(&mut self) -> Vec<Event> {
        let events = self.core.send_backward();
        self.process(events)
    }

    pub fn bring_to_front(&mut self) -> Vec<Event> {
        let events = self.core.bring_to_front();
        self.process(events)
    }

    pub fn send_to_back(&mut self) -> Vec<Event> {
        let events = self.core.send_to_back();
        self.process(events)
    }

    /// Import a document, replacing the scene.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Import`] on malformed input; the scene and
    /// autosave are untouched.
    pub fn import_drawing(&mut self, json: &str) -> EngineResult<Vec<Event>> {
        let events = self.core.import_drawing(json)?;
        Ok(self.process(events))
    }

    pub fn commit_text(&mut self, world: Point, text: &str) -> Vec<Event> {
        let events = self.core.commit_text(world, text);
        self.process(events)
    }

    pub fn set_pending_image(&mut self, src: String) {
        self.core.set_pending_image(src);
    }

    /// Render the scene to an offscreen surface and return the PNG as a
    /// data URL plus a timestamped filename.
    ///
    /// # Errors
    ///
    /// Returns an error when the scene is empty or the offscreen surface
    /// cannot be created.
    pub fn export_image(&mut self) -> EngineResult<(String, String)> {
        export::export_png(
            &self.core.scene,
            &mut self.core.strokes,
            self.outliner.as_ref(),
            &mut self.images,
        )
    }

    // ── Render ──────────────────────────────────────────────────

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns an error if a Canvas2D call fails.
    pub fn render(&mut self) -> EngineResult<()> {
        render::draw(
            &self.ctx,
            &self.core.scene,
            &self.core.camera,
            &self.core.ui,
            &self.core.gesture,
            &mut self.core.strokes,
            self.outliner.as_ref(),
            &mut self.images,
            self.core.viewport_width,
            self.core.viewport_height,
            self.core.dpr,
        )
        .map_err(|e| EngineError::Render(format!("{e:?}")))
    }

    fn repaint(&mut self) {
        if let Err(e) = self.render() {
            tracing::warn!("render failed: {e}");
        }
    }

    /// Apply wrapper-level effects (autosave, repaint) and pass events on.
    fn process(&mut self, events: Vec<Event>) -> Vec<Event> {
        let mutated = events.iter().any(|e| matches!(e, Event::SceneMutated));
        let repaint = events.iter().any(|e| matches!(e, Event::RenderNeeded));
        if mutated {
            if let Some(store) = &self.storage {
                if let Err(e) = persist::save_local(store, self.core.scene.shapes()) {
                    tracing::warn!("autosave failed: {e}");
                }
            }
        }
        if repaint {
            self.repaint();
        }
        events
    }
}
