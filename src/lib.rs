//! Infinite-canvas drawing engine.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns
//! the full lifecycle of the drawing surface: translating raw DOM input into
//! scene mutations, maintaining camera state for pan/zoom, hit-testing
//! shapes and resize handles, rendering the scene, and persisting it to
//! localStorage. The host layer is responsible only for wiring DOM events to
//! the engine and reflecting the returned [`engine::Event`]s in its UI.
//!
//! The logic lives in [`engine::EngineCore`], which never touches the DOM
//! and runs natively under test; [`engine::Engine`] binds a core to a
//! canvas element and adds rendering, autosave, and PNG export.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`scene`] | Ordered shape list, z-order, and grouping |
//! | [`shape`] | Shape model and per-variant geometry |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`input`] | Tools, stroke defaults, and the gesture state machine |
//! | [`hit`] | Hit-testing shapes and resize handles |
//! | [`transform`] | Anchor-preserving resize and group rescale |
//! | [`history`] | Snapshot undo/redo |
//! | [`persist`] | JSON schema, import/export, and autosave |
//! | [`outline`] | Stroke smoothing seam and the outline cache |
//! | [`text`] | Text metrics seam |
//! | [`render`] | Canvas2D render pipeline |
//! | [`export`] | PNG export through an offscreen canvas |
//! | [`consts`] | Shared numeric and style constants |
//! | [`error`] | Engine error types |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod error;
pub mod export;
pub mod history;
pub mod hit;
pub mod input;
pub mod outline;
pub mod persist;
pub mod render;
pub mod scene;
pub mod shape;
pub mod text;
pub mod transform;

pub use engine::{Engine, EngineCore, Event};
pub use error::{EngineError, EngineResult};
