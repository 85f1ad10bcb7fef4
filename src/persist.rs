//! Persistence and serialization.
//!
//! The canonical schema is the flat camelCase shape JSON from
//! [`crate::shape`]. Documents round-trip as either a bare `Shape[]` array
//! or a `{ "shapes": [...] }` wrapper; both parse to the same scene. Loading
//! applies one forward-compatible migration: shapes written before the
//! `strokeStyle` field existed come back as `solid` (a serde field default).
//!
//! Autosave is a full-scene overwrite on every mutation, with no batching
//! or debounce.

#[cfg(test)]
#[path = "persist_test.rs"]
mod persist_test;

use serde::Deserialize;
use web_sys::Storage;

use crate::consts::STORAGE_KEY;
use crate::error::{EngineError, EngineResult};
use crate::shape::Shape;

/// Accepted on-disk document forms.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Document {
    Wrapped { shapes: Vec<Shape> },
    Bare(Vec<Shape>),
}

/// Serialize a scene to its canonical JSON form (a bare array).
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json(shapes: &[Shape]) -> EngineResult<String> {
    Ok(serde_json::to_string(shapes)?)
}

/// Parse a document in either accepted form, migrating legacy shapes.
///
/// # Errors
///
/// Returns [`EngineError::Import`] when the input is not valid JSON for
/// either form; the caller's scene is untouched.
pub fn from_json(json: &str) -> EngineResult<Vec<Shape>> {
    match serde_json::from_str::<Document>(json) {
        Ok(Document::Wrapped { shapes } | Document::Bare(shapes)) => Ok(shapes),
        Err(e) => Err(EngineError::Import(e.to_string())),
    }
}

/// Overwrite the autosave slot with the full scene.
///
/// # Errors
///
/// Returns an error if serialization fails or the browser rejects the write
/// (e.g. quota).
pub fn save_local(storage: &Storage, shapes: &[Shape]) -> EngineResult<()> {
    let json = to_json(shapes)?;
    storage
        .set_item(STORAGE_KEY, &json)
        .map_err(|e| EngineError::Storage(format!("{e:?}")))
}

/// Load the autosaved scene. Corrupt or unreadable state is logged and
/// treated as an empty scene: local data loss, never a startup failure.
#[must_use]
pub fn load_local(storage: &Storage) -> Vec<Shape> {
    let saved = match storage.get_item(STORAGE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("autosave read failed: {e:?}");
            return Vec::new();
        }
    };
    match from_json(&saved) {
        Ok(shapes) => shapes,
        Err(e) => {
            tracing::warn!("autosave parse failed, starting empty: {e}");
            Vec::new()
        }
    }
}
