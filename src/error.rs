//! Error types for engine operations.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur in engine operations.
///
/// Everything here is local and non-propagating past the host boundary:
/// construction failures abort initialization, import failures leave the
/// scene untouched, and storage failures degrade to an in-memory scene.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No 2D drawing context could be obtained from the canvas element.
    #[error("no 2d canvas context available")]
    NoContext,

    /// Scene (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// An imported document could not be parsed. The scene is unchanged.
    #[error("import failed: {0}")]
    Import(String),

    /// Browser storage was unavailable or rejected a write.
    #[error("storage error: {0}")]
    Storage(String),

    /// A rendering or export call failed.
    #[error("render error: {0}")]
    Render(String),
}
