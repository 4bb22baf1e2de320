//! Error types for playback backends

use thiserror::Error;

/// Playback errors
///
/// These only travel between a `MediaBackend` and the store. The store
/// absorbs them into a paused state; callers of store commands never see one.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The backend could not start or continue playback
    #[error("Media backend error: {0}")]
    Backend(String),

    /// The audio source could not be loaded
    #[error("Unsupported audio source: {0}")]
    UnsupportedSource(String),

    /// The backend is not in a state that allows the command
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type for backend operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
