//! Recording Error Types

use thiserror::Error;

/// Errors while loading a recording
#[derive(Debug, Error)]
pub enum RecordingError {
    /// File could not be read
    #[error("Failed to read recording {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Content is not a valid recording document
    #[error("Invalid recording format: {0}")]
    Json(#[from] serde_json::Error),

    /// Recording has no frames to evaluate
    #[error("Recording {0} contains no frames")]
    Empty(String),
}
