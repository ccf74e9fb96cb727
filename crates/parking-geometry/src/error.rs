//! Geometry Error Types

use thiserror::Error;

/// Errors raised by geometric operations
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// A vector that must be normalised has zero length
    #[error("Degenerate geometry in {operation}: zero-length vector")]
    DegenerateGeometry { operation: &'static str },

    /// Supporting lines never meet
    #[error("Lines are parallel, no intersection")]
    ParallelLines,
}

impl GeometryError {
    pub(crate) fn degenerate(operation: &'static str) -> Self {
        GeometryError::DegenerateGeometry { operation }
    }
}
