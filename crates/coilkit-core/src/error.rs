//! Error types for geometric primitives.

use thiserror::Error;

/// Errors raised by vector operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A zero-length vector cannot be normalised.
    #[error("Degenerate vector ({x}, {y}) cannot be normalised")]
    DegenerateVector {
        /// X component of the offending vector.
        x: f64,
        /// Y component of the offending vector.
        y: f64,
    },
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
