//! Error types for the CAM tools crate.
//!
//! Parameter problems are reported before any geometry is built. Geometry
//! errors carry the cut and corner where rounding failed.

use coilkit_core::GeometryError;
use std::io;
use thiserror::Error;

/// Errors that can occur while building or exporting a coil.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// The parameter set cannot describe a manufacturable coil.
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ParameterError),

    /// A corner could not be rounded because a neighbouring edge has zero length.
    #[error("Geometry error at corner {corner} of cut '{cut}': {source}")]
    Geometry {
        corner: usize,
        cut: String,
        #[source]
        source: GeometryError,
    },

    /// I/O error while writing an output file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An external document compiler or viewer failed.
    #[error("External process failed: {0}")]
    ExternalProcess(String),
}

/// Errors related to coil parameter validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// A parameter value is out of the valid range.
    #[error("Parameter '{name}' out of range: {value} (valid: {min}..{max})")]
    OutOfRange {
        name: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A parameter value is invalid.
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue { name: String, reason: String },

    /// Parameters are mutually incompatible.
    #[error("Incompatible parameters: {0}")]
    Incompatible(String),
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

/// Result type alias for parameter validation.
pub type ParameterResult<T> = Result<T, ParameterError>;
