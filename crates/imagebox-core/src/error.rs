//! Error types for imagebox-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics (offending index,
//! coordinate or value) without exposing internal implementation details.

use thiserror::Error;

/// imagebox core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Image dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A color string could not be parsed
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    /// A requested region has no area once mapped onto the image
    #[error("degenerate region #{index}: {width}x{height}")]
    DegenerateRegion { index: usize, width: i64, height: i64 },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for imagebox core operations
pub type Result<T> = std::result::Result<T, Error>;
