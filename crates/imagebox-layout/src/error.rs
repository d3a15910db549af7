//! Error types for imagebox-layout
//!
//! Per-item geometry failures ([`LayoutError::DegenerateRegion`],
//! [`LayoutError::MalformedRectangle`]) are reported back inside batch
//! results and never abort a batch; the remaining variants abort the call.

use thiserror::Error;

/// Errors that can occur while slicing, cropping or stitching
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imagebox_core::Error),

    /// Rotation or resampling failed
    #[error("transform error: {0}")]
    Transform(#[from] imagebox_transform::TransformError),

    /// No images were supplied to the stitcher
    #[error("no images to stitch")]
    EmptyInput,

    /// Layout parameters make the operation meaningless
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// Background color could not be parsed
    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    /// A crop or slice rectangle has no area after scale correction
    #[error("degenerate region #{index}: {width}x{height}")]
    DegenerateRegion { index: usize, width: i64, height: i64 },

    /// A drawing-tool object could not be read as a rectangle
    #[error("malformed rectangle #{index}: {reason}")]
    MalformedRectangle { index: usize, reason: String },

    /// The drawing-tool payload is not valid JSON
    #[error("invalid canvas JSON: {0}")]
    CanvasJson(#[from] serde_json::Error),

    /// The image has a zero dimension
    #[error("empty bitmap: {width}x{height}")]
    EmptyBitmap { width: u32, height: u32 },
}

impl LayoutError {
    /// True for errors that only disqualify one item of a batch.
    pub fn is_item_error(&self) -> bool {
        matches!(
            self,
            LayoutError::DegenerateRegion { .. } | LayoutError::MalformedRectangle { .. }
        )
    }
}

/// Result type for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
