//! Error type spanning every imagebox crate

use thiserror::Error;

/// Any failure of a toolbox operation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("core error: {0}")]
    Core(#[from] imagebox_core::Error),

    #[error("I/O error: {0}")]
    Io(#[from] imagebox_io::IoError),

    #[error("transform error: {0}")]
    Transform(#[from] imagebox_transform::TransformError),

    #[error("filter error: {0}")]
    Filter(#[from] imagebox_filter::FilterError),

    #[error("layout error: {0}")]
    Layout(#[from] imagebox_layout::LayoutError),

    /// The configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),

    #[error("file error: {0}")]
    File(#[from] std::io::Error),
}

/// Result type for toolbox operations
pub type ToolResult<T> = Result<T, ToolError>;
