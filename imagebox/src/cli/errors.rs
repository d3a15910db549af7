use thiserror::Error;

use imagebox::ToolError;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Invalid value {value:?} for {arg}: {reason}")]
    InvalidArgument {
        arg: String,
        value: String,
        reason: String,
    },

    #[error("{arg} lists {given} values for {expected} input images")]
    CountMismatch {
        arg: String,
        given: usize,
        expected: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Tool(#[from] ToolError),
}
