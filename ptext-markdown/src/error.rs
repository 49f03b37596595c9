//! Error types for conversion operations

use thiserror::Error;

/// Errors raised while rendering a document to Markdown.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A span references a mark that is neither a built-in decorator nor defined in
    /// the block's `markDefs`.
    #[error("block '{block_key}' references unknown mark '{mark}'")]
    UnresolvedMark { block_key: String, mark: String },

    /// The output sink failed; rendering stops at the first failure.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the operation or parameter
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// A format parameter carried a value the format cannot use
    #[error("Invalid value '{value}' for option '{option}'")]
    InvalidOption { option: String, value: String },
}

impl From<RenderError> for FormatError {
    fn from(err: RenderError) -> Self {
        FormatError::SerializationError(err.to_string())
    }
}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        FormatError::ParseError(err.to_string())
    }
}
