//! Error types for reading plan operations

use thiserror::Error;

/// Result type alias for reading plan operations
pub type Result<T> = std::result::Result<T, Error>;

/// A failure while turning plan text into a [`Plan`](crate::Plan).
///
/// Parsing stops at the first of these; nothing is recovered.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The `---` header/content delimiters are missing
    #[error("Invalid format: need at least header and content delimiters")]
    Format,

    /// The header lacks `id`, `name` or `type`
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// A content segment matched no verse reference rule
    #[error("Invalid verse format: {0}")]
    VerseFormat(String),
}

/// Error type for reading plan operations
#[derive(Error, Debug)]
pub enum Error {
    /// Plan text could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
