//! Error types for the tagvalue pipeline.
//!
//! Error handling uses `thiserror` for ergonomic error definitions.
//!
//! The taxonomy deliberately separates two failure classes:
//!
//! - **Syntactic corruption** (a tag or value token that cannot be decoded,
//!   end of stream in the middle of a field) is fatal and aborts the run.
//!   The pipeline never resynchronizes below message granularity.
//! - **Semantic duplication** (the same tag appearing twice within one
//!   message) is NOT an error at this level. It is message-scoped,
//!   surfaced as [`Outcome::DuplicateField`](crate::Outcome), and
//!   processing continues with the next message.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, FixError>;

/// Main error type for the tagvalue pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FixError {
    /// Tag token is not a non-negative integer
    #[error("Malformed tag token: {0:?}")]
    MalformedTag(String),

    /// Value token failed to parse in the requested type
    #[error("Malformed value for tag {tag}: {token:?}")]
    MalformedValue { tag: u32, token: String },

    /// End of stream in the middle of a field
    #[error("Unexpected end of input while reading {0}")]
    UnexpectedEof(&'static str),

    /// End of input arrived inside a message, not at a message boundary
    #[error("Input ended mid-message (missing terminator)")]
    TruncatedMessage,

    /// I/O failure on the underlying stream
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Generic(String),
}

impl FixError {
    /// Create a generic error from any string-like type.
    pub fn generic(msg: impl Into<String>) -> Self {
        FixError::Generic(msg.into())
    }
}

// I/O errors are carried as strings so the error type stays Clone.
impl From<std::io::Error> for FixError {
    fn from(err: std::io::Error) -> Self {
        FixError::Io(err.to_string())
    }
}

impl From<String> for FixError {
    fn from(err: String) -> Self {
        FixError::Generic(err)
    }
}

impl From<&str> for FixError {
    fn from(err: &str) -> Self {
        FixError::Generic(err.to_string())
    }
}
