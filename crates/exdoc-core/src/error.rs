use thiserror::Error;

/// Core error types for exdoc.
///
/// Covers the few ways a documentation request can go wrong before an edit
/// reaches the client: malformed command arguments, documents that cannot be
/// read, and candidates pointing past the end of a document.
///
/// # Examples
///
/// ```
/// use exdoc_core::error::{ExdocError, Result};
///
/// fn first_argument(args: &[serde_json::Value]) -> Result<&serde_json::Value> {
///     args.first().ok_or(ExdocError::MissingArgument("candidate"))
/// }
///
/// assert!(first_argument(&[]).is_err());
/// ```
#[derive(Error, Debug)]
pub enum ExdocError {
    #[error("missing command argument: {0}")]
    MissingArgument(&'static str),

    #[error("line {line} is out of range (document has {line_count} lines)")]
    LineOutOfRange { line: u32, line_count: usize },

    #[error("file too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: u64, max: u64 },

    #[error("invalid URI: {0}")]
    InvalidUri(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for `Result<T, ExdocError>`.
pub type Result<T> = std::result::Result<T, ExdocError>;
