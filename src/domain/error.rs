//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent malformed input or invalid operation arguments.
/// These are independent of CLI and configuration concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("line {line}: closing marker </{found}> does not match open <{expected}>")]
    MismatchedClose {
        line: usize,
        expected: String,
        found: String,
    },

    #[error("line {line}: closing marker </{name}> without an open tag")]
    StackUnderflow { line: usize, name: String },

    #[error("line {line}: document must start with an opening marker, got: {content}")]
    MissingRootMarker { line: usize, content: String },

    #[error("line {line}: content after the root was closed: {content}")]
    ContentAfterRoot { line: usize, content: String },

    #[error("input ended with <{name}> still open")]
    UnclosedTag { name: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tree operations.
pub type DomainResult<T> = Result<T, DomainError>;
