//! Error types for the format crate.

use treedelta_types::{Position, ValueKind};

/// Errors that halt rendering.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Only objects and arrays can be rendered as a diff.
    #[error("expected an object or array at the root, got {0}")]
    UnsupportedRoot(ValueKind),

    /// A nested delta points at a left value of the wrong kind.
    #[error("type mismatch at {position}: delta expects {expected}, value is {actual}")]
    TypeMismatch {
        position: Position,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Writing into the output buffer failed.
    #[error("render error: {0}")]
    Write(#[from] std::fmt::Error),
}

/// Convenience alias for format results.
pub type FormatResult<T> = Result<T, FormatError>;
