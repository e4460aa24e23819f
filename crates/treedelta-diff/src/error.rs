//! Error types for the diff crate.

use treedelta_types::{Position, ValueKind};

/// Errors that can occur while comparing values or applying a diff.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DiffError {
    /// The inputs nest deeper than the configured limit.
    #[error("nesting depth exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },

    /// Two root values that are neither equal nor containers of the same kind.
    #[error("cannot compare a root {left} with a root {right}")]
    IncomparableRoots { left: ValueKind, right: ValueKind },

    /// A non-empty diff was applied to a scalar.
    #[error("cannot apply changes to a {0}")]
    NotAContainer(ValueKind),

    /// A nested delta addresses a value of the wrong kind.
    #[error("type mismatch at {position}: expected {expected}, got {actual}")]
    TypeMismatch {
        position: Position,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// A position that does not exist in the addressed container.
    #[error("position {position} is out of range for a container of length {len}")]
    PositionOutOfRange { position: Position, len: usize },

    /// An object member that is not present.
    #[error("no member named {0}")]
    MissingMember(Position),

    /// A position of the wrong variant for its container, e.g. a name inside an array.
    #[error("position {position} cannot address an element of an {container}")]
    UnexpectedPosition {
        position: Position,
        container: ValueKind,
    },

    /// Two deltas address the same position from the same side.
    #[error("position {0} is addressed more than once")]
    DuplicatePosition(Position),

    /// The unreferenced left elements do not fill the unreferenced right slots.
    #[error("anchor mismatch: {anchors} anchors for {slots} free slots")]
    AnchorMismatch { anchors: usize, slots: usize },
}

/// Convenience alias for diff results.
pub type DiffResult<T> = Result<T, DiffError>;
