//! Error types for the value model.

/// Errors produced when moving values in and out of the value model.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TypeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// `serde_json` yields this only when its `arbitrary_precision` feature
    /// is on, which any crate in the build graph can switch on through
    /// feature unification.
    #[error("number {0} cannot be represented as a 64-bit float")]
    UnrepresentableNumber(String),

    #[error("non-finite number {0} has no JSON representation")]
    NonFiniteNumber(f64),
}
