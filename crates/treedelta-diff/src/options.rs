use serde::{Deserialize, Serialize};

/// Nesting limit applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for a comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareOptions {
    /// Maximum number of nested containers walked before the comparison
    /// fails with [`DiffError::DepthExceeded`](crate::DiffError::DepthExceeded).
    /// The root container is level 1. `None` disables the check.
    pub max_depth: Option<usize>,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

impl CompareOptions {
    /// No nesting limit. Only safe for trusted input: recursion depth follows
    /// the nesting depth of the values.
    pub fn unbounded() -> Self {
        Self { max_depth: None }
    }

    /// Limit nesting to `max_depth` container levels.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        assert_eq!(CompareOptions::default().max_depth, Some(DEFAULT_MAX_DEPTH));
        assert_eq!(CompareOptions::unbounded().max_depth, None);
        assert_eq!(CompareOptions::with_max_depth(3).max_depth, Some(3));
    }

    #[test]
    fn missing_fields_take_defaults() {
        let options: CompareOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, CompareOptions::default());
        let options: CompareOptions = serde_json::from_str(r#"{"max_depth": null}"#).unwrap();
        assert_eq!(options, CompareOptions::unbounded());
    }
}
