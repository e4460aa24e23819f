use serde::{Deserialize, Serialize};

/// Rendering switches.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Prefix array elements with their index (`0: "a",`).
    pub show_array_index: bool,
    /// Wrap added lines in black-on-green and deleted lines in black-on-red.
    pub colored: bool,
}

impl FormatOptions {
    /// Plain rendering with array indices shown.
    pub fn with_array_index() -> Self {
        Self {
            show_array_index: true,
            ..Default::default()
        }
    }

    /// Plain rendering with ANSI colors.
    pub fn colored() -> Self {
        Self {
            colored: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_plain() {
        let options = FormatOptions::default();
        assert!(!options.show_array_index);
        assert!(!options.colored);
    }

    #[test]
    fn presets() {
        assert!(FormatOptions::with_array_index().show_array_index);
        assert!(FormatOptions::colored().colored);
        assert!(!FormatOptions::colored().show_array_index);
    }
}
