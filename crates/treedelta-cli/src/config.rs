//! TOML configuration for the `treedelta` binary.
//!
//! ```toml
//! [compare]
//! max_depth = 64
//!
//! [format]
//! show_array_index = true
//! colored = false
//! ```

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use treedelta_diff::CompareOptions;
use treedelta_format::FormatOptions;

use crate::cli::Cli;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub compare: CompareOptions,
    pub format: FormatOptions,
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Command-line flags win over file values.
    pub fn with_flags(mut self, cli: &Cli) -> Self {
        if cli.show_index {
            self.format.show_array_index = true;
        }
        if cli.color {
            self.format.colored = true;
        }
        match cli.max_depth {
            Some(0) => self.compare.max_depth = None,
            Some(depth) => self.compare.max_depth = Some(depth),
            None => {}
        }
        self
    }
}
