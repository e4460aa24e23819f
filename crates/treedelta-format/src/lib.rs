//! Text rendering for treedelta diffs.
//!
//! Renders a [`Diff`](treedelta_diff::Diff) against the left value it was
//! computed from, one line per item, each line carrying a single marker:
//! unchanged (` `), added (`+`) or deleted (`-`).
//!
//! ```text
//!  {
//! -  "bar": 20,
//! +  "bar": 42,
//! -  "boz": 30,
//!    "foo": 10
//!  }
//! ```
//!
//! # Key Types
//!
//! - [`AsciiFormatter`] / [`format_diff`] -- The renderer
//! - [`FormatOptions`] -- Array index display and coloring
//! - [`RenderDiff`] -- `diff.render(&left, &options)` convenience

pub mod ascii;
pub mod error;
pub mod options;

pub use ascii::{format_diff, AsciiFormatter, Marker, RenderDiff};
pub use error::{FormatError, FormatResult};
pub use options::FormatOptions;
