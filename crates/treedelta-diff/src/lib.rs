//! Comparison engine for treedelta.
//!
//! Computes a structural difference between two value trees and expresses it
//! as an ordered [`Diff`] of position-addressed [`Delta`] records, each with a
//! similarity score in `[0, 1]`.
//!
//! Objects are compared key by key. Arrays are aligned in three steps: an LCS
//! under structural equality fixes the anchors, remaining equal elements are
//! paired greedily as moves, and what is left between two anchors is matched
//! by a dynamic program that maximizes the total similarity of the pairs.
//! The output is deterministic: identical inputs always produce identical
//! diffs, in the same order.
//!
//! # Key Types
//!
//! - [`Diff`] / [`Delta`] -- The ordered change records
//! - [`Comparator`] / [`CompareOptions`] -- Entry point with a nesting limit
//! - [`apply`] -- Rebuild the right tree from the left tree and a diff

pub mod array_diff;
pub mod compare;
pub mod delta;
pub mod error;
pub mod lcs;
pub mod object_diff;
pub mod options;
pub mod patch;
pub mod similarity;

pub use compare::{compare, compare_arrays, compare_objects, compare_values, compare_with, Comparator};
pub use delta::{Delta, Diff};
pub use error::{DiffError, DiffResult};
pub use options::CompareOptions;
pub use patch::apply;

#[cfg(test)]
mod properties;
