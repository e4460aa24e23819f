//! Foundation types for treedelta.
//!
//! This crate provides the value tree that every comparison is expressed in,
//! and the positions that address a child inside its immediate parent. Every
//! other treedelta crate depends on `treedelta-types`.
//!
//! # Key Types
//!
//! - [`Value`] -- Closed JSON-like value: null, bool, number, string, object, array
//! - [`ValueKind`] -- The variant tag of a [`Value`], used for kind checks
//! - [`Position`] -- Address of a child: an object member name or an array index

pub mod error;
pub mod position;
pub mod value;

pub use error::TypeError;
pub use position::Position;
pub use value::{write_json_str, Map, Value, ValueKind};
