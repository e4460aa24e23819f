//! Object-level diff: compare two mappings key by key.
//!
//! Keys present only on the left are `Deleted`, keys present only on the
//! right are `Added`, and shared keys are compared recursively. Objects never
//! detect moves across keys: a renamed member is a deletion plus an addition.

use treedelta_types::{Map, Position};

use crate::compare::Comparator;
use crate::delta::Delta;
use crate::error::DiffResult;

/// Compute the deltas between two objects at nesting level `depth`.
///
/// Left keys are walked in ascending order first (modifications and
/// deletions), then right keys in ascending order (additions). Both walks use
/// the map's own key order, so repeated runs emit the same sequence.
pub(crate) fn diff_objects(
    cmp: &Comparator,
    left: &Map,
    right: &Map,
    depth: usize,
) -> DiffResult<Vec<Delta>> {
    let mut deltas = Vec::new();

    // Check for deleted and modified members.
    for (name, left_value) in left {
        let position = Position::Name(name.clone());
        match right.get(name) {
            Some(right_value) => {
                let old_position = position.clone();
                if let Some(delta) = cmp.values(position, old_position, left_value, right_value, depth)? {
                    deltas.push(delta);
                }
            }
            None => deltas.push(Delta::deleted(position, left_value.clone())),
        }
    }

    // Check for added members.
    for (name, right_value) in right {
        if !left.contains_key(name) {
            deltas.push(Delta::added(Position::Name(name.clone()), right_value.clone()));
        }
    }

    Ok(deltas)
}
