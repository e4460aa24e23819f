//! Change records produced by a comparison.
//!
//! A [`Delta`] describes one atomic difference inside a container, addressed
//! by [`Position`]. Nested containers that differ produce an
//! [`Delta::Object`] or [`Delta::Array`] holding the child deltas, so a
//! [`Diff`] is a tree that mirrors the shape of the compared values.
//!
//! Positions come in two flavors. The new-side (right) position is where the
//! change lands; the left-side position is where the old value sat. They only
//! differ inside arrays, where elements shift and pairings cross indices.

use serde::{Deserialize, Serialize};

use treedelta_types::{Position, Value};

use crate::similarity::{deltas_similarity, modified_similarity, moved_similarity};

/// An atomic difference between two values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Delta {
    /// A value present only on the right.
    Added { position: Position, value: Value },
    /// A value present only on the left.
    Deleted { position: Position, value: Value },
    /// A value replaced by another at the same logical slot.
    Modified {
        position: Position,
        old_position: Position,
        old_value: Value,
        new_value: Value,
        similarity: f64,
    },
    /// An array element that reappears unchanged at another index.
    Moved {
        old_position: Position,
        new_position: Position,
        value: Value,
        similarity: f64,
    },
    /// Changes inside a nested object.
    Object {
        position: Position,
        old_position: Position,
        children: Vec<Delta>,
        similarity: f64,
    },
    /// Changes inside a nested array.
    Array {
        position: Position,
        old_position: Position,
        children: Vec<Delta>,
        similarity: f64,
    },
}

impl Delta {
    pub fn added(position: Position, value: Value) -> Self {
        Delta::Added { position, value }
    }

    pub fn deleted(position: Position, value: Value) -> Self {
        Delta::Deleted { position, value }
    }

    /// A replacement in place: the old value sat at the same position.
    pub fn modified(position: Position, old_value: Value, new_value: Value) -> Self {
        let old_position = position.clone();
        Self::modified_from(position, old_position, old_value, new_value)
    }

    /// A replacement pairing the left value at `old_position` with the right
    /// value at `position`.
    pub fn modified_from(
        position: Position,
        old_position: Position,
        old_value: Value,
        new_value: Value,
    ) -> Self {
        let similarity = modified_similarity(&old_value, &new_value);
        Delta::Modified {
            position,
            old_position,
            old_value,
            new_value,
            similarity,
        }
    }

    pub fn moved(old_index: usize, new_index: usize, value: Value) -> Self {
        Delta::Moved {
            old_position: Position::Index(old_index),
            new_position: Position::Index(new_index),
            value,
            similarity: moved_similarity(old_index, new_index),
        }
    }

    /// Changes inside a nested object, or `None` when there are none.
    pub fn object(position: Position, old_position: Position, children: Vec<Delta>) -> Option<Self> {
        if children.is_empty() {
            return None;
        }
        let similarity = deltas_similarity(&children);
        Some(Delta::Object {
            position,
            old_position,
            children,
            similarity,
        })
    }

    /// Changes inside a nested array, or `None` when there are none.
    pub fn array(position: Position, old_position: Position, children: Vec<Delta>) -> Option<Self> {
        if children.is_empty() {
            return None;
        }
        let similarity = deltas_similarity(&children);
        Some(Delta::Array {
            position,
            old_position,
            children,
            similarity,
        })
    }

    /// Similarity between the old and new state, from 0 (completely
    /// different) to 1 (equal).
    pub fn similarity(&self) -> f64 {
        match self {
            Delta::Added { .. } | Delta::Deleted { .. } => 0.0,
            Delta::Modified { similarity, .. }
            | Delta::Moved { similarity, .. }
            | Delta::Object { similarity, .. }
            | Delta::Array { similarity, .. } => *similarity,
        }
    }

    /// Whether this delta addresses `pos`. Moves match on their new position.
    pub fn position_matches(&self, pos: &Position) -> bool {
        match self {
            Delta::Added { position, .. }
            | Delta::Deleted { position, .. }
            | Delta::Modified { position, .. }
            | Delta::Object { position, .. }
            | Delta::Array { position, .. } => position == pos,
            Delta::Moved { new_position, .. } => new_position == pos,
        }
    }

    /// Where the old value sat in the left container. `None` for additions.
    pub fn left_position(&self) -> Option<&Position> {
        match self {
            Delta::Added { .. } => None,
            Delta::Deleted { position, .. } => Some(position),
            Delta::Modified { old_position, .. }
            | Delta::Moved { old_position, .. }
            | Delta::Object { old_position, .. }
            | Delta::Array { old_position, .. } => Some(old_position),
        }
    }

    /// Where the new value lands in the right container. `None` for deletions.
    pub fn right_position(&self) -> Option<&Position> {
        match self {
            Delta::Deleted { .. } => None,
            Delta::Added { position, .. }
            | Delta::Modified { position, .. }
            | Delta::Object { position, .. }
            | Delta::Array { position, .. } => Some(position),
            Delta::Moved { new_position, .. } => Some(new_position),
        }
    }

    /// Child deltas of a nested object or array.
    pub fn children(&self) -> Option<&[Delta]> {
        match self {
            Delta::Object { children, .. } | Delta::Array { children, .. } => Some(children),
            _ => None,
        }
    }
}

/// The ordered list of deltas explaining how one value becomes another.
///
/// Order is part of the contract: the same comparison always yields the
/// same sequence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diff {
    /// The deltas, in emission order.
    pub deltas: Vec<Delta>,
}

impl Diff {
    /// Create an empty diff.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }

    /// Number of top-level deltas.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Delta> {
        self.deltas.iter()
    }

    /// Mean similarity of the top-level deltas; 1 when there are none.
    pub fn similarity(&self) -> f64 {
        if self.is_empty() {
            1.0
        } else {
            deltas_similarity(&self.deltas)
        }
    }

    /// Number of added values, at any depth.
    pub fn additions(&self) -> usize {
        self.count(&|d| matches!(d, Delta::Added { .. }))
    }

    /// Number of deleted values, at any depth.
    pub fn deletions(&self) -> usize {
        self.count(&|d| matches!(d, Delta::Deleted { .. }))
    }

    /// Number of modified values, at any depth.
    pub fn modifications(&self) -> usize {
        self.count(&|d| matches!(d, Delta::Modified { .. }))
    }

    /// Number of moved array elements, at any depth.
    pub fn moves(&self) -> usize {
        self.count(&|d| matches!(d, Delta::Moved { .. }))
    }

    fn count(&self, pred: &dyn Fn(&Delta) -> bool) -> usize {
        fn walk(deltas: &[Delta], pred: &dyn Fn(&Delta) -> bool) -> usize {
            deltas
                .iter()
                .map(|d| usize::from(pred(d)) + d.children().map_or(0, |c| walk(c, pred)))
                .sum()
        }
        walk(&self.deltas, pred)
    }
}

impl From<Vec<Delta>> for Diff {
    fn from(deltas: Vec<Delta>) -> Self {
        Self { deltas }
    }
}

impl<'a> IntoIterator for &'a Diff {
    type Item = &'a Delta;
    type IntoIter = std::slice::Iter<'a, Delta>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.iter()
    }
}

impl IntoIterator for Diff {
    type Item = Delta;
    type IntoIter = std::vec::IntoIter<Delta>;

    fn into_iter(self) -> Self::IntoIter {
        self.deltas.into_iter()
    }
}
