//! Apply a diff to its left value to rebuild the right value.
//!
//! This is a two-way application: the diff must have been computed against
//! exactly this left value. Any inconsistency (a missing member, an index out
//! of range, a nested delta over the wrong kind) fails instead of being
//! skipped.

use std::collections::BTreeMap;

use treedelta_types::{Map, Position, Value, ValueKind};

use crate::delta::{Delta, Diff};
use crate::error::{DiffError, DiffResult};

/// Rebuild the right value from `left` and the diff computed against it.
pub fn apply(left: &Value, diff: &Diff) -> DiffResult<Value> {
    match left {
        Value::Object(map) => apply_object(map, &diff.deltas).map(Value::Object),
        Value::Array(items) => apply_array(items, &diff.deltas).map(Value::Array),
        _ if diff.is_empty() => Ok(left.clone()),
        other => Err(DiffError::NotAContainer(other.kind())),
    }
}

fn apply_object(left: &Map, deltas: &[Delta]) -> DiffResult<Map> {
    let mut out = left.clone();
    for delta in deltas {
        match delta {
            Delta::Added { position, value } => {
                let name = member_name(position)?;
                if out.contains_key(name) {
                    return Err(DiffError::DuplicatePosition(position.clone()));
                }
                out.insert(name.to_owned(), value.clone());
            }
            Delta::Deleted { position, .. } => {
                out.remove(member_name(position)?)
                    .ok_or_else(|| DiffError::MissingMember(position.clone()))?;
            }
            Delta::Modified {
                position,
                new_value,
                ..
            } => {
                let name = member_name(position)?;
                let slot = out
                    .get_mut(name)
                    .ok_or_else(|| DiffError::MissingMember(position.clone()))?;
                *slot = new_value.clone();
            }
            Delta::Object { position, .. } | Delta::Array { position, .. } => {
                let name = member_name(position)?;
                let current = left
                    .get(name)
                    .ok_or_else(|| DiffError::MissingMember(position.clone()))?;
                let patched = apply_nested(current, delta)?;
                out.insert(name.to_owned(), patched);
            }
            Delta::Moved { new_position, .. } => {
                return Err(DiffError::UnexpectedPosition {
                    position: new_position.clone(),
                    container: ValueKind::Object,
                });
            }
        }
    }
    Ok(out)
}

fn apply_array(left: &[Value], deltas: &[Delta]) -> DiffResult<Vec<Value>> {
    let mut consumed = vec![false; left.len()];
    let mut produced: BTreeMap<usize, Value> = BTreeMap::new();

    let mut consume = |position: &Position| -> DiffResult<usize> {
        let index = element_index(position)?;
        match consumed.get_mut(index) {
            None => Err(DiffError::PositionOutOfRange {
                position: position.clone(),
                len: left.len(),
            }),
            Some(true) => Err(DiffError::DuplicatePosition(position.clone())),
            Some(slot) => {
                *slot = true;
                Ok(index)
            }
        }
    };

    for delta in deltas {
        let (at, value) = match delta {
            Delta::Added { position, value } => (position, value.clone()),
            Delta::Deleted { position, .. } => {
                consume(position)?;
                continue;
            }
            Delta::Modified {
                position,
                old_position,
                new_value,
                ..
            } => {
                consume(old_position)?;
                (position, new_value.clone())
            }
            Delta::Moved {
                old_position,
                new_position,
                value,
                ..
            } => {
                consume(old_position)?;
                (new_position, value.clone())
            }
            Delta::Object {
                position,
                old_position,
                ..
            }
            | Delta::Array {
                position,
                old_position,
                ..
            } => {
                let index = consume(old_position)?;
                (position, apply_nested(&left[index], delta)?)
            }
        };
        let index = element_index(at)?;
        if produced.insert(index, value).is_some() {
            return Err(DiffError::DuplicatePosition(at.clone()));
        }
    }

    let anchors: Vec<&Value> = left
        .iter()
        .zip(&consumed)
        .filter(|(_, used)| !**used)
        .map(|(value, _)| value)
        .collect();
    let len = anchors.len() + produced.len();
    let slots = len - produced.range(..len).count();
    if slots != anchors.len() {
        return Err(DiffError::AnchorMismatch {
            anchors: anchors.len(),
            slots,
        });
    }

    let mut anchors = anchors.into_iter();
    let mut out = Vec::with_capacity(len);
    for index in 0..len {
        match produced.remove(&index) {
            Some(value) => out.push(value),
            None => out.extend(anchors.next().cloned()),
        }
    }
    Ok(out)
}

/// Apply a nested `Object` or `Array` delta to the live left value.
fn apply_nested(current: &Value, delta: &Delta) -> DiffResult<Value> {
    let (position, children, expected) = match delta {
        Delta::Object {
            position, children, ..
        } => (position, children, ValueKind::Object),
        Delta::Array {
            position, children, ..
        } => (position, children, ValueKind::Array),
        _ => return Err(DiffError::NotAContainer(current.kind())),
    };
    match (current, expected) {
        (Value::Object(map), ValueKind::Object) => apply_object(map, children).map(Value::Object),
        (Value::Array(items), ValueKind::Array) => apply_array(items, children).map(Value::Array),
        _ => Err(DiffError::TypeMismatch {
            position: position.clone(),
            expected,
            actual: current.kind(),
        }),
    }
}

fn member_name(position: &Position) -> DiffResult<&str> {
    position.as_name().ok_or_else(|| DiffError::UnexpectedPosition {
        position: position.clone(),
        container: ValueKind::Object,
    })
}

fn element_index(position: &Position) -> DiffResult<usize> {
    position.as_index().ok_or_else(|| DiffError::UnexpectedPosition {
        position: position.clone(),
        container: ValueKind::Array,
    })
}
