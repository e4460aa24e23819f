//! Value-level comparison: dispatch by kind between the object comparator,
//! the array comparator and scalar equality.

use tracing::debug;

use treedelta_types::{Map, Position, Value};

use crate::array_diff::diff_arrays;
use crate::delta::{Delta, Diff};
use crate::error::{DiffError, DiffResult};
use crate::object_diff::diff_objects;
use crate::options::CompareOptions;

/// Compares value trees under a set of [`CompareOptions`].
#[derive(Clone, Debug, Default)]
pub struct Comparator {
    options: CompareOptions,
}

impl Comparator {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// Compare two root values.
    ///
    /// Two objects or two arrays produce the list of child deltas. Two equal
    /// values of any kind produce an empty diff. Any other pair has no
    /// position to attach a delta to and fails with
    /// [`DiffError::IncomparableRoots`].
    pub fn compare(&self, left: &Value, right: &Value) -> DiffResult<Diff> {
        let deltas = match (left, right) {
            (Value::Object(l), Value::Object(r)) => self.objects(l, r, 1)?,
            (Value::Array(l), Value::Array(r)) => self.arrays(l, r, 1)?,
            _ if left == right => Vec::new(),
            _ => {
                return Err(DiffError::IncomparableRoots {
                    left: left.kind(),
                    right: right.kind(),
                })
            }
        };
        debug!(root = %left.kind(), deltas = deltas.len(), "compared roots");
        Ok(Diff::from(deltas))
    }

    /// Compare two values found at `position`. `None` means they are equal.
    pub fn compare_values(
        &self,
        position: Position,
        left: &Value,
        right: &Value,
    ) -> DiffResult<Option<Delta>> {
        let old_position = position.clone();
        self.values(position, old_position, left, right, 0)
    }

    /// Key-wise diff of two objects.
    pub fn compare_objects(&self, left: &Map, right: &Map) -> DiffResult<Diff> {
        self.objects(left, right, 1).map(Diff::from)
    }

    /// Aligned diff of two arrays.
    pub fn compare_arrays(&self, left: &[Value], right: &[Value]) -> DiffResult<Diff> {
        self.arrays(left, right, 1).map(Diff::from)
    }

    /// Compare `left` (from `old_position`) with `right` (at `position`).
    ///
    /// `depth` is the nesting level of the container holding both values.
    pub(crate) fn values(
        &self,
        position: Position,
        old_position: Position,
        left: &Value,
        right: &Value,
        depth: usize,
    ) -> DiffResult<Option<Delta>> {
        if !left.same_kind(right) {
            return Ok(Some(Delta::modified_from(
                position,
                old_position,
                left.clone(),
                right.clone(),
            )));
        }

        match (left, right) {
            (Value::Object(l), Value::Object(r)) => {
                let children = self.objects(l, r, depth + 1)?;
                Ok(Delta::object(position, old_position, children))
            }
            (Value::Array(l), Value::Array(r)) => {
                let children = self.arrays(l, r, depth + 1)?;
                Ok(Delta::array(position, old_position, children))
            }
            _ if left == right => Ok(None),
            _ => Ok(Some(Delta::modified_from(
                position,
                old_position,
                left.clone(),
                right.clone(),
            ))),
        }
    }

    pub(crate) fn objects(&self, left: &Map, right: &Map, depth: usize) -> DiffResult<Vec<Delta>> {
        self.check_depth(depth)?;
        diff_objects(self, left, right, depth)
    }

    pub(crate) fn arrays(
        &self,
        left: &[Value],
        right: &[Value],
        depth: usize,
    ) -> DiffResult<Vec<Delta>> {
        self.check_depth(depth)?;
        diff_arrays(self, left, right, depth)
    }

    fn check_depth(&self, depth: usize) -> DiffResult<()> {
        match self.options.max_depth {
            Some(limit) if depth > limit => Err(DiffError::DepthExceeded { limit }),
            _ => Ok(()),
        }
    }
}

/// Compare two root values with the default options.
pub fn compare(left: &Value, right: &Value) -> DiffResult<Diff> {
    Comparator::default().compare(left, right)
}

/// Compare two root values with explicit options.
pub fn compare_with(left: &Value, right: &Value, options: &CompareOptions) -> DiffResult<Diff> {
    Comparator::new(options.clone()).compare(left, right)
}

/// Key-wise diff of two objects with the default options.
pub fn compare_objects(left: &Map, right: &Map) -> DiffResult<Diff> {
    Comparator::default().compare_objects(left, right)
}

/// Aligned diff of two arrays with the default options.
pub fn compare_arrays(left: &[Value], right: &[Value]) -> DiffResult<Diff> {
    Comparator::default().compare_arrays(left, right)
}

/// Compare two values at `position` with the default options.
pub fn compare_values(position: Position, left: &Value, right: &Value) -> DiffResult<Option<Delta>> {
    Comparator::default().compare_values(position, left, right)
}
