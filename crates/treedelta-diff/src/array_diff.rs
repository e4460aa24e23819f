//! Array-level diff: explain how one sequence became another.
//!
//! The alignment runs in three steps:
//!
//! 1. **Anchoring.** An LCS under structural equality fixes the elements that
//!    stayed. Anchors never produce a delta, whatever their index shift. The
//!    remaining left elements are deletion candidates, the remaining right
//!    elements addition candidates, and each candidate is tagged with its
//!    bucket: the ordinal of the next anchor pair after it.
//! 2. **Moves.** Each deletion candidate, in left order, takes the first
//!    remaining addition candidate (in right order) that is structurally
//!    equal to it. This is first-fit, not an optimal assignment, and the
//!    output depends on it.
//! 3. **Buckets.** Within each bucket the remaining deletions and additions
//!    are paired by a dynamic program that maximizes total similarity while
//!    preserving order. Pairs become modifications (or nested deltas for
//!    containers of the same kind); the rest are plain deletions and
//!    additions.
//!
//! All moves are emitted first, then each bucket in order: pairs in
//! traceback order, leftover deletions, leftover additions.

use tracing::{debug, trace};

use treedelta_types::{Position, Value};

use crate::compare::Comparator;
use crate::delta::Delta;
use crate::error::DiffResult;
use crate::lcs::{lcs_index_pairs, IndexPair};

/// An element that is not on the LCS: maybe deleted, maybe added, maybe
/// moved or modified.
#[derive(Clone, Copy, Debug)]
struct Candidate<'a> {
    index: usize,
    bucket: usize,
    value: &'a Value,
}

/// Result of aligning one bucket.
struct Alignment<'a> {
    pairs: Vec<Delta>,
    free_left: Vec<Candidate<'a>>,
    free_right: Vec<Candidate<'a>>,
}

/// Compute the deltas between two arrays at nesting level `depth`.
pub(crate) fn diff_arrays(
    cmp: &Comparator,
    left: &[Value],
    right: &[Value],
    depth: usize,
) -> DiffResult<Vec<Delta>> {
    let anchors = lcs_index_pairs(left, right, |a, b| a == b);

    let deletions = candidates(left, anchors.iter().map(|p: &IndexPair| p.left));
    let additions = candidates(right, anchors.iter().map(|p: &IndexPair| p.right));

    let mut deltas = Vec::new();

    // Greedy first-fit move detection over a fixed snapshot of candidates.
    let mut deletion_used = vec![false; deletions.len()];
    let mut addition_used = vec![false; additions.len()];
    for (di, del) in deletions.iter().enumerate() {
        let hit = additions
            .iter()
            .enumerate()
            .find(|(ai, add)| !addition_used[*ai] && add.value == del.value);
        if let Some((ai, add)) = hit {
            deltas.push(Delta::moved(del.index, add.index, del.value.clone()));
            deletion_used[di] = true;
            addition_used[ai] = true;
        }
    }
    let moves = deltas.len();

    let remaining_deletions = unused_by_bucket(&deletions, &deletion_used, anchors.len());
    let remaining_additions = unused_by_bucket(&additions, &addition_used, anchors.len());

    for (bucket, (mut dels, mut adds)) in remaining_deletions
        .into_iter()
        .zip(remaining_additions)
        .enumerate()
    {
        if !dels.is_empty() && !adds.is_empty() {
            trace!(bucket, deletions = dels.len(), additions = adds.len(), "aligning bucket");
            let alignment = maximize_similarities(cmp, &dels, &adds, depth)?;
            deltas.extend(alignment.pairs);
            dels = alignment.free_left;
            adds = alignment.free_right;
        }

        for del in dels {
            deltas.push(Delta::deleted(Position::Index(del.index), del.value.clone()));
        }
        for add in adds {
            deltas.push(Delta::added(Position::Index(add.index), add.value.clone()));
        }
    }

    debug!(
        left = left.len(),
        right = right.len(),
        anchors = anchors.len(),
        moves,
        deltas = deltas.len(),
        "aligned array"
    );
    Ok(deltas)
}

/// Elements of `items` that are not anchors, tagged with their bucket.
///
/// `anchored` yields the anchor indices of `items` in ascending order.
fn candidates<'a>(items: &'a [Value], anchored: impl Iterator<Item = usize>) -> Vec<Candidate<'a>> {
    let mut anchored = anchored.peekable();
    let mut bucket = 0;
    let mut out = Vec::new();
    for (index, value) in items.iter().enumerate() {
        if anchored.peek() == Some(&index) {
            anchored.next();
            bucket += 1;
        } else {
            out.push(Candidate {
                index,
                bucket,
                value,
            });
        }
    }
    out
}

/// Group the candidates not consumed as moves by bucket, keeping order.
fn unused_by_bucket<'a>(
    candidates: &[Candidate<'a>],
    used: &[bool],
    anchor_count: usize,
) -> Vec<Vec<Candidate<'a>>> {
    let mut buckets = vec![Vec::new(); anchor_count + 1];
    for (candidate, &used) in candidates.iter().zip(used) {
        if !used {
            buckets[candidate.bucket].push(*candidate);
        }
    }
    buckets
}

/// Pair deletions with additions in order, maximizing total similarity.
///
/// `T[x][y]` holds the best total similarity achievable from `left[x..]` and
/// `right[y..]`. The traceback from `(0, 0)` prefers skipping a left item,
/// then a right item, and pairs only when neither skip keeps the score. At
/// most `min(n, m) - 1` items may be skipped on either side before the first
/// forced pair, so at least one pairing always happens.
fn maximize_similarities<'a>(
    cmp: &Comparator,
    left: &[Candidate<'a>],
    right: &[Candidate<'a>],
    depth: usize,
) -> DiffResult<Alignment<'a>> {
    let n = left.len();
    let m = right.len();

    let mut delta_table: Vec<Vec<Option<Delta>>> = Vec::with_capacity(n);
    for l in left {
        let mut row = Vec::with_capacity(m);
        for r in right {
            row.push(cmp.values(
                Position::Index(r.index),
                Position::Index(l.index),
                l.value,
                r.value,
                depth,
            )?);
        }
        delta_table.push(row);
    }

    // Equal pairs were consumed as moves, so every cell holds a delta; an
    // empty cell would be a perfect match.
    let score = |x: usize, y: usize| delta_table[x][y].as_ref().map_or(1.0, Delta::similarity);

    let mut dp = vec![vec![0.0f64; m + 1]; n + 1];
    for x in (0..n).rev() {
        for y in (0..m).rev() {
            let skip_left = dp[x + 1][y];
            let skip_right = dp[x][y + 1];
            let pair = score(x, y) + dp[x + 1][y + 1];
            dp[x][y] = skip_left.max(skip_right).max(pair);
        }
    }

    let max_unmatched = n.min(m) - 1;

    let mut pairs = Vec::with_capacity(n.min(m));
    let mut free_left = Vec::new();
    let mut free_right = Vec::new();

    let (mut x, mut y) = (0, 0);
    while x < n && y < m {
        let current = dp[x][y];
        let left_limit = n - max_unmatched + y;
        let right_limit = m - max_unmatched + x;

        if x + 1 < left_limit && current == dp[x + 1][y] {
            free_left.push(left[x]);
            x += 1;
        } else if y + 1 < right_limit && current == dp[x][y + 1] {
            free_right.push(right[y]);
            y += 1;
        } else {
            if let Some(delta) = delta_table[x][y].take() {
                pairs.push(delta);
            }
            x += 1;
            y += 1;
        }
    }
    free_left.extend_from_slice(&left[x..]);
    free_right.extend_from_slice(&right[y..]);

    Ok(Alignment {
        pairs,
        free_left,
        free_right,
    })
}
