//! Similarity heuristics.
//!
//! Scores range from 0 (unrelated) to 1 (identical). They rank candidate
//! pairings in the array matcher and are aggregated upward through nested
//! deltas. Every score here is finite.

use treedelta_types::Value;

use crate::delta::Delta;
use crate::lcs::lcs_length;

/// Credit for two values found at the same position.
pub const SAME_POSITION: f64 = 0.3;
/// Credit for two values of the same kind.
pub const SAME_KIND: f64 = 0.3;
/// Weight of the content ratio for strings and numbers, and of the index
/// ratio for moves.
pub const CONTENT_WEIGHT: f64 = 0.4;
/// Credit for a moved value: kind and content are identical.
pub const MOVED_BASE: f64 = 0.6;

/// Similarity of replacing `old` with `new` at one position.
pub fn modified_similarity(old: &Value, new: &Value) -> f64 {
    let mut similarity = SAME_POSITION;
    if old.same_kind(new) {
        similarity += SAME_KIND;
        match (old, new) {
            (Value::String(a), Value::String(b)) => {
                similarity += CONTENT_WEIGHT * string_similarity(a, b);
            }
            (Value::Number(a), Value::Number(b)) => {
                similarity += CONTENT_WEIGHT * number_ratio(*a, *b);
            }
            _ => {}
        }
    }
    similarity
}

/// Similarity of a value that moved from `old_index` to `new_index`.
pub fn moved_similarity(old_index: usize, new_index: usize) -> f64 {
    MOVED_BASE + CONTENT_WEIGHT * index_ratio(old_index, new_index)
}

/// Arithmetic mean of the similarities of `deltas`, or 0 for an empty slice.
pub fn deltas_similarity(deltas: &[Delta]) -> f64 {
    if deltas.is_empty() {
        return 0.0;
    }
    deltas.iter().map(Delta::similarity).sum::<f64>() / deltas.len() as f64
}

/// `(l / len(a)) * (l / len(b))` where `l` is the character-level LCS length.
///
/// Lengths are counted in characters. Two empty strings score 1, a single
/// empty string scores 0.
pub fn string_similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 1.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }
    let matching = lcs_length(&a, &b, |x, y| x == y) as f64;
    (matching / a.len() as f64) * (matching / b.len() as f64)
}

/// Symmetric ratio `min(a/b, b/a)` of two numbers.
///
/// Equal numbers score 1. Zero against non-zero, and numbers of opposite
/// sign, score 0. NaN scores 1 against NaN and 0 against anything else.
pub fn number_ratio(a: f64, b: f64) -> f64 {
    if a == b || (a.is_nan() && b.is_nan()) {
        return 1.0;
    }
    if a.is_nan() || b.is_nan() || a == 0.0 || b == 0.0 || a.is_sign_negative() != b.is_sign_negative() {
        return 0.0;
    }
    let ratio = a.abs().min(b.abs()) / a.abs().max(b.abs());
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Symmetric ratio of two indices, with the same zero rule as [`number_ratio`].
pub fn index_ratio(a: usize, b: usize) -> f64 {
    number_ratio(a as f64, b as f64)
}
