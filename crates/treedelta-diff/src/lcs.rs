//! Longest common subsequence over an arbitrary equality predicate.
//!
//! Used for array anchoring (structural equality of elements) and for string
//! similarity (equality of characters).

/// A pair of indices into the left and right sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct IndexPair {
    pub left: usize,
    pub right: usize,
}

/// Length of an LCS of `left` and `right`.
pub fn lcs_length<T, F>(left: &[T], right: &[T], eq: F) -> usize
where
    F: Fn(&T, &T) -> bool,
{
    build_table(left, right, &eq)[left.len()][right.len()]
}

/// Index pairs of one LCS of `left` and `right`, in ascending order.
///
/// Backtracks from `(n, m)`: equal elements step diagonally, otherwise the
/// walk steps in the left direction whenever that keeps the length
/// (`table[x - 1][y] >= table[x][y - 1]`). The tie rule fixes which LCS is
/// returned when several exist.
pub fn lcs_index_pairs<T, F>(left: &[T], right: &[T], eq: F) -> Vec<IndexPair>
where
    F: Fn(&T, &T) -> bool,
{
    let table = build_table(left, right, &eq);
    let mut pairs = Vec::with_capacity(table[left.len()][right.len()]);

    let (mut x, mut y) = (left.len(), right.len());
    while x > 0 && y > 0 {
        if eq(&left[x - 1], &right[y - 1]) {
            pairs.push(IndexPair {
                left: x - 1,
                right: y - 1,
            });
            x -= 1;
            y -= 1;
        } else if table[x - 1][y] >= table[x][y - 1] {
            x -= 1;
        } else {
            y -= 1;
        }
    }

    pairs.reverse();
    pairs
}

fn build_table<T, F>(left: &[T], right: &[T], eq: &F) -> Vec<Vec<usize>>
where
    F: Fn(&T, &T) -> bool,
{
    let mut table = vec![vec![0usize; right.len() + 1]; left.len() + 1];
    for x in 1..=left.len() {
        for y in 1..=right.len() {
            table[x][y] = if eq(&left[x - 1], &right[y - 1]) {
                table[x - 1][y - 1] + 1
            } else {
                table[x - 1][y].max(table[x][y - 1])
            };
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn pairs(raw: &[(usize, usize)]) -> Vec<IndexPair> {
        raw.iter()
            .map(|&(left, right)| IndexPair { left, right })
            .collect()
    }

    #[test]
    fn length_of_classic_example() {
        assert_eq!(lcs_length(&chars("ABCBDAB"), &chars("BDCABA"), |a, b| a == b), 4);
    }

    #[test]
    fn empty_inputs() {
        let empty: Vec<char> = Vec::new();
        assert_eq!(lcs_length(&empty, &chars("abc"), |a, b| a == b), 0);
        assert!(lcs_index_pairs(&chars("abc"), &empty, |a, b| a == b).is_empty());
    }

    #[test]
    fn identical_sequences_pair_every_index() {
        let s = chars("abcd");
        assert_eq!(
            lcs_index_pairs(&s, &s, |a, b| a == b),
            pairs(&[(0, 0), (1, 1), (2, 2), (3, 3)])
        );
    }

    #[test]
    fn rotation_keeps_the_longer_run() {
        let left = chars("abc");
        let right = chars("cab");
        assert_eq!(
            lcs_index_pairs(&left, &right, |a, b| a == b),
            pairs(&[(0, 1), (1, 2)])
        );
    }

    #[test]
    fn ties_step_in_the_left_direction() {
        // Both "a" and "b" are an LCS of length 1; stepping left first keeps
        // the later left element.
        let left = chars("ab");
        let right = chars("ba");
        assert_eq!(
            lcs_index_pairs(&left, &right, |a, b| a == b),
            pairs(&[(0, 1)])
        );
    }

    #[test]
    fn table_dimensions() {
        let table = build_table(&chars("ab"), &chars("abc"), &|a: &char, b: &char| a == b);
        assert_eq!(table.len(), 3);
        assert!(table.iter().all(|row| row.len() == 4));
        assert_eq!(table[2][3], 2);
    }

    #[test]
    fn custom_predicate() {
        let left = vec![1, 2, 3];
        let right = vec![11, 22, 33];
        assert_eq!(lcs_length(&left, &right, |a, b| a % 10 == b % 10), 3);
    }
}
