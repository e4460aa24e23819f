//! Property tests over randomly generated value trees.

use proptest::prelude::*;

use treedelta_types::Value;

use crate::{apply, compare, compare_arrays, Delta, Diff};

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-3i32..4).prop_map(|n| Value::Number(f64::from(n))),
        Just(Value::Number(f64::NAN)),
        "[ab]{0,3}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..5).prop_map(Value::Array),
            prop::collection::btree_map("[xyz]", inner, 0..4).prop_map(Value::Object),
        ]
    })
}

fn arb_array() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(arb_value(), 0..7)
}

fn arb_container() -> impl Strategy<Value = Value> {
    prop_oneof![
        arb_array().prop_map(Value::Array),
        prop::collection::btree_map("[a-e]", arb_value(), 0..5).prop_map(Value::Object),
    ]
}

fn similarities_are_consistent(deltas: &[Delta]) -> bool {
    deltas.iter().all(|delta| {
        let s = delta.similarity();
        let in_range = s.is_finite() && s >= 0.0 && s <= 1.0 + 1e-12;
        let mean_ok = match delta.children() {
            Some(children) => {
                let mean = children.iter().map(Delta::similarity).sum::<f64>() / children.len() as f64;
                !children.is_empty() && (mean - s).abs() < 1e-9 && similarities_are_consistent(children)
            }
            None => match delta {
                Delta::Added { .. } | Delta::Deleted { .. } => s == 0.0,
                _ => true,
            },
        };
        in_range && mean_ok
    })
}

proptest! {
    #[test]
    fn comparing_a_value_with_itself_is_empty(v in arb_value()) {
        prop_assert!(compare(&v, &v).unwrap().is_empty());
    }

    #[test]
    fn comparison_is_deterministic(left in arb_container(), right in arb_container()) {
        if left.same_kind(&right) {
            let first = serde_json::to_string(&compare(&left, &right).unwrap()).unwrap();
            let second = serde_json::to_string(&compare(&left, &right).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }
    }

    #[test]
    fn applying_the_diff_rebuilds_the_right_value(left in arb_container(), right in arb_container()) {
        if left.same_kind(&right) {
            let diff = compare(&left, &right).unwrap();
            prop_assert_eq!(apply(&left, &diff).unwrap(), right);
        }
    }

    #[test]
    fn unreferenced_elements_form_a_common_subsequence(left in arb_array(), right in arb_array()) {
        let diff: Diff = compare_arrays(&left, &right).unwrap();
        let left_refs: Vec<usize> = diff.iter().filter_map(|d| d.left_position()?.as_index()).collect();
        let right_refs: Vec<usize> = diff.iter().filter_map(|d| d.right_position()?.as_index()).collect();

        let kept_left: Vec<&Value> = left
            .iter()
            .enumerate()
            .filter(|(i, _)| !left_refs.contains(i))
            .map(|(_, v)| v)
            .collect();
        let kept_right: Vec<&Value> = right
            .iter()
            .enumerate()
            .filter(|(i, _)| !right_refs.contains(i))
            .map(|(_, v)| v)
            .collect();
        prop_assert_eq!(kept_left, kept_right);
    }

    #[test]
    fn similarities_are_bounded_and_aggregate_as_means(left in arb_container(), right in arb_container()) {
        if left.same_kind(&right) {
            let diff = compare(&left, &right).unwrap();
            prop_assert!(similarities_are_consistent(&diff.deltas));
        }
    }
}
