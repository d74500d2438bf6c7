use std::collections::BTreeSet;

use proptest::prelude::*;
use ruby_tree::RBTreeSet;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates random values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of insert/remove/contains operations on both
    /// RBTreeSet and BTreeSet and asserts identical results at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    let rb_result = rb_set.insert(*v);
                    let bt_result = bt_set.insert(*v);
                    prop_assert_eq!(rb_result, bt_result, "insert({})", v);
                }
                SetOp::Remove(v) => {
                    let rb_result = rb_set.remove(v);
                    let bt_result = bt_set.remove(v);
                    prop_assert_eq!(rb_result, bt_result, "remove({})", v);
                }
                SetOp::Contains(v) => {
                    let rb_result = rb_set.contains(v);
                    let bt_result = bt_set.contains(v);
                    prop_assert_eq!(rb_result, bt_result, "contains({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(rb_set.first(), bt_set.first(), "first()");
                }
                SetOp::Last => {
                    prop_assert_eq!(rb_set.last(), bt_set.last(), "last()");
                }
                SetOp::PopFirst => {
                    prop_assert_eq!(rb_set.pop_first(), bt_set.pop_first(), "pop_first()");
                }
                SetOp::PopLast => {
                    prop_assert_eq!(rb_set.pop_last(), bt_set.pop_last(), "pop_last()");
                }
            }
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(rb_set.is_empty(), bt_set.is_empty(), "is_empty mismatch after {:?}", op);
        }
    }

    /// Tests that iteration order matches BTreeSet after random insertions.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        // Forward iteration
        let rb_items: Vec<_> = rb_set.iter().copied().collect();
        let bt_items: Vec<_> = bt_set.iter().copied().collect();
        prop_assert_eq!(&rb_items, &bt_items, "iter() mismatch");

        // Reverse iteration
        let rb_rev: Vec<_> = rb_set.iter().rev().copied().collect();
        let bt_rev: Vec<_> = bt_set.iter().rev().copied().collect();
        prop_assert_eq!(&rb_rev, &bt_rev, "iter().rev() mismatch");

        // into_iter
        let rb_into: Vec<_> = rb_set.clone().into_iter().collect();
        let bt_into: Vec<_> = bt_set.clone().into_iter().collect();
        prop_assert_eq!(&rb_into, &bt_into, "into_iter() mismatch");
    }

    /// Draining via pop_first empties the set in ascending order.
    #[test]
    fn drain_via_pop_first(values in proptest::collection::vec(value_strategy(), 1..1_000usize)) {
        let mut rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let mut drained = Vec::with_capacity(rb_set.len());
        while let Some(v) = rb_set.pop_first() {
            drained.push(v);
        }
        prop_assert!(rb_set.is_empty());
        prop_assert_eq!(rb_set.len(), 0);

        let mut expected: Vec<i64> = values;
        expected.sort_unstable();
        expected.dedup();
        prop_assert_eq!(drained, expected);
    }
}

// ─── Scenario tests ──────────────────────────────────────────────────────────

#[test]
fn insertion_yields_sorted_iteration() {
    let mut set = RBTreeSet::new();
    for key in [5, 3, 8, 1, 4, 7, 9] {
        assert!(set.insert(key));
    }
    let items: Vec<_> = set.iter().copied().collect();
    assert_eq!(items, [1, 3, 4, 5, 7, 8, 9]);
    // Decrementing from the end yields the maximum.
    assert_eq!(set.iter().next_back(), Some(&9));
}

#[test]
fn duplicate_insert_is_rejected_without_change() {
    let mut set = RBTreeSet::new();
    assert!(set.insert(42));
    assert!(!set.insert(42));
    assert_eq!(set.len(), 1);
}

#[test]
fn insert_many_reports_per_value_results() {
    let mut set = RBTreeSet::new();
    let results = set.insert_many([5, 3, 5, 1]);
    assert_eq!(results, [true, true, false, true]);
    // No rollback: the rejected duplicate left earlier inserts in place.
    assert_eq!(set.len(), 3);
}

#[test]
fn merge_copies_and_skips_duplicates() {
    let mut a = RBTreeSet::from([1, 2, 3]);
    let b = RBTreeSet::from([3, 4, 5]);
    a.merge(&b);
    let items: Vec<_> = a.iter().copied().collect();
    assert_eq!(items, [1, 2, 3, 4, 5]);
    // The source keeps its elements.
    assert_eq!(b.len(), 3);
}

#[test]
fn clone_is_independent() {
    let mut original = RBTreeSet::from([1, 2, 3]);
    let copy = original.clone();
    original.remove(&2);
    assert_eq!(original.len(), 2);
    assert_eq!(copy.len(), 3);
    assert!(copy.contains(&2));
}

#[test]
fn comparison_and_hash_follow_contents() {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let a = RBTreeSet::from([3, 1, 2]);
    let b = RBTreeSet::from([1, 2, 3]);
    assert_eq!(a, b);

    let hash = |set: &RBTreeSet<i32>| {
        let mut hasher = DefaultHasher::new();
        set.hash(&mut hasher);
        hasher.finish()
    };
    assert_eq!(hash(&a), hash(&b));

    let c = RBTreeSet::from([1, 2, 4]);
    assert_ne!(a, c);
    assert!(a < c);
}

#[test]
fn max_size_is_positive_bound() {
    let set: RBTreeSet<i32> = RBTreeSet::new();
    assert!(set.max_size() > 0);
    assert!(set.len() <= set.max_size());
}
