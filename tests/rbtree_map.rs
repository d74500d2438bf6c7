use std::collections::BTreeMap;

use proptest::prelude::*;
use ruby_tree::RBTreeMap;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 10_000;

/// Generates random keys in a range that ensures collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -20_000i64..20_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    InsertOrAssign(i64, i64),
    Remove(i64),
    Get(i64),
    FirstKeyValue,
    LastKeyValue,
    PopFirst,
    PopLast,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => (key_strategy(), any::<i64>()).prop_map(|(k, v)| MapOp::InsertOrAssign(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => Just(MapOp::FirstKeyValue),
        1 => Just(MapOp::LastKeyValue),
        1 => Just(MapOp::PopFirst),
        1 => Just(MapOp::PopLast),
    ]
}

// ─── Core CRUD operations ────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random operation sequence on both RBTreeMap and BTreeMap.
    /// `insert` is first-wins, so the model only changes on new keys;
    /// `insert_or_assign` matches the std overwrite behavior.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut rb_map: RBTreeMap<i64, i64> = RBTreeMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let inserted = rb_map.insert(*k, *v);
                    prop_assert_eq!(inserted, !bt_map.contains_key(k), "insert({})", k);
                    bt_map.entry(*k).or_insert(*v);
                }
                MapOp::InsertOrAssign(k, v) => {
                    let inserted = rb_map.insert_or_assign(*k, *v);
                    let previous = bt_map.insert(*k, *v);
                    prop_assert_eq!(inserted, previous.is_none(), "insert_or_assign({})", k);
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(rb_map.remove(k), bt_map.remove(k), "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(rb_map.get(k), bt_map.get(k), "get({})", k);
                    prop_assert_eq!(rb_map.contains_key(k), bt_map.contains_key(k));
                }
                MapOp::FirstKeyValue => {
                    prop_assert_eq!(rb_map.first_key_value(), bt_map.first_key_value());
                }
                MapOp::LastKeyValue => {
                    prop_assert_eq!(rb_map.last_key_value(), bt_map.last_key_value());
                }
                MapOp::PopFirst => {
                    prop_assert_eq!(rb_map.pop_first(), bt_map.pop_first());
                }
                MapOp::PopLast => {
                    prop_assert_eq!(rb_map.pop_last(), bt_map.pop_last());
                }
            }
            prop_assert_eq!(rb_map.len(), bt_map.len(), "len mismatch after {:?}", op);
        }

        // Final contents agree, in order.
        let rb_items: Vec<_> = rb_map.into_iter().collect();
        let bt_items: Vec<_> = bt_map.into_iter().collect();
        prop_assert_eq!(rb_items, bt_items);
    }

    /// Mutable iteration visits every entry exactly once, in key order.
    #[test]
    fn iter_mut_updates_all_values(keys in proptest::collection::btree_set(key_strategy(), 1..1_000usize)) {
        let mut rb_map: RBTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

        let mut visited = Vec::with_capacity(rb_map.len());
        for (k, v) in rb_map.iter_mut() {
            visited.push(*k);
            *v += 1;
        }
        let expected: Vec<i64> = keys.iter().copied().collect();
        prop_assert_eq!(visited, expected);

        for (&k, &v) in rb_map.iter() {
            prop_assert_eq!(v, k + 1);
        }
    }
}

// ─── Element access ──────────────────────────────────────────────────────────

#[test]
fn get_signals_missing_key() {
    let mut map = RBTreeMap::new();
    map.insert(1, 10);
    // The checked lookup reports absence without creating an entry.
    assert_eq!(map.get(&2), None);
    assert_eq!(map.len(), 1);
    // The indexed-or-created access materializes a default and hands back a
    // mutable reference.
    let slot = map.entry(2).or_default();
    assert_eq!(*slot, 0);
    *slot = 20;
    assert_eq!(map.len(), 2);
    assert_eq!(map[&2], 20);
}

#[test]
#[should_panic(expected = "no entry found for key")]
fn index_panics_on_missing_key() {
    let map: RBTreeMap<i32, i32> = RBTreeMap::from([(1, 10)]);
    let _ = map[&2];
}

#[test]
fn insert_is_first_wins() {
    let mut map = RBTreeMap::new();
    assert!(map.insert(1, "first"));
    assert!(!map.insert(1, "second"));
    assert_eq!(map[&1], "first");
    assert_eq!(map.len(), 1);
}

#[test]
fn insert_or_assign_overwrites() {
    let mut map = RBTreeMap::new();
    assert!(map.insert_or_assign(1, "first"));
    assert!(!map.insert_or_assign(1, "second"));
    assert_eq!(map[&1], "second");
    assert_eq!(map.len(), 1);
}

#[test]
fn insert_many_reports_per_entry_results() {
    let mut map = RBTreeMap::new();
    let results = map.insert_many([(1, "a"), (2, "b"), (1, "again")]);
    assert_eq!(results, [true, true, false]);
    assert_eq!(map.len(), 2);
    assert_eq!(map[&1], "a");
}

// ─── Entry API ───────────────────────────────────────────────────────────────

#[test]
fn entry_counts_occurrences() {
    let mut count: RBTreeMap<char, usize> = RBTreeMap::new();
    for c in "abracadabra".chars() {
        *count.entry(c).or_insert(0) += 1;
    }
    assert_eq!(count[&'a'], 5);
    assert_eq!(count[&'b'], 2);
    assert_eq!(count[&'r'], 2);
    assert_eq!(count[&'c'], 1);
    assert_eq!(count[&'d'], 1);
}

#[test]
fn occupied_entry_removal() {
    use ruby_tree::rbtree_map::Entry;

    let mut map = RBTreeMap::from([(1, "a"), (2, "b")]);
    match map.entry(1) {
        Entry::Occupied(entry) => {
            assert_eq!(entry.remove_entry(), (1, "a"));
        }
        Entry::Vacant(_) => panic!("key 1 must be occupied"),
    }
    assert_eq!(map.len(), 1);
    assert!(!map.contains_key(&1));
}

// ─── Merge, clone, ordering ──────────────────────────────────────────────────

#[test]
fn merge_keeps_existing_entries() {
    let mut a = RBTreeMap::from([(1, "a"), (3, "c")]);
    let b = RBTreeMap::from([(2, "b"), (3, "z")]);
    a.merge(&b);
    assert_eq!(a.len(), 3);
    assert_eq!(a[&2], "b");
    assert_eq!(a[&3], "c");
    // The source is left unchanged.
    assert_eq!(b.len(), 2);
    assert_eq!(b[&3], "z");
}

#[test]
fn clone_is_a_deep_copy() {
    let mut original = RBTreeMap::from([(1, String::from("a")), (2, String::from("b"))]);
    let copy = original.clone();
    original.get_mut(&1).unwrap().push('!');
    original.remove(&2);
    assert_eq!(copy[&1], "a");
    assert_eq!(copy.len(), 2);
}

#[test]
fn keys_and_values_iterate_in_key_order() {
    let map = RBTreeMap::from([(3, "c"), (1, "a"), (2, "b")]);
    let keys: Vec<_> = map.keys().copied().collect();
    let values: Vec<_> = map.values().copied().collect();
    assert_eq!(keys, [1, 2, 3]);
    assert_eq!(values, ["a", "b", "c"]);

    let pairs: Vec<_> = map.into_iter().collect();
    assert_eq!(pairs, [(1, "a"), (2, "b"), (3, "c")]);
}

#[test]
fn equality_ignores_insertion_order() {
    let a = RBTreeMap::from([(1, "a"), (2, "b")]);
    let b = RBTreeMap::from([(2, "b"), (1, "a")]);
    assert_eq!(a, b);
}
