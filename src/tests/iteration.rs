use std::collections::HashSet;

use crate::{HamtMap, HamtSet};

#[test]
fn keys_values_entries_as_sets() {
    let map: HamtMap<&str, &str> = [("a", "hello"), ("b", "world")].into_iter().collect();

    let keys: HashSet<&str> = map.keys().copied().collect();
    assert_eq!(keys, HashSet::from(["a", "b"]));

    let values: HashSet<&str> = map.values().copied().collect();
    assert_eq!(values, HashSet::from(["hello", "world"]));

    let entries: HashSet<(&str, &str)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, HashSet::from([("a", "hello"), ("b", "world")]));
}

#[test]
fn empty_iteration() {
    let map: HamtMap<i32, i32> = HamtMap::new();
    assert_eq!(map.iter().count(), 0);
    assert_eq!(map.keys().count(), 0);
    assert_eq!(map.values().count(), 0);
}

/// One entry per live key: the yielded count is inserts minus removes.
#[test]
fn count_matches_len() {
    let mut map = HamtMap::new();
    for i in 0..100 {
        map = map.insert(i, i);
    }
    for i in 0..30 {
        map = map.remove(&i).unwrap();
    }
    assert_eq!(map.len(), 70);
    assert_eq!(map.iter().count(), 70);

    let seen: HashSet<i32> = map.keys().copied().collect();
    assert_eq!(seen, (30..100).collect::<HashSet<i32>>());
}

#[test]
fn exact_size_hint() {
    let map: HamtMap<i32, i32> = (0..40).map(|i| (i, i)).collect();
    let iter = map.iter();
    assert_eq!(iter.len(), 40);
    assert_eq!(iter.size_hint(), (40, Some(40)));
}

/// The iterator is lazy — taking a prefix works without walking the rest.
#[test]
fn take_prefix() {
    let map: HamtMap<i32, i32> = (0..1000).map(|i| (i, i)).collect();
    let first_three: Vec<(&i32, &i32)> = map.iter().take(3).collect();
    assert_eq!(first_three.len(), 3);
}

/// Traversal order is dictated by hash fragments, so two maps holding the
/// same keys walk them in the same order.
#[test]
fn order_deterministic_for_equal_contents() {
    let forward: HamtMap<i32, i32> = (0..200).map(|i| (i, i)).collect();
    let backward: HamtMap<i32, i32> = (0..200).rev().map(|i| (i, i)).collect();

    let a: Vec<i32> = forward.keys().copied().collect();
    let b: Vec<i32> = backward.keys().copied().collect();
    assert_eq!(a, b);
}

#[test]
fn into_iterator_for_reference() {
    let map: HamtMap<i32, i32> = (0..10).map(|i| (i, i * 2)).collect();
    let mut total = 0;
    for (key, value) in &map {
        assert_eq!(*value, key * 2);
        total += 1;
    }
    assert_eq!(total, 10);
}

#[test]
fn set_iteration() {
    let set: HamtSet<i32> = (0..50).collect();
    let seen: HashSet<i32> = set.iter().copied().collect();
    assert_eq!(seen, (0..50).collect::<HashSet<i32>>());
    assert_eq!((&set).into_iter().count(), 50);
}
