use std::error::Error;

use crate::{HamtMap, HamtSet, KeyNotFound};

#[test]
fn default_is_empty() {
    let map: HamtMap<i32, i32> = HamtMap::default();
    assert!(map.is_empty());

    let set: HamtSet<i32> = HamtSet::default();
    assert!(set.is_empty());
}

#[test]
fn debug_format() {
    let map: HamtMap<i32, i32> = HamtMap::new();
    let dbg = format!("{map:?}");
    assert!(dbg.contains("HamtMap"));
    assert!(dbg.contains("len"));

    let set: HamtSet<i32> = HamtSet::new();
    assert!(format!("{set:?}").contains("HamtSet"));
}

#[test]
fn from_iterator() {
    let map: HamtMap<i32, i32> = vec![(1, 10), (2, 20), (3, 30)].into_iter().collect();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&1), Some(&10));

    let set: HamtSet<i32> = vec![1, 2, 3, 2].into_iter().collect();
    assert_eq!(set.len(), 3);
}

#[test]
fn index_existing() {
    let map = HamtMap::new().insert("key", 42);
    assert_eq!(map[&"key"], 42);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_panics() {
    let map: HamtMap<i32, i32> = HamtMap::new();
    let _ = map[&999];
}

#[test]
fn set_equality() {
    let a: HamtSet<i32> = (0..10).collect();
    let b: HamtSet<i32> = (0..10).rev().collect();
    let c: HamtSet<i32> = (0..11).collect();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn key_not_found_displays() {
    let err = KeyNotFound("missing");
    assert_eq!(err.to_string(), "key not found");
    assert_eq!(format!("{err:?}"), "KeyNotFound");
}

#[test]
fn key_not_found_is_std_error() {
    let err: Box<dyn Error> = Box::new(KeyNotFound(5_i32));
    assert_eq!(err.to_string(), "key not found");
}
