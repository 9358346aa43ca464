use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{HamtMap, HamtSet};

#[test]
fn union_right_operand_wins() {
    let a: HamtMap<&str, i32> = [("k1", 1), ("k2", 2)].into_iter().collect();
    let b: HamtMap<&str, i32> = [("k2", 20), ("k3", 30)].into_iter().collect();

    let joined = a.union(&b);
    assert_eq!(joined.len(), 3);
    assert_eq!(joined.get(&"k1"), Some(&1));
    assert_eq!(joined.get(&"k2"), Some(&20));
    assert_eq!(joined.get(&"k3"), Some(&30));
}

#[test]
fn intersection_takes_right_values() {
    let a: HamtMap<&str, i32> = [("k1", 1), ("k2", 2)].into_iter().collect();
    let b: HamtMap<&str, i32> = [("k2", 20), ("k3", 30)].into_iter().collect();

    let common = a.intersection(&b);
    assert_eq!(common.len(), 1);
    assert_eq!(common.get(&"k2"), Some(&20));
    assert!(!common.contains_key(&"k1"));
    assert!(!common.contains_key(&"k3"));
}

#[test]
fn symmetric_difference_drops_common_keys() {
    let a: HamtMap<&str, i32> = [("k1", 1), ("k2", 2)].into_iter().collect();
    let b: HamtMap<&str, i32> = [("k2", 20), ("k3", 30)].into_iter().collect();

    let diff = a.symmetric_difference(&b);
    assert_eq!(diff.len(), 2);
    assert_eq!(diff.get(&"k1"), Some(&1));
    assert_eq!(diff.get(&"k3"), Some(&30));
    assert!(!diff.contains_key(&"k2"));
}

#[test]
fn identities_with_empty() {
    let a: HamtMap<i32, i32> = (0..20).map(|i| (i, i)).collect();
    let empty: HamtMap<i32, i32> = HamtMap::new();

    assert_eq!(a.union(&empty), a);
    assert_eq!(empty.union(&a), a);
    assert!(a.intersection(&empty).is_empty());
    assert_eq!(a.symmetric_difference(&empty), a);
    assert_eq!(empty.symmetric_difference(&a), a);
}

#[test]
fn symmetric_difference_with_self_is_empty() {
    let a: HamtMap<i32, i32> = (0..50).map(|i| (i, i)).collect();
    let diff = a.symmetric_difference(&a.clone());
    assert!(diff.is_empty());
    assert_eq!(diff.iter().count(), 0);
}

fn random_pairs(rng: &mut StdRng, n: usize) -> Vec<(u32, u32)> {
    (0..n)
        .map(|_| (rng.gen_range(0..600), rng.r#gen()))
        .collect()
}

/// Union agrees with `HashMap::extend` over random inputs.
#[test]
fn union_matches_std() {
    let mut rng = StdRng::seed_from_u64(7);
    let left = random_pairs(&mut rng, 400);
    let right = random_pairs(&mut rng, 400);

    let a: HamtMap<u32, u32> = left.iter().copied().collect();
    let b: HamtMap<u32, u32> = right.iter().copied().collect();
    let joined = a.union(&b);

    let mut expect: HashMap<u32, u32> = left.into_iter().collect();
    expect.extend(right);

    assert_eq!(joined.len(), expect.len());
    for (key, value) in &expect {
        assert_eq!(joined.get(key), Some(value));
    }
}

#[test]
fn intersection_matches_std() {
    let mut rng = StdRng::seed_from_u64(8);
    let left = random_pairs(&mut rng, 400);
    let right = random_pairs(&mut rng, 400);

    let a: HamtMap<u32, u32> = left.iter().copied().collect();
    let b: HamtMap<u32, u32> = right.iter().copied().collect();
    let common = a.intersection(&b);

    let la: HashMap<u32, u32> = left.into_iter().collect();
    let rb: HashMap<u32, u32> = right.into_iter().collect();
    let expect: HashMap<u32, u32> = rb
        .iter()
        .filter(|(key, _)| la.contains_key(key))
        .map(|(k, v)| (*k, *v))
        .collect();

    assert_eq!(common.len(), expect.len());
    for (key, value) in &expect {
        assert_eq!(common.get(key), Some(value));
    }
}

#[test]
fn symmetric_difference_matches_std() {
    let mut rng = StdRng::seed_from_u64(9);
    let left = random_pairs(&mut rng, 400);
    let right = random_pairs(&mut rng, 400);

    let a: HamtMap<u32, u32> = left.iter().copied().collect();
    let b: HamtMap<u32, u32> = right.iter().copied().collect();
    let diff = a.symmetric_difference(&b);

    let la: HashMap<u32, u32> = left.into_iter().collect();
    let rb: HashMap<u32, u32> = right.into_iter().collect();
    let mut expect: HashMap<u32, u32> = HashMap::new();
    for (k, v) in &la {
        if !rb.contains_key(k) {
            expect.insert(*k, *v);
        }
    }
    for (k, v) in &rb {
        if !la.contains_key(k) {
            expect.insert(*k, *v);
        }
    }

    assert_eq!(diff.len(), expect.len());
    for (key, value) in &expect {
        assert_eq!(diff.get(key), Some(value));
    }
}

/// Set algebra over random element sets, mirrored against `HashSet`.
#[test]
fn set_algebra_matches_std() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut some: HashSet<u32> = (0..800).map(|_| rng.gen_range(0..1500)).collect();
    some.extend([1, 2, 3]);
    let mut other: HashSet<u32> = (0..800).map(|_| rng.gen_range(0..1500)).collect();
    other.extend([1, 3, 4]);

    let a: HamtSet<u32> = some.iter().copied().collect();
    let b: HamtSet<u32> = other.iter().copied().collect();

    let union: HashSet<u32> = a.union(&b).iter().copied().collect();
    assert_eq!(union, &some | &other);

    let intersection: HashSet<u32> = a.intersection(&b).iter().copied().collect();
    assert_eq!(intersection, &some & &other);

    let difference: HashSet<u32> = a.symmetric_difference(&b).iter().copied().collect();
    assert_eq!(difference, &some ^ &other);
}

/// Set-algebra results are persistent values too — the operands stay
/// untouched.
#[test]
fn operands_unchanged_by_set_algebra() {
    let a: HamtSet<i32> = (0..10).collect();
    let b: HamtSet<i32> = (5..15).collect();

    let _ = a.union(&b);
    let _ = a.intersection(&b);
    let _ = a.symmetric_difference(&b);

    assert_eq!(a.len(), 10);
    assert_eq!(b.len(), 10);
    assert!(a.contains(&0) && !a.contains(&10));
    assert!(b.contains(&14) && !b.contains(&4));
}
