//! Key hashing.
//!
//! Every key is hashed exactly once, on entry construction, and the 64-bit
//! result is stored alongside it. The unkeyed [`DefaultHasher`] is
//! deterministic across map instances, which traversal order and the
//! trie-shape guarantees depend on.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Computes the 64-bit hash of a key using the standard hasher.
#[must_use]
pub fn hash_one<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
