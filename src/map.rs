//! Persistent hash map and its transient builder.

use std::fmt;
use std::hash::Hash;
use std::ops;

use archery::{ArcK, RcK, SharedPointer, SharedPointerKind};

use crate::error::KeyNotFound;
use crate::hash::hash_one;
use crate::iter::{EntryIter, Iter, Keys, Values};
use crate::node::{Entry, Node};
use crate::ops::insert::{insert, insert_mut};
use crate::ops::lookup::lookup;
use crate::ops::remove::{RemoveOutcome, remove, remove_mut};
use crate::ops::xor::xor_mut;

/// Persistent hash map on a hash array mapped trie.
///
/// Updates return a new map sharing all unchanged subtrees with the
/// original, which stays observationally untouched. `clone` is O(1).
///
/// Values are held by pointer and never cloned by the map; state reachable
/// through a stored value that is mutated externally is visible through
/// every map version containing that entry.
pub struct HamtMap<K, V, P: SharedPointerKind = RcK> {
    root: SharedPointer<Node<K, V, P>, P>,
    size: usize,
}

/// [`HamtMap`] backed by `Arc` pointers; `Send + Sync` for sendable
/// key and value types, so any number of threads may read it concurrently.
pub type HamtMapSync<K, V> = HamtMap<K, V, ArcK>;

// ---------------------------------------------------------------------------
// Construction & accessors — no trait bounds
// ---------------------------------------------------------------------------

impl<K, V> HamtMap<K, V> {
    /// Creates an empty map backed by `Rc` pointers.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, V> HamtMapSync<K, V> {
    /// Creates an empty map backed by `Arc` pointers.
    #[must_use]
    pub fn new_sync() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, V, P: SharedPointerKind> HamtMap<K, V, P> {
    /// Creates an empty map with the pointer kind chosen by `P`.
    #[must_use]
    pub fn new_with_ptr_kind() -> Self {
        Self {
            root: SharedPointer::new(Node::Empty),
            size: 0,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns an iterator over `(&K, &V)` pairs.
    ///
    /// Entries come out in hash-fragment traversal order — deterministic
    /// for a given key set, unrelated to key order or insertion order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, P> {
        Iter::new(self.entries())
    }

    /// Returns an iterator over the keys.
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, P> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values.
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, P> {
        self.iter().map(|(_, value)| value)
    }

    /// Returns a transient builder seeded with this map's contents.
    ///
    /// The transient starts by sharing this map's root; its first mutation
    /// along any path copies exactly the shared nodes on that path.
    #[must_use]
    pub fn transient(&self) -> TransientHamtMap<K, V, P> {
        TransientHamtMap {
            root: SharedPointer::clone(&self.root),
            size: self.size,
        }
    }

    pub(crate) fn entries(&self) -> EntryIter<'_, K, V, P> {
        EntryIter::new(&self.root, self.size)
    }
}

// ---------------------------------------------------------------------------
// Read & write operations — K: Eq + Hash
// ---------------------------------------------------------------------------

impl<K: Eq + Hash, V, P: SharedPointerKind> HamtMap<K, V, P> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        lookup(&self.root, hash_one(key), key, 0).map(|entry| &entry.value)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a new map with `key` associated to `value`.
    ///
    /// An existing association for the same key is overridden.
    #[must_use]
    pub fn insert(&self, key: K, value: V) -> Self {
        let entry = SharedPointer::new(Entry::new(key, value));
        let outcome = insert(&self.root, entry, 0);
        Self {
            root: SharedPointer::new(outcome.node),
            size: self.size + usize::from(outcome.inserted),
        }
    }

    /// Returns a new map without `key`, silently returning an unchanged
    /// map if the key was absent.
    #[must_use]
    pub fn discard(&self, key: &K) -> Self {
        match remove(&self.root, hash_one(key), key, 0) {
            RemoveOutcome::NotFound => self.clone(),
            RemoveOutcome::Removed(root) => Self {
                root: SharedPointer::new(root),
                size: self.size - 1,
            },
        }
    }

    /// Returns the union of two maps.
    ///
    /// On a key present in both, the entry of `other` wins.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        let mut root = SharedPointer::clone(&self.root);
        let mut size = self.size;
        for entry in other.entries() {
            if insert_mut(&mut root, SharedPointer::clone(entry), 0) {
                size += 1;
            }
        }
        Self { root, size }
    }

    /// Returns the intersection of two maps.
    ///
    /// Keeps the keys present in both; the values come from `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut root: SharedPointer<Node<K, V, P>, P> = SharedPointer::new(Node::Empty);
        let mut size = 0;
        for entry in other.entries() {
            if self.contains_key(&entry.key) {
                insert_mut(&mut root, SharedPointer::clone(entry), 0);
                size += 1;
            }
        }
        Self { root, size }
    }

    /// Returns the symmetric difference of two maps: the entries whose key
    /// is present in exactly one of the two.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let mut root = SharedPointer::clone(&self.root);
        let mut size = self.size;
        for entry in other.entries() {
            if xor_mut(&mut root, SharedPointer::clone(entry), 0) {
                size += 1;
            } else {
                size -= 1;
            }
        }
        Self { root, size }
    }
}

// ---------------------------------------------------------------------------
// Failing lookups — K: Clone so the error can carry the key
// ---------------------------------------------------------------------------

impl<K: Eq + Hash + Clone, V, P: SharedPointerKind> HamtMap<K, V, P> {
    /// Returns the value associated with `key`, or [`KeyNotFound`].
    pub fn lookup(&self, key: &K) -> Result<&V, KeyNotFound<K>> {
        self.get(key).ok_or_else(|| KeyNotFound(key.clone()))
    }

    /// Returns a new map without `key`.
    ///
    /// Removing an absent key is an error; use [`discard`](Self::discard)
    /// to drop a key that may not be present.
    pub fn remove(&self, key: &K) -> Result<Self, KeyNotFound<K>> {
        match remove(&self.root, hash_one(key), key, 0) {
            RemoveOutcome::NotFound => Err(KeyNotFound(key.clone())),
            RemoveOutcome::Removed(root) => Ok(Self {
                root: SharedPointer::new(root),
                size: self.size - 1,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls — manual where derives would demand false bounds
// ---------------------------------------------------------------------------

impl<K, V, P: SharedPointerKind> Clone for HamtMap<K, V, P> {
    fn clone(&self) -> Self {
        Self {
            root: SharedPointer::clone(&self.root),
            size: self.size,
        }
    }
}

impl<K, V, P: SharedPointerKind> Default for HamtMap<K, V, P> {
    fn default() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, V, P: SharedPointerKind> fmt::Debug for HamtMap<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HamtMap")
            .field("len", &self.size)
            .finish_non_exhaustive()
    }
}

impl<K, V, PO, P> PartialEq<HamtMap<K, V, PO>> for HamtMap<K, V, P>
where
    K: Eq + Hash,
    V: PartialEq,
    PO: SharedPointerKind,
    P: SharedPointerKind,
{
    fn eq(&self, other: &HamtMap<K, V, PO>) -> bool {
        // Containment rather than a zipped walk: inside a collision node
        // the entry order depends on insertion history.
        self.size == other.size && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K: Eq + Hash, V: Eq, P: SharedPointerKind> Eq for HamtMap<K, V, P> {}

impl<K: Eq + Hash, V, P: SharedPointerKind> ops::Index<&K> for HamtMap<K, V, P> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K: Eq + Hash, V, P: SharedPointerKind> FromIterator<(K, V)> for HamtMap<K, V, P> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut transient = TransientHamtMap::new_with_ptr_kind();
        for (key, value) in iter {
            transient.insert(key, value);
        }
        transient.persist()
    }
}

impl<'a, K, V, P: SharedPointerKind> IntoIterator for &'a HamtMap<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, P>;

    fn into_iter(self) -> Iter<'a, K, V, P> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Transient
// ---------------------------------------------------------------------------

/// Thread-confined builder view of a [`HamtMap`].
///
/// Mutating calls edit nodes in place once they are uniquely owned by this
/// transient; nodes still shared with persistent maps are copied on first
/// touch, so those maps never change. [`persist`](Self::persist) consumes
/// the transient — using it afterwards is a compile error, which is this
/// crate's enforcement of the use-after-persist contract.
pub struct TransientHamtMap<K, V, P: SharedPointerKind = RcK> {
    root: SharedPointer<Node<K, V, P>, P>,
    size: usize,
}

/// [`TransientHamtMap`] backed by `Arc` pointers.
pub type TransientHamtMapSync<K, V> = TransientHamtMap<K, V, ArcK>;

impl<K, V> TransientHamtMap<K, V> {
    /// Creates an empty transient map backed by `Rc` pointers.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, V> TransientHamtMapSync<K, V> {
    /// Creates an empty transient map backed by `Arc` pointers.
    #[must_use]
    pub fn new_sync() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, V, P: SharedPointerKind> TransientHamtMap<K, V, P> {
    /// Creates an empty transient map with the pointer kind chosen by `P`.
    #[must_use]
    pub fn new_with_ptr_kind() -> Self {
        Self {
            root: SharedPointer::new(Node::Empty),
            size: 0,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Freezes the transient into a persistent map.
    ///
    /// Consumes `self`; the transient cannot be touched again.
    #[must_use]
    pub fn persist(self) -> HamtMap<K, V, P> {
        HamtMap {
            root: self.root,
            size: self.size,
        }
    }
}

impl<K: Eq + Hash, V, P: SharedPointerKind> TransientHamtMap<K, V, P> {
    /// Returns a reference to the value associated with `key`.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        lookup(&self.root, hash_one(key), key, 0).map(|entry| &entry.value)
    }

    /// Returns `true` if the map contains the given key.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Associates `key` with `value` in place, overriding any existing
    /// association.
    pub fn insert(&mut self, key: K, value: V) -> &mut Self {
        let entry = SharedPointer::new(Entry::new(key, value));
        if insert_mut(&mut self.root, entry, 0) {
            self.size += 1;
        }
        self
    }

    /// Removes `key` in place, doing nothing if it is absent.
    pub fn discard(&mut self, key: &K) -> &mut Self {
        if remove_mut(&mut self.root, hash_one(key), key, 0) {
            self.size -= 1;
        }
        self
    }
}

impl<K: Eq + Hash + Clone, V, P: SharedPointerKind> TransientHamtMap<K, V, P> {
    /// Returns the value associated with `key`, or [`KeyNotFound`].
    pub fn lookup(&self, key: &K) -> Result<&V, KeyNotFound<K>> {
        self.get(key).ok_or_else(|| KeyNotFound(key.clone()))
    }

    /// Removes `key` in place.
    ///
    /// Removing an absent key is an error; use [`discard`](Self::discard)
    /// to drop a key that may not be present.
    pub fn remove(&mut self, key: &K) -> Result<&mut Self, KeyNotFound<K>> {
        if remove_mut(&mut self.root, hash_one(key), key, 0) {
            self.size -= 1;
            Ok(self)
        } else {
            Err(KeyNotFound(key.clone()))
        }
    }
}

impl<K, V, P: SharedPointerKind> Default for TransientHamtMap<K, V, P> {
    fn default() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, V, P: SharedPointerKind> fmt::Debug for TransientHamtMap<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientHamtMap")
            .field("len", &self.size)
            .finish_non_exhaustive()
    }
}

impl<K: Eq + Hash, V, P: SharedPointerKind> Extend<(K, V)> for TransientHamtMap<K, V, P> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
