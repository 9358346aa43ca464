//! Persistent hash set and its transient builder.
//!
//! A thin wrapper over the map engine with `()` values; every structural
//! guarantee of [`HamtMap`] carries over unchanged.

use std::fmt;
use std::hash::Hash;

use archery::{ArcK, RcK, SharedPointerKind};

use crate::error::KeyNotFound;
use crate::iter::Keys;
use crate::map::{HamtMap, TransientHamtMap};

/// Persistent hash set on a hash array mapped trie.
pub struct HamtSet<K, P: SharedPointerKind = RcK> {
    map: HamtMap<K, (), P>,
}

/// [`HamtSet`] backed by `Arc` pointers.
pub type HamtSetSync<K> = HamtSet<K, ArcK>;

impl<K> HamtSet<K> {
    /// Creates an empty set backed by `Rc` pointers.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K> HamtSetSync<K> {
    /// Creates an empty set backed by `Arc` pointers.
    #[must_use]
    pub fn new_sync() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, P: SharedPointerKind> HamtSet<K, P> {
    /// Creates an empty set with the pointer kind chosen by `P`.
    #[must_use]
    pub fn new_with_ptr_kind() -> Self {
        Self {
            map: HamtMap::new_with_ptr_kind(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns an iterator over the elements, in unspecified order.
    #[must_use]
    pub fn iter(&self) -> Keys<'_, K, (), P> {
        self.map.keys()
    }

    /// Returns a transient builder seeded with this set's contents.
    #[must_use]
    pub fn transient(&self) -> TransientHamtSet<K, P> {
        TransientHamtSet {
            map: self.map.transient(),
        }
    }
}

impl<K: Eq + Hash, P: SharedPointerKind> HamtSet<K, P> {
    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Returns a new set with `key` added.
    #[must_use]
    pub fn insert(&self, key: K) -> Self {
        Self {
            map: self.map.insert(key, ()),
        }
    }

    /// Returns a new set without `key`, silently returning an unchanged
    /// set if the key was absent.
    #[must_use]
    pub fn discard(&self, key: &K) -> Self {
        Self {
            map: self.map.discard(key),
        }
    }

    /// Returns the union of two sets.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            map: self.map.union(&other.map),
        }
    }

    /// Returns the intersection of two sets.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self {
            map: self.map.intersection(&other.map),
        }
    }

    /// Returns the symmetric difference of two sets: the elements present
    /// in exactly one of the two.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self {
            map: self.map.symmetric_difference(&other.map),
        }
    }
}

impl<K: Eq + Hash + Clone, P: SharedPointerKind> HamtSet<K, P> {
    /// Returns a new set without `key`.
    ///
    /// Removing an absent key is an error; use [`discard`](Self::discard)
    /// to drop a key that may not be present.
    pub fn remove(&self, key: &K) -> Result<Self, KeyNotFound<K>> {
        Ok(Self {
            map: self.map.remove(key)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, P: SharedPointerKind> Clone for HamtSet<K, P> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<K, P: SharedPointerKind> Default for HamtSet<K, P> {
    fn default() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, P: SharedPointerKind> fmt::Debug for HamtSet<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HamtSet")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<K, PO, P> PartialEq<HamtSet<K, PO>> for HamtSet<K, P>
where
    K: Eq + Hash,
    PO: SharedPointerKind,
    P: SharedPointerKind,
{
    fn eq(&self, other: &HamtSet<K, PO>) -> bool {
        self.map == other.map
    }
}

impl<K: Eq + Hash, P: SharedPointerKind> Eq for HamtSet<K, P> {}

impl<K: Eq + Hash, P: SharedPointerKind> FromIterator<K> for HamtSet<K, P> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut transient = TransientHamtSet::new_with_ptr_kind();
        for key in iter {
            transient.insert(key);
        }
        transient.persist()
    }
}

impl<'a, K, P: SharedPointerKind> IntoIterator for &'a HamtSet<K, P> {
    type Item = &'a K;
    type IntoIter = Keys<'a, K, (), P>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Transient
// ---------------------------------------------------------------------------

/// Thread-confined builder view of a [`HamtSet`].
///
/// Same copy-on-first-touch behavior as [`TransientHamtMap`];
/// [`persist`](Self::persist) consumes the transient, so use-after-persist
/// is a compile error.
pub struct TransientHamtSet<K, P: SharedPointerKind = RcK> {
    map: TransientHamtMap<K, (), P>,
}

/// [`TransientHamtSet`] backed by `Arc` pointers.
pub type TransientHamtSetSync<K> = TransientHamtSet<K, ArcK>;

impl<K> TransientHamtSet<K> {
    /// Creates an empty transient set backed by `Rc` pointers.
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K> TransientHamtSetSync<K> {
    /// Creates an empty transient set backed by `Arc` pointers.
    #[must_use]
    pub fn new_sync() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, P: SharedPointerKind> TransientHamtSet<K, P> {
    /// Creates an empty transient set with the pointer kind chosen by `P`.
    #[must_use]
    pub fn new_with_ptr_kind() -> Self {
        Self {
            map: TransientHamtMap::new_with_ptr_kind(),
        }
    }

    /// Returns the number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Freezes the transient into a persistent set.
    ///
    /// Consumes `self`; the transient cannot be touched again.
    #[must_use]
    pub fn persist(self) -> HamtSet<K, P> {
        HamtSet {
            map: self.map.persist(),
        }
    }
}

impl<K: Eq + Hash, P: SharedPointerKind> TransientHamtSet<K, P> {
    /// Returns `true` if the set contains `key`.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Adds `key` in place.
    pub fn insert(&mut self, key: K) -> &mut Self {
        self.map.insert(key, ());
        self
    }

    /// Removes `key` in place, doing nothing if it is absent.
    pub fn discard(&mut self, key: &K) -> &mut Self {
        self.map.discard(key);
        self
    }
}

impl<K: Eq + Hash + Clone, P: SharedPointerKind> TransientHamtSet<K, P> {
    /// Removes `key` in place.
    ///
    /// Removing an absent key is an error; use [`discard`](Self::discard)
    /// to drop a key that may not be present.
    pub fn remove(&mut self, key: &K) -> Result<&mut Self, KeyNotFound<K>> {
        self.map.remove(key)?;
        Ok(self)
    }
}

impl<K, P: SharedPointerKind> Default for TransientHamtSet<K, P> {
    fn default() -> Self {
        Self::new_with_ptr_kind()
    }
}

impl<K, P: SharedPointerKind> fmt::Debug for TransientHamtSet<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransientHamtSet")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<K: Eq + Hash, P: SharedPointerKind> Extend<K> for TransientHamtSet<K, P> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}
