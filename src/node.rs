//! Trie node types and bitmap helpers.

use std::fmt;

use archery::{SharedPointer, SharedPointerKind};

use crate::dispatch::Dispatch;
use crate::hash::hash_one;

/// Bits of the hash consumed per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Branching factor of a dispatch node.
pub const BRANCH: usize = 1 << BITS_PER_LEVEL;

/// Maximum bit-shift value (depth 12, last level uses 4 bits).
///
/// Two unequal 64-bit hashes always differ within some 5-bit fragment at a
/// shift no greater than this, so dispatch chains never grow past it.
pub const MAX_SHIFT: u32 = 60;

/// A key-value pair with its precomputed hash.
///
/// Entries are held through [`SharedPointer`] and shared between every map
/// version that contains them; the engine never clones the key or value.
pub struct Entry<K, V> {
    /// Precomputed 64-bit hash of the key.
    pub hash: u64,
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

impl<K: std::hash::Hash, V> Entry<K, V> {
    /// Creates an entry, hashing the key once.
    pub fn new(key: K, value: V) -> Self {
        let hash = hash_one(&key);
        Self { hash, key, value }
    }
}

/// Trie node.
///
/// A closed sum: every engine operation matches exhaustively on the four
/// kinds, so a new kind cannot be added without revisiting each one.
pub enum Node<K, V, P: SharedPointerKind> {
    /// Terminator of branches holding no entries. Identity element for
    /// lookup, removal and the xor fold.
    Empty,
    /// A single entry.
    Leaf(SharedPointer<Entry<K, V>, P>),
    /// Two or more entries whose full 64-bit hashes collide.
    ///
    /// Invariant: `entries.len() >= 2`, all hashes equal `hash`, keys
    /// pairwise distinct.
    Collision {
        /// The shared full hash.
        hash: u64,
        /// The colliding entries.
        entries: Vec<SharedPointer<Entry<K, V>, P>>,
    },
    /// Interior node routing by the 5-bit hash fragment at its depth.
    Dispatch(Dispatch<K, V, P>),
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u64, shift: u32) -> u32 {
    debug_assert!(shift <= MAX_SHIFT);
    ((hash >> shift) & 0x1F) as u32
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Manual trait impls — avoid false `K: Trait, V: Trait` bounds.
// Cloning a node clones pointers and bitmaps, never keys or values.
// ---------------------------------------------------------------------------

impl<K, V, P: SharedPointerKind> Clone for Node<K, V, P> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Leaf(entry) => Self::Leaf(SharedPointer::clone(entry)),
            Self::Collision { hash, entries } => Self::Collision {
                hash: *hash,
                entries: entries.clone(),
            },
            Self::Dispatch(sub) => Self::Dispatch(sub.clone()),
        }
    }
}

impl<K, V, P: SharedPointerKind> fmt::Debug for Node<K, V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Leaf(entry) => f
                .debug_struct("Leaf")
                .field("hash", &format_args!("{:#018x}", entry.hash))
                .finish_non_exhaustive(),
            Self::Collision { hash, entries } => f
                .debug_struct("Collision")
                .field("hash", &format_args!("{hash:#018x}"))
                .field("entries", &entries.len())
                .finish(),
            Self::Dispatch(sub) => f.debug_tuple("Dispatch").field(sub).finish(),
        }
    }
}
