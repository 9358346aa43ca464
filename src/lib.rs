//! Persistent hash map and set on a hash array mapped trie (HAMT).
//!
//! Every update returns a new logical value that shares all unchanged
//! subtrees with its predecessor — the original is observationally
//! untouched, so snapshots, speculative mutation and concurrent readers
//! over a frozen version are all O(1) clones away.
//!
//! # Key properties
//!
//! - **Persistence**: `insert`/`remove` return new maps; old versions
//!   keep answering queries unchanged
//! - **Structural sharing**: updates copy only the path from the root to
//!   the change site
//! - **Transients**: a thread-confined builder edits uniquely-owned nodes
//!   in place and freezes back into a persistent value via `persist`
//! - **Set algebra**: union, intersection and symmetric difference on
//!   maps and sets
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # References
//!
//! - Bagwell, 2001 — "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dispatch;
mod error;
mod hash;
mod map;
mod node;
mod ops;
mod set;

pub mod iter;

#[cfg(test)]
mod tests;

pub use archery::{ArcK, RcK, SharedPointerKind};
pub use error::KeyNotFound;
pub use map::{HamtMap, HamtMapSync, TransientHamtMap, TransientHamtMapSync};
pub use set::{HamtSet, HamtSetSync, TransientHamtSet, TransientHamtSetSync};
