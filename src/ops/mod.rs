//! Recursive trie operations.
//!
//! Each operation comes in two protocols with identical observable
//! results: the persistent functions return new nodes, sharing unchanged
//! subtrees by pointer (path copy), while the `*_mut` functions edit
//! through [`SharedPointer::make_mut`](archery::SharedPointer::make_mut) —
//! uniquely-owned nodes are changed in place, shared nodes are copied
//! first.

pub mod insert;
pub mod lookup;
pub mod remove;
pub mod xor;
