//! Lookup — traverses the trie to find a key.

use archery::{SharedPointer, SharedPointerKind};

use crate::node::{BITS_PER_LEVEL, Entry, Node, fragment};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns the shared entry if found. Matching is by key equality; a hash
/// match alone never suffices.
pub fn lookup<'a, K, V, P>(
    node: &'a Node<K, V, P>,
    hash: u64,
    key: &K,
    shift: u32,
) -> Option<&'a SharedPointer<Entry<K, V>, P>>
where
    K: Eq,
    P: SharedPointerKind,
{
    match node {
        Node::Empty => None,
        Node::Leaf(entry) => (entry.hash == hash && entry.key == *key).then_some(entry),
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if hash != *node_hash {
                return None;
            }
            // Linear search through the colliding entries.
            entries.iter().find(|entry| entry.key == *key)
        }
        Node::Dispatch(sub) => {
            let child = sub.get(fragment(hash, shift))?;
            lookup(child, hash, key, shift + BITS_PER_LEVEL)
        }
    }
}
