//! Removal — path-copying and in-place variants with child pruning.

use archery::{SharedPointer, SharedPointerKind};

use crate::node::{BITS_PER_LEVEL, Node, fragment};

/// Outcome of a recursive remove.
pub enum RemoveOutcome<K, V, P: SharedPointerKind> {
    /// Key was not found — the tree is unchanged.
    NotFound,
    /// Key was removed; the payload replaces the subtree (possibly
    /// [`Node::Empty`], which the parent prunes from its sub-dispatch).
    Removed(Node<K, V, P>),
}

/// Removes `key` from the subtree rooted at `node`, path-copying.
///
/// A collision node shrunk to a single entry collapses back to a leaf. A
/// dispatch node whose sub-dispatch empties dissolves to [`Node::Empty`];
/// a dispatch left with one child is kept as-is.
pub fn remove<K, V, P>(
    node: &Node<K, V, P>,
    hash: u64,
    key: &K,
    shift: u32,
) -> RemoveOutcome<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    match node {
        Node::Empty => RemoveOutcome::NotFound,
        Node::Leaf(existing) => {
            if existing.key == *key {
                RemoveOutcome::Removed(Node::Empty)
            } else {
                RemoveOutcome::NotFound
            }
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if hash != *node_hash {
                return RemoveOutcome::NotFound;
            }
            let Some(pos) = entries.iter().position(|e| e.key == *key) else {
                return RemoveOutcome::NotFound;
            };
            let mut rest = entries.clone();
            rest.remove(pos);
            RemoveOutcome::Removed(collapse(*node_hash, rest))
        }
        Node::Dispatch(sub) => {
            let frag = fragment(hash, shift);
            let Some(child) = sub.get(frag) else {
                return RemoveOutcome::NotFound;
            };
            match remove(child, hash, key, shift + BITS_PER_LEVEL) {
                RemoveOutcome::NotFound => RemoveOutcome::NotFound,
                RemoveOutcome::Removed(Node::Empty) => {
                    let pruned = sub.unset(frag);
                    if pruned.is_empty() {
                        RemoveOutcome::Removed(Node::Empty)
                    } else {
                        RemoveOutcome::Removed(Node::Dispatch(pruned))
                    }
                }
                RemoveOutcome::Removed(next) => RemoveOutcome::Removed(Node::Dispatch(
                    sub.set(frag, SharedPointer::new(next)),
                )),
            }
        }
    }
}

/// Removes `key` in place. Returns `true` if the key was present.
///
/// On a miss some shared nodes along the search path may already have been
/// copied; observable state is unchanged either way.
pub fn remove_mut<K, V, P>(
    node: &mut SharedPointer<Node<K, V, P>, P>,
    hash: u64,
    key: &K,
    shift: u32,
) -> bool
where
    K: Eq,
    P: SharedPointerKind,
{
    let current = SharedPointer::make_mut(node);
    match current {
        Node::Empty => false,
        Node::Leaf(existing) => {
            if existing.key == *key {
                *current = Node::Empty;
                true
            } else {
                false
            }
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if hash != *node_hash {
                return false;
            }
            let Some(pos) = entries.iter().position(|e| e.key == *key) else {
                return false;
            };
            entries.remove(pos);
            if entries.len() == 1 {
                let last = entries.pop().expect("one entry remains");
                *current = Node::Leaf(last);
            }
            true
        }
        Node::Dispatch(sub) => {
            let frag = fragment(hash, shift);
            let removed = match sub.get_mut(frag) {
                Some(child) => remove_mut(child, hash, key, shift + BITS_PER_LEVEL),
                None => false,
            };
            if removed {
                let child_emptied = sub
                    .get(frag)
                    .is_some_and(|child| matches!(&**child, Node::Empty));
                if child_emptied {
                    sub.unset_mut(frag);
                    if sub.is_empty() {
                        *current = Node::Empty;
                    }
                }
            }
            removed
        }
    }
}

/// Rebuilds a collision node from its surviving entries.
pub(super) fn collapse<K, V, P: SharedPointerKind>(
    hash: u64,
    mut rest: Vec<SharedPointer<crate::node::Entry<K, V>, P>>,
) -> Node<K, V, P> {
    match rest.len() {
        0 => Node::Empty,
        1 => Node::Leaf(rest.pop().expect("one entry remains")),
        _ => Node::Collision {
            hash,
            entries: rest,
        },
    }
}
