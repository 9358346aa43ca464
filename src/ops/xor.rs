//! Symmetric-difference fold of a single entry.
//!
//! `xor` toggles membership: an entry whose key is already present cancels
//! the existing one, anything else is inserted. Folding every entry of one
//! map into another yields their symmetric difference.

use std::mem;

use archery::{SharedPointer, SharedPointerKind};

use super::insert::join;
use super::remove::collapse;
use crate::node::{BITS_PER_LEVEL, Entry, Node, fragment};

/// Outcome of a recursive xor.
pub struct XorOutcome<K, V, P: SharedPointerKind> {
    /// Root of the rebuilt subtree (possibly [`Node::Empty`], which the
    /// parent prunes from its sub-dispatch).
    pub node: Node<K, V, P>,
    /// `true` if the entry was added, `false` if a key match cancelled.
    pub added: bool,
}

/// Folds `entry` into the subtree rooted at `node`, path-copying.
pub fn xor<K, V, P>(
    node: &Node<K, V, P>,
    entry: SharedPointer<Entry<K, V>, P>,
    shift: u32,
) -> XorOutcome<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    match node {
        Node::Empty => XorOutcome {
            node: Node::Leaf(entry),
            added: true,
        },
        Node::Leaf(existing) => {
            if existing.key == entry.key {
                // Cancel.
                XorOutcome {
                    node: Node::Empty,
                    added: false,
                }
            } else if existing.hash == entry.hash {
                XorOutcome {
                    node: Node::Collision {
                        hash: entry.hash,
                        entries: vec![SharedPointer::clone(existing), entry],
                    },
                    added: true,
                }
            } else {
                let prior = SharedPointer::clone(existing);
                XorOutcome {
                    node: join(
                        shift,
                        prior.hash,
                        Node::Leaf(prior),
                        entry.hash,
                        Node::Leaf(entry),
                    ),
                    added: true,
                }
            }
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if entry.hash != *node_hash {
                XorOutcome {
                    node: join(shift, *node_hash, node.clone(), entry.hash, Node::Leaf(entry)),
                    added: true,
                }
            } else if let Some(pos) = entries.iter().position(|e| e.key == entry.key) {
                let mut rest = entries.clone();
                rest.remove(pos);
                XorOutcome {
                    node: collapse(*node_hash, rest),
                    added: false,
                }
            } else {
                let mut out = entries.clone();
                out.push(entry);
                XorOutcome {
                    node: Node::Collision {
                        hash: *node_hash,
                        entries: out,
                    },
                    added: true,
                }
            }
        }
        Node::Dispatch(sub) => {
            let frag = fragment(entry.hash, shift);
            match sub.get(frag) {
                None => XorOutcome {
                    node: Node::Dispatch(sub.set(frag, SharedPointer::new(Node::Leaf(entry)))),
                    added: true,
                },
                Some(child) => {
                    let outcome = xor(child, entry, shift + BITS_PER_LEVEL);
                    if matches!(outcome.node, Node::Empty) {
                        let pruned = sub.unset(frag);
                        let node = if pruned.is_empty() {
                            Node::Empty
                        } else {
                            Node::Dispatch(pruned)
                        };
                        XorOutcome {
                            node,
                            added: outcome.added,
                        }
                    } else {
                        XorOutcome {
                            node: Node::Dispatch(sub.set(frag, SharedPointer::new(outcome.node))),
                            added: outcome.added,
                        }
                    }
                }
            }
        }
    }
}

/// Folds `entry` in place. Returns `true` if the entry was added, `false`
/// if a key match cancelled an existing one.
pub fn xor_mut<K, V, P>(
    node: &mut SharedPointer<Node<K, V, P>, P>,
    entry: SharedPointer<Entry<K, V>, P>,
    shift: u32,
) -> bool
where
    K: Eq,
    P: SharedPointerKind,
{
    let current = SharedPointer::make_mut(node);
    match current {
        Node::Empty => {
            *current = Node::Leaf(entry);
            true
        }
        Node::Leaf(existing) => {
            if existing.key == entry.key {
                *current = Node::Empty;
                false
            } else if existing.hash == entry.hash {
                let prior = SharedPointer::clone(existing);
                *current = Node::Collision {
                    hash: entry.hash,
                    entries: vec![prior, entry],
                };
                true
            } else {
                let prior = SharedPointer::clone(existing);
                *current = join(
                    shift,
                    prior.hash,
                    Node::Leaf(prior),
                    entry.hash,
                    Node::Leaf(entry),
                );
                true
            }
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if entry.hash != *node_hash {
                let node_hash = *node_hash;
                let prior = mem::replace(current, Node::Empty);
                *current = join(shift, node_hash, prior, entry.hash, Node::Leaf(entry));
                true
            } else if let Some(pos) = entries.iter().position(|e| e.key == entry.key) {
                entries.remove(pos);
                if entries.len() == 1 {
                    let last = entries.pop().expect("one entry remains");
                    *current = Node::Leaf(last);
                }
                false
            } else {
                entries.push(entry);
                true
            }
        }
        Node::Dispatch(sub) => {
            let frag = fragment(entry.hash, shift);
            match sub.get_mut(frag) {
                None => {
                    sub.set_mut(frag, SharedPointer::new(Node::Leaf(entry)));
                    true
                }
                Some(child) => {
                    let added = xor_mut(child, entry, shift + BITS_PER_LEVEL);
                    if !added {
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
                    added
                }
            }
        }
    }
}
