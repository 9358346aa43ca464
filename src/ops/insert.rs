//! Insertion — path-copying and in-place variants.

use std::mem;

use archery::{SharedPointer, SharedPointerKind};

use crate::dispatch::Dispatch;
use crate::node::{BITS_PER_LEVEL, Entry, MAX_SHIFT, Node, fragment};

/// Outcome of a recursive insert.
pub struct InsertOutcome<K, V, P: SharedPointerKind> {
    /// Root of the rebuilt subtree.
    pub node: Node<K, V, P>,
    /// `true` if a new key was added, `false` on same-key override.
    pub inserted: bool,
}

/// Inserts `entry` into the subtree rooted at `node`, path-copying.
///
/// Never produces [`Node::Empty`], so callers need no pruning.
pub fn insert<K, V, P>(
    node: &Node<K, V, P>,
    entry: SharedPointer<Entry<K, V>, P>,
    shift: u32,
) -> InsertOutcome<K, V, P>
where
    K: Eq,
    P: SharedPointerKind,
{
    match node {
        Node::Empty => InsertOutcome {
            node: Node::Leaf(entry),
            inserted: true,
        },
        Node::Leaf(existing) => {
            if existing.key == entry.key {
                // Same key → override.
                InsertOutcome {
                    node: Node::Leaf(entry),
                    inserted: false,
                }
            } else if existing.hash == entry.hash {
                InsertOutcome {
                    node: Node::Collision {
                        hash: entry.hash,
                        entries: vec![SharedPointer::clone(existing), entry],
                    },
                    inserted: true,
                }
            } else {
                let prior = SharedPointer::clone(existing);
                InsertOutcome {
                    node: join(
                        shift,
                        prior.hash,
                        Node::Leaf(prior),
                        entry.hash,
                        Node::Leaf(entry),
                    ),
                    inserted: true,
                }
            }
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if entry.hash == *node_hash {
                // Same-key override replaces the old entry instead of
                // letting two entries with one key coexist.
                if let Some(pos) = entries.iter().position(|e| e.key == entry.key) {
                    let mut out = entries.clone();
                    out[pos] = entry;
                    InsertOutcome {
                        node: Node::Collision {
                            hash: *node_hash,
                            entries: out,
                        },
                        inserted: false,
                    }
                } else {
                    let mut out = entries.clone();
                    out.push(entry);
                    InsertOutcome {
                        node: Node::Collision {
                            hash: *node_hash,
                            entries: out,
                        },
                        inserted: true,
                    }
                }
            } else {
                InsertOutcome {
                    node: join(shift, *node_hash, node.clone(), entry.hash, Node::Leaf(entry)),
                    inserted: true,
                }
            }
        }
        Node::Dispatch(sub) => {
            let frag = fragment(entry.hash, shift);
            match sub.get(frag) {
                Some(child) => {
                    let outcome = insert(child, entry, shift + BITS_PER_LEVEL);
                    InsertOutcome {
                        node: Node::Dispatch(sub.set(frag, SharedPointer::new(outcome.node))),
                        inserted: outcome.inserted,
                    }
                }
                None => InsertOutcome {
                    node: Node::Dispatch(sub.set(frag, SharedPointer::new(Node::Leaf(entry)))),
                    inserted: true,
                },
            }
        }
    }
}

/// Inserts `entry` in place. Returns `true` if a new key was added.
///
/// Nodes with a unique reference are edited directly; shared nodes are
/// copied first, so every other root observing them is unaffected.
pub fn insert_mut<K, V, P>(
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
                *existing = entry;
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
            if entry.hash == *node_hash {
                if let Some(pos) = entries.iter().position(|e| e.key == entry.key) {
                    entries[pos] = entry;
                    false
                } else {
                    entries.push(entry);
                    true
                }
            } else {
                let node_hash = *node_hash;
                let prior = mem::replace(current, Node::Empty);
                *current = join(shift, node_hash, prior, entry.hash, Node::Leaf(entry));
                true
            }
        }
        Node::Dispatch(sub) => {
            let frag = fragment(entry.hash, shift);
            match sub.get_mut(frag) {
                Some(child) => insert_mut(child, entry, shift + BITS_PER_LEVEL),
                None => {
                    sub.set_mut(frag, SharedPointer::new(Node::Leaf(entry)));
                    true
                }
            }
        }
    }
}

/// Builds the dispatch chain separating two nodes with unequal hashes.
///
/// Descends level by level while the 5-bit fragments coincide, then seats
/// both nodes in a fresh dispatch. The in-place sub-dispatch ops are safe
/// here: the node under construction is not yet shared.
pub fn join<K, V, P>(
    shift: u32,
    a_hash: u64,
    a: Node<K, V, P>,
    b_hash: u64,
    b: Node<K, V, P>,
) -> Node<K, V, P>
where
    P: SharedPointerKind,
{
    debug_assert!(a_hash != b_hash);
    debug_assert!(shift <= MAX_SHIFT);
    let a_frag = fragment(a_hash, shift);
    let b_frag = fragment(b_hash, shift);
    if a_frag == b_frag {
        let child = join(shift + BITS_PER_LEVEL, a_hash, a, b_hash, b);
        Node::Dispatch(Dispatch::single(a_frag, SharedPointer::new(child)))
    } else {
        let mut sub = Dispatch::new();
        sub.set_mut(a_frag, SharedPointer::new(a));
        sub.set_mut(b_frag, SharedPointer::new(b));
        Node::Dispatch(sub)
    }
}
