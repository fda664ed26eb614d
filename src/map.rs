//! Thread-safe prefix tree (trie) map built on node-level locks.
//!
//! Every whole-key operation decomposes into single-character operations
//! against successive nodes, root to leaf for insertion and lookup, leaf to
//! root for removal compaction. Operations on disjoint key paths never
//! block each other; operations sharing a prefix contend briefly at each
//! shared ancestor, one node at a time.

use std::fmt;
use std::sync::Arc;

use crate::config::CtrieOptions;
use crate::iter::{NodeIterator, NodesByValueIterator, ValueIterator};
use crate::node::CtrieNode;

/// A thread-safe trie mapping string keys to values of type `T`.
///
/// All operations take `&self` and may be called from any number of threads
/// concurrently. There is no global lock: synchronization happens one node
/// at a time, and no operation ever holds two node locks simultaneously.
///
/// No atomicity is provided across nodes. A multi-character `add` is not
/// observable as a single event, and aggregate reads (`count`,
/// [`get_all_nodes`](CtrieMap::get_all_nodes) and friends) observe a
/// best-effort snapshot under concurrent mutation. See the crate
/// documentation for the full consistency model.
pub struct CtrieMap<T> {
    root: CtrieNode<T>,
}

impl<T> CtrieMap<T> {
    /// Creates an empty map with default options.
    pub fn new() -> Self {
        Self {
            root: CtrieNode::new_root(None),
        }
    }

    /// Creates an empty map with the given options, propagated to every
    /// node created afterward.
    pub fn with_options(options: CtrieOptions) -> Self {
        Self {
            root: CtrieNode::new_root(Some(Arc::new(options))),
        }
    }

    /// Maps `key` to `value`, replacing any previous value.
    ///
    /// Missing path nodes are created one at a time, each under its
    /// parent's lock only. Concurrent `add` calls sharing a prefix contend
    /// momentarily at each shared ancestor, never for the whole path at
    /// once; a concurrent reader may observe the path before the value is
    /// assigned.
    pub fn add(&self, key: &str, value: T) {
        let mut node = self.root.clone();
        for c in key.chars() {
            node = node.get_or_add_child(c);
        }
        node.set_value(value);
        tracing::trace!(key, "value inserted");
    }

    /// Removes `key` from the map. No-op if the key is absent.
    ///
    /// A terminal node that still has children is only logically deleted:
    /// its value is cleared and the node survives because descendant paths
    /// depend on it. A childless terminal node is physically unlinked
    /// together with the longest trailing run of ancestors that are now
    /// valueless and unused; ancestors still holding a value or live
    /// children are never touched.
    ///
    /// The ancestor chain is computed before the per-node unlink locks are
    /// taken, so a concurrent `add` that repopulates an ancestor in that
    /// window can be silently dropped. This is the documented weak
    /// consistency of the structure, not an error condition.
    pub fn remove(&self, key: &str) {
        let node = match self.get_node_by_key(key) {
            Some(node) => node,
            None => return,
        };

        // Logical delete: descendants still need this path.
        if node.has_children() {
            node.clear_value();
            tracing::trace!(key, "value cleared, node retained");
            return;
        }

        // Chain of nodes from the terminal up to, but excluding, the root.
        let mut chain = Vec::new();
        let mut current = Some(node.clone());
        while let Some(n) = current {
            if n.is_root() {
                break;
            }
            current = n.parent();
            chain.push(n);
        }

        // Unlink the trailing run of now-unused nodes, leaf first. Once an
        // ancestor fails the test every node above it fails too, since its
        // count includes the whole subtree.
        let mut unlinked = 0usize;
        for n in &chain {
            if n.ptr_eq(&node) || (n.count() == 0 && !n.has_value()) {
                n.clear_value();
                if let (Some(parent), Some(label)) = (n.parent(), n.label()) {
                    parent.remove_child(label);
                    unlinked += 1;
                }
            }
        }
        if unlinked > 0 {
            tracing::debug!(key, unlinked, "compacted trailing nodes");
        }
    }

    /// True if `key` currently maps to a value.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get_node_by_key(key)
            .map_or(false, |node| node.has_value())
    }

    /// Returns the value mapped to `key`, or `None`.
    pub fn get_value(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        self.get_node_by_key(key).and_then(|node| node.value())
    }

    /// Returns a handle to the node for `key`, valued or structural, or
    /// `None` if no such path exists.
    ///
    /// The descent takes one child lookup per character and short-circuits
    /// on the first absent child. No cross-level consistency is guaranteed;
    /// the path may be observed mid-mutation.
    pub fn get_node_by_key(&self, key: &str) -> Option<CtrieNode<T>> {
        let mut node = self.root.clone();
        for c in key.chars() {
            node = node.get_child(c)?;
        }
        Some(node)
    }

    /// Returns a lazy walk over `(key, value)` pairs for `key`'s own node
    /// and every descendant holding a value. Empty if `key` is absent.
    pub fn get_values(&self, key: &str) -> ValueIterator<T> {
        ValueIterator::new(self.get_node_by_key(key))
    }

    /// Returns a lazy walk over every node whose value equals `value`.
    ///
    /// A single value can be mapped by multiple keys. Structural nodes are
    /// never yielded.
    pub fn get_nodes_by_value<'a>(&self, value: &'a T) -> NodesByValueIterator<'a, T>
    where
        T: PartialEq,
    {
        NodesByValueIterator::new(self.root.clone(), value)
    }

    /// Returns a lazy walk over every node in the map, the root included,
    /// with or without an assigned value.
    pub fn get_all_nodes(&self) -> NodeIterator<T> {
        NodeIterator::new(self.root.clone())
    }

    /// Number of keys currently mapped to a value.
    ///
    /// Recomputed from the tree on every call; weakly consistent under
    /// concurrent mutation.
    pub fn count(&self) -> usize {
        self.root.count()
    }

    /// True if no key currently maps to a value.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Handle to the root sentinel node.
    ///
    /// Operations performed directly on nodes obtained this way bypass the
    /// map's own discipline and are only as safe as the per-node guarantees
    /// documented on [`CtrieNode`].
    pub fn root_node(&self) -> CtrieNode<T> {
        self.root.clone()
    }
}

impl<T> Default for CtrieMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for CtrieMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CtrieMap").finish_non_exhaustive()
    }
}
