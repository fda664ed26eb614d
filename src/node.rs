//! Node implementation for the concurrent trie map.
//!
//! Each node owns a single character edge label, an optional value slot and
//! a lazily-allocated map of child nodes. One mutex per node guards the
//! child map and the value slot jointly; no operation ever holds more than
//! one node's lock at a time, which makes deadlock structurally impossible.

use std::fmt;
use std::sync::{Arc, Weak};

use fnv::FnvHashMap;
use parking_lot::Mutex;

use crate::config::CtrieOptions;

/// Mutable per-node state, guarded by the node's mutex.
struct NodeState<T> {
    /// Child nodes keyed by edge character. `None` until the first child
    /// is added.
    children: Option<FnvHashMap<char, CtrieNode<T>>>,

    /// The value stored at this position. `None` marks a structural node
    /// that only exists because some descendant path needs it.
    value: Option<T>,
}

impl<T> NodeState<T> {
    fn new() -> Self {
        Self {
            children: None,
            value: None,
        }
    }
}

struct NodeInner<T> {
    /// Edge label; `None` exactly for the root sentinel. Immutable after
    /// construction.
    label: Option<char>,

    /// Non-owning back-reference to the parent. Dangling for the root.
    /// The only strong edges in the tree run parent -> child, so unlinked
    /// subtrees are reclaimed as soon as the last handle drops.
    parent: Weak<NodeInner<T>>,

    /// Options shared by every node of one map.
    options: Option<Arc<CtrieOptions>>,

    state: Mutex<NodeState<T>>,
}

/// A handle to one position in a [`CtrieMap`](crate::CtrieMap).
///
/// Handles are cheap to clone (a reference-count bump) and may be sent
/// across threads. All mutating operations synchronize on the node's own
/// mutex only; see the crate documentation for the consistency model.
pub struct CtrieNode<T> {
    inner: Arc<NodeInner<T>>,
}

impl<T> CtrieNode<T> {
    /// Creates the root sentinel for a new map.
    pub(crate) fn new_root(options: Option<Arc<CtrieOptions>>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                label: None,
                parent: Weak::new(),
                options,
                state: Mutex::new(NodeState::new()),
            }),
        }
    }

    /// The edge character leading to this node, or `None` for the root.
    pub fn label(&self) -> Option<char> {
        self.inner.label
    }

    /// The parent node, or `None` for the root. Also `None` for a node
    /// whose unlinked parent has already been dropped.
    pub fn parent(&self) -> Option<CtrieNode<T>> {
        self.inner.parent.upgrade().map(|inner| CtrieNode { inner })
    }

    /// True for the root sentinel.
    pub fn is_root(&self) -> bool {
        self.inner.label.is_none()
    }

    /// True if both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Reconstructs the key this node stands for by walking parent
    /// references up to the root.
    ///
    /// Takes no locks: labels and parent links are immutable after
    /// construction. O(depth). If an ancestor of a detached node has
    /// already been dropped the walk stops there and the returned key is
    /// truncated accordingly.
    pub fn key(&self) -> String {
        let mut labels = Vec::new();
        let mut node = self.clone();
        loop {
            let label = match node.inner.label {
                Some(label) => label,
                None => break,
            };
            labels.push(label);
            match node.parent() {
                Some(parent) => node = parent,
                None => break,
            }
        }
        labels.iter().rev().collect()
    }

    /// Number of nodes in the subtree rooted here (inclusive) that hold a
    /// value.
    ///
    /// Recomputed on every call by a depth-first walk that locks each
    /// visited node only momentarily, so the result is a weakly-consistent
    /// snapshot under concurrent mutation. O(subtree size).
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self.clone()];
        while let Some(node) = stack.pop() {
            let state = node.inner.state.lock();
            if state.value.is_some() {
                count += 1;
            }
            if let Some(ref children) = state.children {
                stack.extend(children.values().cloned());
            }
        }
        count
    }

    /// Returns the child node for `c`, or `None` if it does not exist.
    /// Never creates a child.
    pub fn get_child(&self, c: char) -> Option<CtrieNode<T>> {
        let state = self.inner.state.lock();
        state
            .children
            .as_ref()
            .and_then(|children| children.get(&c).cloned())
    }

    /// A snapshot of this node's current child handles.
    pub fn children(&self) -> Vec<CtrieNode<T>> {
        let state = self.inner.state.lock();
        match state.children {
            Some(ref children) => children.values().cloned().collect(),
            None => Vec::new(),
        }
    }

    /// True if this node currently has at least one child.
    pub fn has_children(&self) -> bool {
        let state = self.inner.state.lock();
        state
            .children
            .as_ref()
            .map_or(false, |children| !children.is_empty())
    }

    /// True if this node currently holds a value.
    pub fn has_value(&self) -> bool {
        self.inner.state.lock().value.is_some()
    }

    /// Returns a clone of the stored value, or `None` for a structural
    /// node.
    ///
    /// The clone happens inside the node's critical section; composite
    /// in-place mutation of the value must go through [`modify`] instead
    /// of a read-update-write cycle over this accessor.
    ///
    /// [`modify`]: CtrieNode::modify
    pub fn value(&self) -> Option<T>
    where
        T: Clone,
    {
        self.inner.state.lock().value.clone()
    }

    /// Stores a value at this node, replacing any previous one.
    pub fn set_value(&self, value: T) {
        self.inner.state.lock().value = Some(value);
    }

    /// Runs `callback` against the value slot under this node's lock.
    ///
    /// The lock taken here is the same lock guarding structural mutation,
    /// so `modify` and child insertion/removal on the same node mutually
    /// exclude. Use this for composite read-modify-write updates that must
    /// not race concurrent removal of the node.
    ///
    /// The lock is not reentrant: `callback` must not call back into this
    /// node.
    pub fn modify<F>(&self, callback: F)
    where
        F: FnOnce(&mut Option<T>),
    {
        let mut state = self.inner.state.lock();
        callback(&mut state.value);
    }

    /// True if the stored value equals `value`. Structural nodes never
    /// match.
    pub(crate) fn value_matches(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.inner.state.lock().value.as_ref() == Some(value)
    }

    /// Clears the value slot, turning this into a structural node.
    pub(crate) fn clear_value(&self) {
        self.inner.state.lock().value = None;
    }

    /// Returns the child for `c`, creating it first if necessary.
    ///
    /// Allocates the child map on first use, honoring the configured
    /// capacity hint. The new child inherits this node's options and
    /// carries a back-reference to it. Never blocks on any lock other than
    /// this node's own.
    pub(crate) fn get_or_add_child(&self, c: char) -> CtrieNode<T> {
        let mut state = self.inner.state.lock();
        let children = state
            .children
            .get_or_insert_with(|| match self.inner.options.as_deref() {
                Some(options) => FnvHashMap::with_capacity_and_hasher(
                    options.initial_child_capacity(),
                    Default::default(),
                ),
                None => FnvHashMap::default(),
            });
        children
            .entry(c)
            .or_insert_with(|| CtrieNode {
                inner: Arc::new(NodeInner {
                    label: Some(c),
                    parent: Arc::downgrade(&self.inner),
                    options: self.inner.options.clone(),
                    state: Mutex::new(NodeState::new()),
                }),
            })
            .clone()
    }

    /// Removes the child entry for `c`. No-op if the entry, or the whole
    /// child map, is absent.
    pub(crate) fn remove_child(&self, c: char) {
        let mut state = self.inner.state.lock();
        if let Some(ref mut children) = state.children {
            children.remove(&c);
        }
    }
}

impl<T> Clone for CtrieNode<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for CtrieNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Label only: reading anything else would take the node's lock.
        f.debug_struct("CtrieNode")
            .field("label", &self.inner.label)
            .finish_non_exhaustive()
    }
}
