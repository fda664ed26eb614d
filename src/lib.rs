//! # ctrie-map
//!
//! A thread-safe prefix tree (trie) mapping string keys to arbitrary
//! values, built on node-level locks.
//!
//! # Key Features
//!
//! * Per-node mutual exclusion: no global lock, operations on disjoint key
//!   paths never block each other
//! * No nested locking: at most one node lock is held at any instant, so
//!   deadlock is structurally impossible
//! * Logical deletion for keys with dependent descendants, physical
//!   compaction of trailing unused nodes otherwise
//! * Lazy worklist-driven traversals: all nodes, values under a prefix,
//!   reverse search by value
//!
//! # Consistency Model
//!
//! No operation is atomic across more than one node. Aggregate reads
//! (`count`, the traversal iterators) lock each node only momentarily and
//! observe a best-effort snapshot that may never have existed in isolation
//! under concurrent mutation; a removal's compaction pass computes its
//! ancestor chain before re-locking each node to unlink it, so a concurrent
//! insert landing in that window can be dropped. Both are intentional
//! trade-offs of the single-lock-per-node design, documented on the
//! affected operations.
//!
//! # Example
//!
//! ```
//! use ctrie_map::CtrieMap;
//!
//! let map = CtrieMap::new();
//! map.add("a", 1);
//! map.add("ab", 2);
//!
//! assert_eq!(map.get_value("a"), Some(1));
//! assert!(map.contains_key("ab"));
//! assert_eq!(map.count(), 2);
//!
//! map.remove("a");
//! assert_eq!(map.get_value("a"), None);
//! // The "a" node survives structurally: "ab" still needs the path.
//! assert!(map.get_node_by_key("a").is_some());
//! ```

pub mod config;
pub mod iter;
pub mod map;
pub mod node;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

// Re-export the public surface at the crate root
pub use config::CtrieOptions;
pub use iter::{NodeIterator, NodesByValueIterator, ValueIterator};
pub use map::CtrieMap;
pub use node::CtrieNode;

/// Version information for the ctrie-map crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
