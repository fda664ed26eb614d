// Copyright (c) 2026 Ctrie Map Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Configuration for the concurrent trie map.

use serde::{Deserialize, Serialize};

/// Configuration options for a [`CtrieMap`](crate::CtrieMap).
///
/// The only tunable is a preallocation hint for per-node child maps. The
/// hint affects allocation behavior, never correctness: nodes created by a
/// map constructed with these options preallocate their child map to this
/// capacity the first time a child is added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtrieOptions {
    /// Number of child slots to reserve when a node's child map is first
    /// allocated. Zero means no preallocation.
    initial_child_capacity: usize,
}

impl CtrieOptions {
    /// Create options with no preallocation.
    pub fn new() -> Self {
        Self {
            initial_child_capacity: 0,
        }
    }

    /// Set the child-map preallocation hint.
    ///
    /// Useful when the key alphabet is known up front, e.g. 32 for a
    /// base32-style key set: every node then allocates room for the whole
    /// alphabet at once instead of growing incrementally.
    pub fn with_initial_child_capacity(mut self, capacity: usize) -> Self {
        self.initial_child_capacity = capacity;
        self
    }

    /// The configured preallocation hint.
    pub fn initial_child_capacity(&self) -> usize {
        self.initial_child_capacity
    }
}

impl Default for CtrieOptions {
    fn default() -> Self {
        Self::new()
    }
}
