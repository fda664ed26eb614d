//! Test modules for the ctrie-map crate.
//!
//! This module contains the crate-internal test infrastructure:
//! - Concurrency suites exercising the node-level locking under real
//!   thread interleavings
//! - Property-based tests checking the map against a plain hash-map model
//! - Shared fixtures and key generators
//!
//! Single-threaded unit suites live next to the code they cover, in the
//! `#[cfg(test)]` submodules of `map`, `node`, `iter` and `config`. The
//! large randomized end-to-end suite lives in `tests/ctrie_map_test.rs`.
