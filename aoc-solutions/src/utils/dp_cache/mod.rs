//! Memoisation for dynamic programming over a dependency DAG
//!
//! A [`DpProblem`] says which indices a value depends on and how to combine
//! their values. [`DpCache`] resolves dependencies recursively and computes
//! every index at most once, storing results in a [`Backend`]:
//!
//! - [`HashMapBackend`]: any `Hash + Eq` index, sparse
//! - [`Vec2DBackend`]: dense `(usize, usize)` indices inside a fixed shape
//!
//! # Warning: Cycle Behavior
//!
//! **These caches do NOT detect cycles.** A cyclic dependency graph recurses
//! until the stack overflows. Callers must guarantee a DAG.
//!
//! A cache is meant to live for one top-level computation; build a new one
//! per input rather than sharing it.
//!
//! # Example
//!
//! ```rust
//! use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, Vec2DBackend};
//!
//! struct GridPaths;
//!
//! impl DpProblem<(usize, usize), u64> for GridPaths {
//!     fn deps(&self, pos: &(usize, usize)) -> Vec<(usize, usize)> {
//!         let (r, c) = *pos;
//!         if r == 0 && c == 0 { vec![] }
//!         else if r == 0 { vec![(0, c - 1)] }
//!         else if c == 0 { vec![(r - 1, 0)] }
//!         else { vec![(r - 1, c), (r, c - 1)] }
//!     }
//!     fn compute(&self, _pos: &(usize, usize), deps: Vec<u64>) -> u64 {
//!         if deps.is_empty() { 1 } else { deps.iter().sum() }
//!     }
//! }
//!
//! let cache = DpCache::builder()
//!     .backend(Vec2DBackend::new(5, 5))
//!     .problem(GridPaths)
//!     .build();
//! assert_eq!(cache.get(&(4, 4)).unwrap(), 70); // C(8,4) = 70 paths
//! ```

mod backend;
mod cache;
mod problem;

use thiserror::Error;

pub use backend::{Backend, HashMapBackend, Vec2DBackend};
pub use cache::{DpCache, DpCacheBuilder};
pub use problem::DpProblem;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DpCacheError {
    /// Index falls outside a fixed-shape backend
    #[error("index {index} outside backend of shape {shape}")]
    IndexOutOfBounds { index: String, shape: String },
}
