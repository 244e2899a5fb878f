//! Storage backends for the DP cache.

use std::collections::HashMap;
use std::hash::Hash;

use super::DpCacheError;

/// Where computed values live.
///
/// - `get` never computes
/// - `get_or_insert` only calls `compute` when the index has no value yet
pub trait Backend<I, K> {
    /// The cached value, if any.
    fn get(&self, index: &I) -> Option<&K>;

    /// The cached value, computing and storing it first when missing.
    fn get_or_insert<F>(&mut self, index: I, compute: F) -> Result<&K, DpCacheError>
    where
        F: FnOnce() -> K;
}

/// A HashMap-based backend for arbitrary hashable indices.
#[derive(Debug)]
pub struct HashMapBackend<I, K> {
    data: HashMap<I, K>,
}

impl<I, K> HashMapBackend<I, K> {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    /// Number of cached values.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<I, K> Default for HashMapBackend<I, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Hash + Eq, K> Backend<I, K> for HashMapBackend<I, K> {
    fn get(&self, index: &I) -> Option<&K> {
        self.data.get(index)
    }

    fn get_or_insert<F>(&mut self, index: I, compute: F) -> Result<&K, DpCacheError>
    where
        F: FnOnce() -> K,
    {
        Ok(self.data.entry(index).or_insert_with(compute))
    }
}

/// Runtime-sized, row-major 2D backend for `(row, col)` indices.
#[derive(Debug)]
pub struct Vec2DBackend<K> {
    rows: usize,
    cols: usize,
    data: Vec<Option<K>>,
}

impl<K> Vec2DBackend<K> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: std::iter::repeat_with(|| None).take(rows * cols).collect(),
        }
    }

    fn offset(&self, (row, col): (usize, usize)) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}

impl<K> Backend<(usize, usize), K> for Vec2DBackend<K> {
    fn get(&self, index: &(usize, usize)) -> Option<&K> {
        self.offset(*index).and_then(|i| self.data[i].as_ref())
    }

    fn get_or_insert<F>(&mut self, index: (usize, usize), compute: F) -> Result<&K, DpCacheError>
    where
        F: FnOnce() -> K,
    {
        let i = self
            .offset(index)
            .ok_or_else(|| DpCacheError::IndexOutOfBounds {
                index: format!("{index:?}"),
                shape: format!("{}x{}", self.rows, self.cols),
            })?;
        Ok(self.data[i].get_or_insert_with(compute))
    }
}
