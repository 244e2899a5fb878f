//! Trait-based DP problem definition.

/// Dependency structure and combination rule of a DP problem.
///
/// - `I`: index type
/// - `K`: value type stored in the cache
///
/// # Example
///
/// ```rust
/// use aoc_solutions::utils::dp_cache::{DpCache, DpProblem, HashMapBackend};
///
/// struct Fibonacci;
///
/// impl DpProblem<u64, u64> for Fibonacci {
///     fn deps(&self, n: &u64) -> Vec<u64> {
///         if *n <= 1 { vec![] }
///         else { vec![n - 1, n - 2] }
///     }
///
///     fn compute(&self, n: &u64, deps: Vec<u64>) -> u64 {
///         if *n <= 1 { *n }
///         else { deps[0] + deps[1] }
///     }
/// }
///
/// let cache = DpCache::builder()
///     .backend(HashMapBackend::new())
///     .problem(Fibonacci)
///     .build();
/// assert_eq!(cache.get(&50).unwrap(), 12_586_269_025);
/// ```
pub trait DpProblem<I, K> {
    /// Indices this index depends on. Empty for base cases.
    fn deps(&self, index: &I) -> Vec<I>;

    /// Value for `index` given the values of `deps(index)`, in the same order.
    fn compute(&self, index: &I, deps: Vec<K>) -> K;
}
