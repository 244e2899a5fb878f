//! Single-threaded DP cache implementation.

use std::cell::RefCell;
use std::marker::PhantomData;

use super::backend::Backend;
use super::problem::DpProblem;
use super::DpCacheError;

/// Lazily evaluated memo table over a [`DpProblem`].
///
/// Values are computed on first request, after all their dependencies, and
/// cloned out of the backend on every later request.
///
/// # Warning: No Cycle Detection
///
/// Cyclic dependencies recurse without bound. **Dependencies must form a DAG.**
pub struct DpCache<I, K, B, P> {
    backend: RefCell<B>,
    problem: P,
    _phantom: PhantomData<fn(&I) -> K>,
}

impl DpCache<(), (), (), ()> {
    /// Start building a cache; both a backend and a problem are required.
    pub fn builder() -> DpCacheBuilder<(), ()> {
        DpCacheBuilder {
            backend: (),
            problem: (),
        }
    }
}

impl<I, K, B, P> DpCache<I, K, B, P>
where
    I: Clone,
    K: Clone,
    B: Backend<I, K>,
    P: DpProblem<I, K>,
{
    pub fn new(backend: B, problem: P) -> Self {
        Self {
            backend: RefCell::new(backend),
            problem,
            _phantom: PhantomData,
        }
    }

    /// Value at `index`, computing it and any missing dependencies.
    pub fn get(&self, index: &I) -> Result<K, DpCacheError> {
        if let Some(value) = self.backend.borrow().get(index).cloned() {
            return Ok(value);
        }

        // No borrow is held while dependencies recurse.
        let dep_values = self
            .problem
            .deps(index)
            .iter()
            .map(|dep| self.get(dep))
            .collect::<Result<Vec<K>, _>>()?;

        self.backend
            .borrow_mut()
            .get_or_insert(index.clone(), || self.problem.compute(index, dep_values))
            .cloned()
    }

    /// The backend, for inspecting what has been computed.
    pub fn into_backend(self) -> B {
        self.backend.into_inner()
    }
}

/// Typed builder returned by [`DpCache::builder`].
pub struct DpCacheBuilder<B, P> {
    backend: B,
    problem: P,
}

impl<P> DpCacheBuilder<(), P> {
    pub fn backend<B>(self, backend: B) -> DpCacheBuilder<B, P> {
        DpCacheBuilder {
            backend,
            problem: self.problem,
        }
    }
}

impl<B> DpCacheBuilder<B, ()> {
    pub fn problem<P>(self, problem: P) -> DpCacheBuilder<B, P> {
        DpCacheBuilder {
            backend: self.backend,
            problem,
        }
    }
}

impl<B, P> DpCacheBuilder<B, P> {
    pub fn build<I, K>(self) -> DpCache<I, K, B, P>
    where
        I: Clone,
        K: Clone,
        B: Backend<I, K>,
        P: DpProblem<I, K>,
    {
        DpCache::new(self.backend, self.problem)
    }
}
