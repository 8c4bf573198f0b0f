//! Sort Specs and the Sorter Cache
//!
//! A [`SortSpec`] names a (key-extractor, comparator) pair; two specs are
//! the same sort when they are both the distinguished natural-order
//! instance or share one comparator allocation. The [`SorterCache`] turns
//! specs into in-place sorting [`PostOp`]s and memoizes them by identity, so
//! identity-equal specs yield pointer-identical sorter handles — which is
//! what lets a shared collector detect that two columns asked for the same
//! sort and run it once.

use crate::ops::PostOp;
use fxhash::FxHashMap;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// A (key-extractor, comparator) pair compared by handle identity.
pub struct SortSpec<T> {
    cmp: Arc<dyn Fn(&T, &T) -> Ordering + Send + Sync>,
    natural: bool,
}

impl<T> Clone for SortSpec<T> {
    fn clone(&self) -> Self {
        Self {
            cmp: Arc::clone(&self.cmp),
            natural: self.natural,
        }
    }
}

impl<T> fmt::Debug for SortSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortSpec")
            .field("natural", &self.natural)
            .finish_non_exhaustive()
    }
}

impl<T: Ord> SortSpec<T> {
    /// The distinguished natural-order spec: identity extractor, `Ord`
    /// comparison. Any two natural specs are the same sort.
    pub fn natural() -> Self {
        Self {
            cmp: Arc::new(|a: &T, b: &T| a.cmp(b)),
            natural: true,
        }
    }
}

impl<T> SortSpec<T> {
    /// Sort by an explicit comparator over whole elements.
    pub fn by(cmp: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self {
            cmp: Arc::new(cmp),
            natural: false,
        }
    }

    /// Sort by a key extractor and a comparator over the keys.
    pub fn by_key<K>(
        extract: impl Fn(&T) -> K + Send + Sync + 'static,
        cmp: impl Fn(&K, &K) -> Ordering + Send + Sync + 'static,
    ) -> Self {
        Self {
            cmp: Arc::new(move |a: &T, b: &T| cmp(&extract(a), &extract(b))),
            natural: false,
        }
    }

    /// Sort by a key extractor with the key's `Ord` ordering.
    pub fn by_key_natural<K: Ord>(extract: impl Fn(&T) -> K + Send + Sync + 'static) -> Self {
        Self::by_key(extract, |a: &K, b: &K| a.cmp(b))
    }

    /// Compare two elements under this spec.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.cmp)(a, b)
    }

    /// Whether two specs denote literally the same sort.
    pub fn same(&self, other: &Self) -> bool {
        (self.natural && other.natural) || Arc::ptr_eq(&self.cmp, &other.cmp)
    }

    fn cache_key(&self) -> SpecKey {
        if self.natural {
            SpecKey::Natural
        } else {
            SpecKey::Addr(Arc::as_ptr(&self.cmp) as *const () as usize)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SpecKey {
    Natural,
    Addr(usize),
}

/// Memoizes sorting operators by [`SortSpec`] identity.
///
/// The natural-order sorter is built once per cache and reused for every
/// natural spec; other specs are keyed by comparator handle address. The
/// built sorter leaves sequences of length ≤ 1 untouched and otherwise
/// sorts in place (stable).
pub struct SorterCache<T> {
    sorters: FxHashMap<SpecKey, PostOp<Vec<T>>>,
}

impl<T> Default for SorterCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SorterCache<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            sorters: FxHashMap::default(),
        }
    }
}

impl<T: 'static> SorterCache<T> {
    /// The sorting operator for `spec`. Identity-equal specs return
    /// pointer-identical handles.
    pub fn sorter(&mut self, spec: &SortSpec<T>) -> PostOp<Vec<T>> {
        let key = spec.cache_key();
        if let Some(op) = self.sorters.get(&key) {
            return op.clone();
        }
        let spec = spec.clone();
        let op = PostOp::new(move |values: &mut Vec<T>| {
            if values.len() > 1 {
                values.sort_by(|a, b| spec.compare(a, b));
            }
        });
        self.sorters.insert(key, op.clone());
        op
    }
}

impl<T: Ord + 'static> SorterCache<T> {
    /// The natural-order sorter (the common-case fast path).
    pub fn natural(&mut self) -> PostOp<Vec<T>> {
        self.sorter(&SortSpec::natural())
    }
}
