//! Identity-Tagged Operator Handles
//!
//! Rust closures have no referential equality, so every operator whose
//! "same operation" identity matters is wrapped in a cheap cloneable handle:
//! an `Arc`'d function plus an explicit identity tag. Two handles are the
//! same operation when both are the distinguished identity instance or when
//! they share one underlying allocation (`Arc::ptr_eq`), never by comparing
//! behavior.

use std::fmt;
use std::sync::Arc;

/// Result-finishing step: reads a reduced value, produces a column result.
/// Finishers carry no identity semantics, so a plain shared closure is
/// enough.
pub type FinishFn<R, RR> = Arc<dyn Fn(&R) -> RR + Send + Sync>;

/// Pre-mapping operator applied to each element before accumulation.
pub struct Mapper<T, U> {
    f: Arc<dyn Fn(T) -> U + Send + Sync>,
    identity: bool,
}

impl<T, U> Clone for Mapper<T, U> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            identity: self.identity,
        }
    }
}

impl<T, U> fmt::Debug for Mapper<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<T, U> Mapper<T, U> {
    /// Wrap a mapping function in a new handle with its own identity.
    pub fn new(f: impl Fn(T) -> U + Send + Sync + 'static) -> Self {
        Self {
            f: Arc::new(f),
            identity: false,
        }
    }

    /// Apply the mapping to one element.
    pub fn apply(&self, item: T) -> U {
        (self.f)(item)
    }

    /// Whether this is the distinguished identity mapper.
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Whether two handles denote the same operation.
    pub fn same(&self, other: &Self) -> bool {
        (self.identity && other.identity) || Arc::ptr_eq(&self.f, &other.f)
    }
}

impl<T: 'static> Mapper<T, T> {
    /// The distinguished identity mapper: elements pass through unchanged,
    /// and any two identity mappers compare as the same operation.
    pub fn identity() -> Self {
        Self {
            f: Arc::new(|item| item),
            identity: true,
        }
    }
}

/// In-place post-processing operator applied to a reduced value before
/// finishing, e.g. a sort.
pub struct PostOp<R> {
    f: Arc<dyn Fn(&mut R) + Send + Sync>,
    identity: bool,
}

impl<R> Clone for PostOp<R> {
    fn clone(&self) -> Self {
        Self {
            f: Arc::clone(&self.f),
            identity: self.identity,
        }
    }
}

impl<R> fmt::Debug for PostOp<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostOp")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl<R> PostOp<R> {
    /// Wrap a post-processing function in a new handle with its own
    /// identity.
    pub fn new(f: impl Fn(&mut R) + Send + Sync + 'static) -> Self {
        Self {
            f: Arc::new(f),
            identity: false,
        }
    }

    /// The distinguished no-op operator.
    pub fn identity() -> Self {
        Self {
            f: Arc::new(|_| {}),
            identity: true,
        }
    }

    /// Apply the operator in place.
    pub fn apply(&self, value: &mut R) {
        (self.f)(value)
    }

    /// Whether this is the distinguished no-op operator.
    pub fn is_identity(&self) -> bool {
        self.identity
    }

    /// Whether two handles denote the same operation.
    pub fn same(&self, other: &Self) -> bool {
        (self.identity && other.identity) || Arc::ptr_eq(&self.f, &other.f)
    }
}
