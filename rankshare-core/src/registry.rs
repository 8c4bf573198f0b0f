//! The Id-Keyed Share Map
//!
//! Routes share requests made under one caller-chosen identifier to a
//! single [`SharedCollector`], validating that repeated requests are
//! structurally compatible. A map is scoped to exactly one aggregation run:
//! construct it, register every column, drive the reduction, drop it. It is
//! not safe for concurrent registration and does not need to be — one run is
//! one sequential registration phase before the terminal step.

use crate::collector::Collector;
use crate::ops::{Mapper, PostOp};
use crate::shared::{ShareState, SharedCollector};
use fxhash::FxHashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors from share registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The sharing identifier was empty or whitespace-only.
    #[error("share id must not be blank")]
    BlankId,

    /// A later request under an id supplied a mapper that is not the one
    /// the owner registered.
    #[error("mapper registered under id `{id}` is not the owner's mapper")]
    MapperMismatch {
        /// The offending sharing identifier.
        id: String,
    },

    /// A later request under an id supplied a base collector of a different
    /// kind than the owner's.
    #[error("collector registered under id `{id}` is a `{found}`, expected a `{expected}`")]
    CollectorMismatch {
        /// The offending sharing identifier.
        id: String,
        /// Kind the owner registered.
        expected: &'static str,
        /// Kind this request supplied.
        found: &'static str,
    },
}

struct Entry<T, U, C: Collector<U>> {
    mapper: Mapper<T, U>,
    kind: &'static str,
    state: Arc<ShareState<C::Output>>,
}

/// Per-run registry of shared collectors keyed by caller-chosen id.
pub struct ShareMap<T, U, C: Collector<U>> {
    entries: FxHashMap<String, Entry<T, U, C>>,
}

impl<T, U, C: Collector<U>> Default for ShareMap<T, U, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U, C: Collector<U>> ShareMap<T, U, C> {
    /// Create an empty map for one aggregation run.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Number of distinct ids registered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no id has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Find or create the shared collector for `id` and register a column
    /// on it.
    ///
    /// The first call under an id creates the owning column, which performs
    /// the real accumulation. Later calls must supply the same mapper (by
    /// identity) and a base collector of the same kind; on success they
    /// return finishing-only views. Validation failures leave the existing
    /// entry untouched.
    pub fn share<RR>(
        &mut self,
        id: &str,
        mapper: Mapper<T, U>,
        base: C,
        post: PostOp<C::Output>,
        finisher: impl Fn(&C::Output) -> RR + Send + Sync + 'static,
    ) -> Result<SharedCollector<T, U, C, RR>, ShareError> {
        if id.trim().is_empty() {
            return Err(ShareError::BlankId);
        }
        match self.entries.get(id) {
            None => {
                let kind = base.kind();
                let owner = SharedCollector::owner(mapper.clone(), base, post, finisher);
                self.entries.insert(
                    id.to_owned(),
                    Entry {
                        mapper,
                        kind,
                        state: owner.state(),
                    },
                );
                Ok(owner)
            }
            Some(entry) => {
                if !mapper.same(&entry.mapper) {
                    return Err(ShareError::MapperMismatch { id: id.to_owned() });
                }
                if base.kind() != entry.kind {
                    return Err(ShareError::CollectorMismatch {
                        id: id.to_owned(),
                        expected: entry.kind,
                        found: base.kind(),
                    });
                }
                Ok(SharedCollector::view_from(
                    Arc::clone(&entry.state),
                    post,
                    finisher,
                ))
            }
        }
    }
}
