//! Shared Collectors
//!
//! A [`SharedCollector`] lets N result columns derived from the same
//! accumulated sequence coexist as one physical accumulation. The first
//! column registered for a configuration is the *owner*: its
//! supplier/accumulate/combine do the real work. Every further column is a
//! *view* whose accumulation operations are no-ops and whose finishing step
//! reads the owner's once-computed reduced value.
//!
//! At finish time the owner resolves the cache exactly once. If every
//! registered column supplied the same post-processing operator (by
//! identity) as the first, that operator runs once and its result is shared
//! by all columns — sharing a mutation like an in-place sort is safe because
//! all columns agreed on it. The instant any column registers a different
//! operator, the base reduced value is instead frozen as-is and every column
//! re-derives from its own clone, so no column ever observes another's
//! post-processing.
//!
//! Registration and finishing are single-threaded: one aggregation run
//! performs all `share` calls from one thread before the terminal reduction.
//! Only the owner's accumulation triple may run under a parallel-split
//! engine (its `combine` merges partial states); the atomics below exist to
//! make the type `Sync` for that drive, not to license concurrent
//! registration.

use crate::collector::{Characteristics, Collector};
use crate::ops::{FinishFn, Mapper, PostOp};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

/// Reduced value resolved exactly once by the owner's finishing path.
enum Resolved<R> {
    /// Uniform post-processing: one post-processed value, shared by every
    /// column.
    Shared(R),
    /// Mixed post-processing: the base value, frozen before any per-column
    /// operator ran. Columns clone it and re-apply their own operator.
    Frozen(R),
}

/// State shared between an owner and its views. The `resolved` slot is the
/// explicit Unresolved/Resolved two-state machine; only the owner's
/// finishing path writes it.
pub(crate) struct ShareState<R> {
    first_post: PostOp<R>,
    characteristics: Characteristics,
    uniform: AtomicBool,
    views: AtomicU32,
    resolved: OnceLock<Resolved<R>>,
}

enum Role<T, U, C> {
    Owner { mapper: Mapper<T, U>, base: C },
    View,
}

/// A reduction stage sharing one accumulation between several finishing
/// columns.
///
/// Type parameters: `T` element, `U` mapped element, `C` the base collector
/// accumulating `U`s into the reduced value `C::Output`, and `RR` this
/// column's result.
///
/// # Panics
///
/// Finishing a view before its owner panics: the cached reduced value is
/// produced by the owner's finishing step. The drivers in this crate finish
/// tuple members in registration order, so the owner always resolves first.
pub struct SharedCollector<T, U, C: Collector<U>, RR> {
    role: Role<T, U, C>,
    state: Arc<ShareState<C::Output>>,
    post: PostOp<C::Output>,
    finisher: FinishFn<C::Output, RR>,
}

impl<T, U, C: Collector<U>, RR> std::fmt::Debug for SharedCollector<T, U, C, RR> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCollector").finish_non_exhaustive()
    }
}

impl<T, U, C: Collector<U>, RR> SharedCollector<T, U, C, RR> {
    /// Create the owning column for a configuration.
    ///
    /// `mapper` turns each element into the value the base collector
    /// accumulates; `post` is this column's post-processing operator (e.g.
    /// a sort from [`SorterCache`](crate::SorterCache)); `finisher` turns
    /// the post-processed reduced value into this column's result.
    pub fn owner(
        mapper: Mapper<T, U>,
        base: C,
        post: PostOp<C::Output>,
        finisher: impl Fn(&C::Output) -> RR + Send + Sync + 'static,
    ) -> Self {
        let state = Arc::new(ShareState {
            first_post: post.clone(),
            characteristics: base.characteristics(),
            uniform: AtomicBool::new(true),
            views: AtomicU32::new(1),
            resolved: OnceLock::new(),
        });
        Self {
            role: Role::Owner { mapper, base },
            state,
            post,
            finisher: Arc::new(finisher),
        }
    }

    /// Register a further column over the same accumulation.
    ///
    /// The returned view contributes no accumulation work; it may produce a
    /// different result type than this column. Registering a post-processing
    /// operator that is not the same operation as the first one registered
    /// permanently switches the group to frozen per-column derivation.
    pub fn share<RR2>(
        &self,
        post: PostOp<C::Output>,
        finisher: impl Fn(&C::Output) -> RR2 + Send + Sync + 'static,
    ) -> SharedCollector<T, U, C, RR2> {
        SharedCollector::view_from(Arc::clone(&self.state), post, finisher)
    }

    /// Number of columns registered so far, the owner included.
    pub fn view_count(&self) -> u32 {
        self.state.views.load(Ordering::Relaxed)
    }

    /// Whether every column registered so far supplied the same
    /// post-processing operator as the first.
    pub fn is_uniform(&self) -> bool {
        self.state.uniform.load(Ordering::Relaxed)
    }

    pub(crate) fn state(&self) -> Arc<ShareState<C::Output>> {
        Arc::clone(&self.state)
    }

    pub(crate) fn view_from(
        state: Arc<ShareState<C::Output>>,
        post: PostOp<C::Output>,
        finisher: impl Fn(&C::Output) -> RR + Send + Sync + 'static,
    ) -> Self {
        if !post.same(&state.first_post) {
            state.uniform.store(false, Ordering::Relaxed);
        }
        state.views.fetch_add(1, Ordering::Relaxed);
        SharedCollector {
            role: Role::View,
            state,
            post,
            finisher: Arc::new(finisher),
        }
    }
}

impl<T, C: Collector<T>, RR> SharedCollector<T, T, C, RR> {
    /// Owning column over the raw elements, with no pre-mapping step.
    pub fn of(
        base: C,
        post: PostOp<C::Output>,
        finisher: impl Fn(&C::Output) -> RR + Send + Sync + 'static,
    ) -> Self
    where
        T: 'static,
    {
        Self::owner(Mapper::identity(), base, post, finisher)
    }
}

impl<T, U, C, RR> Collector<T> for SharedCollector<T, U, C, RR>
where
    C: Collector<U>,
    C::Output: Clone,
{
    type Acc = Option<C::Acc>;
    type Output = RR;

    fn supplier(&self) -> Self::Acc {
        match &self.role {
            Role::Owner { base, .. } => Some(base.supplier()),
            Role::View => None,
        }
    }

    fn accumulate(&self, acc: &mut Self::Acc, item: T) {
        if let Role::Owner { mapper, base } = &self.role {
            if let Some(acc) = acc.as_mut() {
                base.accumulate(acc, mapper.apply(item));
            }
        }
    }

    fn combine(&self, a: Self::Acc, b: Self::Acc) -> Self::Acc {
        match &self.role {
            Role::Owner { base, .. } => match (a, b) {
                (Some(a), Some(b)) => Some(base.combine(a, b)),
                (Some(acc), None) | (None, Some(acc)) => Some(acc),
                (None, None) => None,
            },
            Role::View => None,
        }
    }

    fn finish(&self, acc: Self::Acc) -> RR {
        let resolved = match &self.role {
            Role::Owner { base, .. } => self.state.resolved.get_or_init(|| {
                let acc = acc.expect("owner accumulator comes from its own supplier");
                let mut reduced = base.finish(acc);
                if self.state.uniform.load(Ordering::Relaxed) {
                    self.post.apply(&mut reduced);
                    Resolved::Shared(reduced)
                } else {
                    Resolved::Frozen(reduced)
                }
            }),
            Role::View => self
                .state
                .resolved
                .get()
                .expect("shared collector finished before its owner"),
        };
        match resolved {
            Resolved::Shared(reduced) => (self.finisher)(reduced),
            Resolved::Frozen(frozen) => {
                let mut own = frozen.clone();
                self.post.apply(&mut own);
                (self.finisher)(&own)
            }
        }
    }

    fn characteristics(&self) -> Characteristics {
        self.state.characteristics
    }
}
