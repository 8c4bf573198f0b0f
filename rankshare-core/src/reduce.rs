//! Reduction Drivers
//!
//! Drives a [`Collector`] over a sequence: sequentially, or with Rayon in
//! the parallel-split model the `combine` step exists for. Each partition
//! folds into its own accumulator and the partial accumulators merge in
//! partition order, so order-sensitive collectors still see a deterministic
//! result.

use crate::collector::Collector;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

/// Drive `collector` over `items` in one sequential pass.
///
/// # Examples
///
/// ```
/// use rankshare_core::{VecCollector, reduce};
///
/// let collected = reduce(vec![1, 2, 3], &VecCollector::new());
/// assert_eq!(collected, vec![1, 2, 3]);
/// ```
pub fn reduce<I, C>(items: I, collector: &C) -> C::Output
where
    I: IntoIterator,
    C: Collector<I::Item>,
{
    let mut acc = collector.supplier();
    for item in items {
        collector.accumulate(&mut acc, item);
    }
    collector.finish(acc)
}

/// Drive `collector` over `items` with parallel partial accumulation.
///
/// Each Rayon split accumulates into its own supplier-produced state;
/// partial states merge through `combine`. Finishing still happens once, on
/// the calling thread.
pub fn reduce_par<I, C>(items: I, collector: &C) -> C::Output
where
    I: IntoParallelIterator,
    C: Collector<I::Item> + Sync,
    C::Acc: Send,
{
    let acc = items
        .into_par_iter()
        .fold(
            || collector.supplier(),
            |mut acc, item| {
                collector.accumulate(&mut acc, item);
                acc
            },
        )
        .reduce(|| collector.supplier(), |a, b| collector.combine(a, b));
    collector.finish(acc)
}
