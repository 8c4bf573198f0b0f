#![warn(missing_docs)]
//! # RankShare
//!
//! Single-pass percentile statistics with shared accumulation.
//!
//! RankShare computes percentile-derived columns over one pass of a data
//! sequence:
//! - **Shared Accumulation**: N percentile columns over the same data share
//!   one physical accumulation (and, when they agree, one sort)
//! - **Identity-Based Dedup**: operators are cheap handles compared by
//!   identity, so "same sort" detection is a pointer comparison
//! - **Interpolation Policies**: floor, ceiling, half-up and linear
//!   resolution of fractional ranks, plus custom policies
//! - **Id-Keyed Registry**: route columns to one accumulation by name and
//!   validate that repeated requests are structurally compatible
//! - **Parallel Drive**: the owner's accumulation supports Rayon's
//!   fold/combine split model
//!
//! ## Quick Start
//!
//! ```
//! use rankshare::prelude::*;
//!
//! let median = Fraction::new(0.5).unwrap();
//! let mut sorts = SorterCache::new();
//! let sort = sorts.sorter(&SortSpec::by(f64::total_cmp));
//!
//! // Two columns, one accumulation, one sort.
//! let floor = SharedCollector::of(
//!     VecCollector::new(),
//!     sort.clone(),
//!     percentile(median, Policy::floor()),
//! );
//! let linear = floor.share(sort, percentile(median, Policy::linear()));
//!
//! let values = (0..10).map(|i| (i * 10) as f64);
//! let (low, interpolated) = reduce(values, &(floor, linear));
//! assert_eq!(low, Some(40.0));
//! assert_eq!(interpolated, Some(45.0));
//! ```
//!
//! ## Sharing by Id
//!
//! ```
//! use rankshare::prelude::*;
//!
//! let p = Fraction::new(0.6).unwrap();
//! let sort = SorterCache::new().sorter(&SortSpec::by(f64::total_cmp));
//!
//! let mut shares = ShareMap::new();
//! let floor = shares
//!     .share("latency", Mapper::identity(), VecCollector::new(), sort.clone(),
//!            percentile(p, Policy::floor()))
//!     .unwrap();
//! let ceiling = shares
//!     .share("latency", Mapper::identity(), VecCollector::new(), sort,
//!            percentile(p, Policy::ceiling()))
//!     .unwrap();
//!
//! let (lo, hi) = reduce(vec![3.0, 1.0, 2.0], &(floor, ceiling));
//! assert_eq!(lo, Some(2.0));
//! assert_eq!(hi, Some(3.0));
//! ```

// Re-export the sharing engine
pub use rankshare_core::{
    Characteristics, Collector, FinishFn, Mapper, PostOp, ShareError, ShareMap, SharedCollector,
    SortSpec, SorterCache, VecCollector, reduce, reduce_par,
};

// Re-export the percentile math
pub use rankshare_stats::{
    Fraction, Lerp, PercentileError, Policy, Rank, percentile, percentile_of_sorted, resolve_rank,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        Collector, Fraction, Mapper, Policy, PostOp, ShareMap, SharedCollector, SortSpec,
        SorterCache, VecCollector, percentile, reduce, reduce_par,
    };
}
