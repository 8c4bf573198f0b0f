#![warn(missing_docs)]
//! RankShare Core - Shared Single-Pass Collectors
//!
//! This crate provides the sharing/aggregation engine:
//! - The `Collector` reduction-stage contract (supplier / accumulate /
//!   combine / finish) plus tuple composition for multi-column passes
//! - Identity-tagged operator handles, so "same operation" checks stay O(1)
//!   pointer comparisons
//! - Sort specs and a memoizing sorter cache
//! - `SharedCollector`: one physical accumulation, many finishing views
//! - `ShareMap`: an id-keyed per-run registry of shared collectors
//! - Sequential and Rayon-parallel reduction drivers

mod collector;
mod ops;
mod reduce;
mod registry;
mod shared;
mod sort;

pub use collector::{Characteristics, Collector, VecCollector};
pub use ops::{FinishFn, Mapper, PostOp};
pub use reduce::{reduce, reduce_par};
pub use registry::{ShareError, ShareMap};
pub use shared::SharedCollector;
pub use sort::{SortSpec, SorterCache};
