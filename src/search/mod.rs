//! Exact similarity-constrained subset search.
//!
//! Enumerates every subset of an item sequence, filters by size bounds and
//! a minimum average pairwise cosine similarity, and selects the subset of
//! maximum total value. This is a knapsack variant where the capacity
//! constraint is replaced by a compatibility constraint.
//!
//! # Key Types
//!
//! - [`OptimizationEngine`]: optimum search and candidate ranking
//! - [`SearchConfig`]: size bounds and parallel partitioning
//! - [`OptimalSubset`]: best valid subset (empty when infeasible)
//! - [`RankedSubset`]: one row of the "all candidates" report
//!
//! # Determinism
//!
//! Ties on value are broken by enumeration order: the subset with the
//! lowest membership mask wins. Parallel search (feature `parallel`)
//! preserves this by merging chunk winners in mask order.

mod config;
mod engine;
mod types;

pub use config::SearchConfig;
pub use engine::OptimizationEngine;
pub use types::{OptimalSubset, RankedSubset, SizeBounds};
