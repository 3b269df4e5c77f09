//! Exhaustive search over the subset lattice.

use super::config::SearchConfig;
use super::types::{OptimalSubset, RankedSubset, SizeBounds};
use crate::round::Item;
use crate::subset::{Subset, SubsetEnumerator, MAX_ITEMS, RECOMMENDED_MAX_ITEMS};
use crate::vector::{cosine_similarity_fixed, pairwise_mean};
use std::cmp::Reverse;
use std::ops::Range;

/// Pairwise cosines and values precomputed once per search.
///
/// Subset similarity is summed over member pairs in the same order as
/// [`average_pairwise_similarity`](crate::vector::average_pairwise_similarity),
/// so both paths produce bit-identical scores.
struct ScoreTable<'a> {
    items: &'a [Item],
    cosines: Vec<f64>,
}

impl<'a> ScoreTable<'a> {
    fn new(items: &'a [Item]) -> Self {
        let n = items.len();
        let mut cosines = vec![0.0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let s = cosine_similarity_fixed(&items[i].attributes, &items[j].attributes);
                cosines[i * n + j] = s;
                cosines[j * n + i] = s;
            }
        }
        Self { items, cosines }
    }

    fn value(&self, subset: &Subset<'_, Item>) -> u32 {
        subset.members().map(|item| item.value).sum()
    }

    fn similarity(&self, subset: &Subset<'_, Item>) -> f64 {
        let n = self.items.len();
        let mut idx = [0usize; MAX_ITEMS];
        let mut k = 0;
        for j in subset.indices() {
            idx[k] = j;
            k += 1;
        }
        pairwise_mean(k, |a, b| self.cosines[idx[a] * n + idx[b]])
    }
}

#[derive(Debug, Clone, Copy)]
struct Criteria {
    threshold: f64,
    bounds: Option<SizeBounds>,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    mask: u64,
    value: u32,
    similarity: f64,
}

#[derive(Debug, Default)]
struct ScanOutcome {
    best: Option<Candidate>,
    evaluated: u64,
    valid: u64,
}

/// Replaces `best` only on a strictly greater value: first seen wins ties.
fn offer(best: &mut Option<Candidate>, candidate: Candidate) {
    match best {
        Some(b) if candidate.value <= b.value => {}
        _ => *best = Some(candidate),
    }
}

fn scan_range(table: &ScoreTable<'_>, range: Range<u64>, criteria: Criteria) -> ScanOutcome {
    let mut outcome = ScanOutcome::default();
    for subset in SubsetEnumerator::with_range(table.items, range) {
        if let Some(bounds) = criteria.bounds {
            if !bounds.contains(subset.len()) {
                continue;
            }
        }
        outcome.evaluated += 1;

        let similarity = table.similarity(&subset);
        if similarity >= criteria.threshold {
            outcome.valid += 1;
            offer(
                &mut outcome.best,
                Candidate {
                    mask: subset.mask(),
                    value: table.value(&subset),
                    similarity,
                },
            );
        }
    }
    outcome
}

/// Merges per-chunk outcomes. Winners are ordered by mask before folding
/// so the tie-break matches a sequential scan regardless of completion order.
fn combine(outcomes: Vec<ScanOutcome>) -> ScanOutcome {
    let mut merged = ScanOutcome::default();
    let mut winners = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        merged.evaluated += outcome.evaluated;
        merged.valid += outcome.valid;
        winners.extend(outcome.best);
    }
    winners.sort_by_key(|c| c.mask);
    for candidate in winners {
        offer(&mut merged.best, candidate);
    }
    merged
}

fn chunk_ranges(full: Range<u64>, chunk_size: u64) -> Vec<Range<u64>> {
    let mut ranges = Vec::new();
    let mut start = full.start;
    while start < full.end {
        let end = start.saturating_add(chunk_size).min(full.end);
        ranges.push(start..end);
        start = end;
    }
    ranges
}

fn rank_range(
    table: &ScoreTable<'_>,
    range: Range<u64>,
    threshold: f64,
    min_size: usize,
) -> Vec<RankedSubset> {
    SubsetEnumerator::with_range(table.items, range)
        .filter(|subset| subset.len() >= min_size)
        .map(|subset| {
            let similarity = table.similarity(&subset);
            RankedSubset {
                mask: subset.mask(),
                names: subset.members().map(|item| item.name.clone()).collect(),
                value: table.value(&subset),
                similarity,
                valid: similarity >= threshold,
            }
        })
        .collect()
}

#[cfg(feature = "parallel")]
fn scan_all(
    table: &ScoreTable<'_>,
    full: Range<u64>,
    criteria: Criteria,
    config: &SearchConfig,
) -> ScanOutcome {
    use rayon::prelude::*;

    if !config.parallel {
        return scan_range(table, full, criteria);
    }
    let outcomes: Vec<ScanOutcome> = chunk_ranges(full, config.chunk_size)
        .into_par_iter()
        .map(|range| scan_range(table, range, criteria))
        .collect();
    combine(outcomes)
}

#[cfg(not(feature = "parallel"))]
fn scan_all(
    table: &ScoreTable<'_>,
    full: Range<u64>,
    criteria: Criteria,
    config: &SearchConfig,
) -> ScanOutcome {
    if !config.parallel {
        return scan_range(table, full, criteria);
    }
    tracing::debug!("`parallel` feature disabled; scanning chunks in order");
    let outcomes = chunk_ranges(full, config.chunk_size)
        .into_iter()
        .map(|range| scan_range(table, range, criteria))
        .collect();
    combine(outcomes)
}

#[cfg(feature = "parallel")]
fn rank_all(
    table: &ScoreTable<'_>,
    full: Range<u64>,
    threshold: f64,
    min_size: usize,
    config: &SearchConfig,
) -> Vec<RankedSubset> {
    use rayon::prelude::*;

    if !config.parallel {
        return rank_range(table, full, threshold, min_size);
    }
    let parts: Vec<Vec<RankedSubset>> = chunk_ranges(full, config.chunk_size)
        .into_par_iter()
        .map(|range| rank_range(table, range, threshold, min_size))
        .collect();
    parts.concat()
}

#[cfg(not(feature = "parallel"))]
fn rank_all(
    table: &ScoreTable<'_>,
    full: Range<u64>,
    threshold: f64,
    min_size: usize,
    _config: &SearchConfig,
) -> Vec<RankedSubset> {
    rank_range(table, full, threshold, min_size)
}

fn warn_if_large(n: usize) {
    if n > RECOMMENDED_MAX_ITEMS {
        tracing::warn!(
            items = n,
            recommended = RECOMMENDED_MAX_ITEMS,
            "exhaustive subset search over a large item set"
        );
    }
}

/// Exact, brute-force subset optimizer.
///
/// Every operation is pure and total: identical inputs give identical
/// outputs, and infeasibility is a result, not a fault.
///
/// # Usage
///
/// ```
/// use u_knapsack::round::Item;
/// use u_knapsack::search::{OptimizationEngine, SizeBounds};
///
/// let items = vec![
///     Item::new("a", "A", 10, [1.0, 0.0, 0.0, 0.0, 0.0]),
///     Item::new("b", "B", 20, [1.0, 0.0, 0.0, 0.0, 0.0]),
///     Item::new("c", "C", 5, [0.0, 1.0, 0.0, 0.0, 0.0]),
/// ];
/// let best = OptimizationEngine::find_optimal_subset(&items, 0.9, Some(SizeBounds::new(2, 3)));
/// assert_eq!(best.ids(), vec!["a", "b"]);
/// assert_eq!(best.value, 30);
/// ```
pub struct OptimizationEngine;

impl OptimizationEngine {
    /// Finds the maximum-value subset whose size lies within `size_bounds`
    /// (any non-empty size when `None`) and whose similarity is at least
    /// `threshold`. Ties go to the lowest mask.
    ///
    /// Returns [`OptimalSubset::empty`] when nothing qualifies.
    ///
    /// # Panics
    /// Panics if `items.len()` exceeds [`MAX_ITEMS`].
    pub fn find_optimal_subset(
        items: &[Item],
        threshold: f64,
        size_bounds: Option<SizeBounds>,
    ) -> OptimalSubset {
        let config = SearchConfig::default().with_optional_size_bounds(size_bounds);
        Self::search(items, threshold, &config)
    }

    /// [`find_optimal_subset`](Self::find_optimal_subset) with full configuration.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`SearchConfig::validate`]
    /// first to get a descriptive error) or `items.len()` exceeds [`MAX_ITEMS`].
    pub fn search(items: &[Item], threshold: f64, config: &SearchConfig) -> OptimalSubset {
        config.validate().expect("invalid SearchConfig");
        warn_if_large(items.len());

        let table = ScoreTable::new(items);
        let full = SubsetEnumerator::<Item>::full_range(items.len());
        let criteria = Criteria {
            threshold,
            bounds: config.size_bounds,
        };
        let outcome = scan_all(&table, full, criteria, config);

        tracing::debug!(
            items = items.len(),
            threshold,
            evaluated = outcome.evaluated,
            valid = outcome.valid,
            best_value = outcome.best.map(|c| c.value),
            "subset search finished"
        );

        match outcome.best {
            Some(c) => OptimalSubset {
                items: Subset::from_mask(items, c.mask)
                    .members()
                    .cloned()
                    .collect(),
                mask: c.mask,
                value: c.value,
                similarity: c.similarity,
            },
            None => OptimalSubset::empty(),
        }
    }

    /// Scores every subset with at least `min_size` members, sorted by value
    /// descending. Equal values keep enumeration order.
    ///
    /// # Panics
    /// Panics if `items.len()` exceeds [`MAX_ITEMS`].
    pub fn rank_all_subsets(items: &[Item], threshold: f64, min_size: usize) -> Vec<RankedSubset> {
        Self::rank_with(items, threshold, min_size, &SearchConfig::default())
    }

    /// [`rank_all_subsets`](Self::rank_all_subsets) with full configuration.
    /// `config.size_bounds` is ignored.
    ///
    /// # Panics
    /// Panics if the configuration is invalid or `items.len()` exceeds [`MAX_ITEMS`].
    pub fn rank_with(
        items: &[Item],
        threshold: f64,
        min_size: usize,
        config: &SearchConfig,
    ) -> Vec<RankedSubset> {
        config.validate().expect("invalid SearchConfig");
        warn_if_large(items.len());

        let table = ScoreTable::new(items);
        let full = SubsetEnumerator::<Item>::full_range(items.len());
        let mut ranked = rank_all(&table, full, threshold, min_size, config);
        ranked.sort_by_key(|r| Reverse(r.value));
        ranked
    }
}
