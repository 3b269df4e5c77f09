//! Search results and size constraints.

use crate::round::Item;
use serde::Serialize;

/// Inclusive bounds on subset size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SizeBounds {
    pub min: usize,
    pub max: usize,
}

impl SizeBounds {
    /// Bounds used when a round computes its reference optimum: 2 to 5 items.
    pub const ROUND_DEFAULT: SizeBounds = SizeBounds { min: 2, max: 5 };

    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// At least `min` members, no upper bound.
    pub fn at_least(min: usize) -> Self {
        Self {
            min,
            max: usize::MAX,
        }
    }

    pub fn contains(&self, size: usize) -> bool {
        size >= self.min && size <= self.max
    }
}

/// The value-maximizing valid subset of a search.
///
/// An infeasible search yields the empty subset with value 0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimalSubset {
    /// Members in original order.
    pub items: Vec<Item>,
    /// Membership bitmask; 0 when empty.
    pub mask: u64,
    /// Sum of member values.
    pub value: u32,
    /// Average pairwise cosine similarity of the members.
    pub similarity: f64,
}

impl OptimalSubset {
    /// The infeasible result.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            mask: 0,
            value: 0,
            similarity: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.id.as_str()).collect()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    /// Member names joined by `", "`.
    pub fn description(&self) -> String {
        self.names().join(", ")
    }
}

impl Default for OptimalSubset {
    fn default() -> Self {
        Self::empty()
    }
}

/// One row of the "all candidates" report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedSubset {
    pub mask: u64,
    /// Member names in original order.
    pub names: Vec<String>,
    pub value: u32,
    pub similarity: f64,
    /// Whether `similarity >= threshold`.
    pub valid: bool,
}

impl RankedSubset {
    pub fn size(&self) -> usize {
        self.names.len()
    }

    /// Member names joined by `", "`.
    pub fn description(&self) -> String {
        self.names.join(", ")
    }
}
