//! Items and rounds.

use crate::error::{KnapsackError, Result};
use crate::search::{OptimalSubset, OptimizationEngine, RankedSubset, SearchConfig};
use crate::subset::MAX_ITEMS;
use serde::Serialize;
use std::collections::HashSet;

/// Dimensionality of every attribute vector.
pub const VECTOR_DIM: usize = 5;

/// Smallest allowed attribute component.
pub const ATTRIBUTE_MIN: f64 = 0.0;

/// Largest allowed attribute component.
pub const ATTRIBUTE_MAX: f64 = 10.0;

/// Largest allowed item value.
pub const MAX_ITEM_VALUE: u32 = 99;

/// Fixed-size attribute descriptor used for compatibility scoring.
pub type AttributeVector = [f64; VECTOR_DIM];

/// Clamps a component into `[ATTRIBUTE_MIN, ATTRIBUTE_MAX]`. `NaN` maps to the minimum.
pub fn clamp_attribute(x: f64) -> f64 {
    if x.is_nan() {
        ATTRIBUTE_MIN
    } else {
        x.clamp(ATTRIBUTE_MIN, ATTRIBUTE_MAX)
    }
}

/// A scored, vector-tagged unit of selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    /// Identifier, unique within a round.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Value in `[0, MAX_ITEM_VALUE]`.
    pub value: u32,
    /// Attribute vector, components in `[ATTRIBUTE_MIN, ATTRIBUTE_MAX]`.
    pub attributes: AttributeVector,
}

impl Item {
    /// Creates an item, clamping `value` and every attribute component
    /// into their allowed ranges.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        value: u32,
        attributes: AttributeVector,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: value.min(MAX_ITEM_VALUE),
            attributes: attributes.map(clamp_attribute),
        }
    }

    /// Creates an item from a dynamically sized attribute slice.
    ///
    /// # Errors
    ///
    /// [`KnapsackError::DimensionMismatch`] unless `attributes` has exactly
    /// [`VECTOR_DIM`] components.
    pub fn from_slice(
        id: impl Into<String>,
        name: impl Into<String>,
        value: u32,
        attributes: &[f64],
    ) -> Result<Self> {
        let fixed: AttributeVector =
            attributes
                .try_into()
                .map_err(|_| KnapsackError::DimensionMismatch {
                    left: VECTOR_DIM,
                    right: attributes.len(),
                })?;
        Ok(Self::new(id, name, value, fixed))
    }
}

/// One round: an immutable item sequence, its threshold, and the optimum
/// computed when the round was created.
///
/// Rounds are replaced, never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct Round {
    items: Vec<Item>,
    threshold: f64,
    optimal: OptimalSubset,
}

impl Round {
    /// Builds a round and computes its reference optimum with `search`.
    ///
    /// # Errors
    ///
    /// - [`KnapsackError::InvalidThreshold`] for a non-finite threshold.
    /// - [`KnapsackError::DuplicateItemId`] when two items share an id.
    /// - [`KnapsackError::TooManyItems`] beyond the enumerable limit.
    pub fn new(items: Vec<Item>, threshold: f64, search: &SearchConfig) -> Result<Self> {
        if !threshold.is_finite() {
            return Err(KnapsackError::InvalidThreshold { value: threshold });
        }
        if items.len() > MAX_ITEMS {
            return Err(KnapsackError::TooManyItems {
                count: items.len(),
                limit: MAX_ITEMS,
            });
        }
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(KnapsackError::DuplicateItemId {
                    id: item.id.clone(),
                });
            }
        }

        Ok(Self::from_generated(items, threshold, search))
    }

    /// Builds a round from data the generator already guarantees to be
    /// well-formed (unique ids, finite threshold, enumerable size).
    pub(crate) fn from_generated(items: Vec<Item>, threshold: f64, search: &SearchConfig) -> Self {
        let optimal = OptimizationEngine::search(&items, threshold, search);
        Self {
            items,
            threshold,
            optimal,
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// The optimum computed at creation, under the size bounds that were
    /// in effect then. Reference only; see [`Round::find_optimal`].
    pub fn optimal(&self) -> &OptimalSubset {
        &self.optimal
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Looks up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Recomputes the optimum with no size bounds.
    pub fn find_optimal(&self) -> OptimalSubset {
        OptimizationEngine::find_optimal_subset(&self.items, self.threshold, None)
    }

    /// Ranks every subset with at least `min_size` members.
    pub fn rank_subsets(&self, min_size: usize) -> Vec<RankedSubset> {
        OptimizationEngine::rank_all_subsets(&self.items, self.threshold, min_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SizeBounds;

    fn item(id: &str, value: u32, attributes: AttributeVector) -> Item {
        Item::new(id, id.to_uppercase(), value, attributes)
    }

    #[test]
    fn test_item_clamps() {
        let it = Item::new("x", "X", 150, [-1.0, 11.0, 5.0, f64::NAN, 10.0]);
        assert_eq!(it.value, MAX_ITEM_VALUE);
        assert_eq!(it.attributes, [0.0, 10.0, 5.0, 0.0, 10.0]);
    }

    #[test]
    fn test_item_from_slice() {
        let it = Item::from_slice("x", "X", 5, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_eq!(it.attributes, [1.0, 2.0, 3.0, 4.0, 5.0]);

        let err = Item::from_slice("x", "X", 5, &[1.0, 2.0]).unwrap_err();
        assert_eq!(err, KnapsackError::DimensionMismatch { left: 5, right: 2 });
    }

    #[test]
    fn test_round_duplicate_ids() {
        let items = vec![
            item("a", 1, [1.0, 0.0, 0.0, 0.0, 0.0]),
            item("a", 2, [1.0, 0.0, 0.0, 0.0, 0.0]),
        ];
        let err = Round::new(items, 0.9, &SearchConfig::default()).unwrap_err();
        assert_eq!(err, KnapsackError::DuplicateItemId { id: "a".into() });
    }

    #[test]
    fn test_round_rejects_nan_threshold() {
        let items = vec![item("a", 1, [1.0, 0.0, 0.0, 0.0, 0.0])];
        assert!(Round::new(items, f64::NAN, &SearchConfig::default()).is_err());
    }

    #[test]
    fn test_round_optimal_and_lookup() {
        let items = vec![
            item("a", 10, [1.0, 0.0, 0.0, 0.0, 0.0]),
            item("b", 20, [1.0, 0.0, 0.0, 0.0, 0.0]),
            item("c", 5, [0.0, 1.0, 0.0, 0.0, 0.0]),
        ];
        let config = SearchConfig::default().with_size_bounds(SizeBounds::new(2, 3));
        let round = Round::new(items, 0.9, &config).unwrap();

        assert_eq!(round.len(), 3);
        assert_eq!(round.optimal().value, 30);
        assert_eq!(round.find_optimal().value, 30);
        assert_eq!(round.item("c").map(|i| i.value), Some(5));
        assert!(round.item("zz").is_none());
        assert_eq!(round.rank_subsets(2).len(), 4);
    }
}
