//! Bitmask subset iteration.

use std::ops::Range;

/// Largest sequence a `u64` mask can enumerate.
pub const MAX_ITEMS: usize = 63;

/// Item count above which exhaustive search is considered impractical.
pub const RECOMMENDED_MAX_ITEMS: usize = 20;

/// A non-empty subset of a borrowed sequence, encoded by its mask.
///
/// Members are yielded in original sequence order.
#[derive(Debug)]
pub struct Subset<'a, T> {
    items: &'a [T],
    mask: u64,
}

impl<T> Clone for Subset<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Subset<'_, T> {}

impl<'a, T> Subset<'a, T> {
    /// Builds the subset selected by `mask`.
    ///
    /// Bits at or above `items.len()` are ignored.
    pub fn from_mask(items: &'a [T], mask: u64) -> Self {
        let usable = if items.len() >= 64 {
            u64::MAX
        } else {
            (1u64 << items.len()) - 1
        };
        Self {
            items,
            mask: mask & usable,
        }
    }

    /// The membership bitmask.
    pub fn mask(&self) -> u64 {
        self.mask
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Whether the subset has no members (only for a zero mask).
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Whether the item at `index` is a member.
    pub fn contains(&self, index: usize) -> bool {
        index < 64 && self.mask & (1u64 << index) != 0
    }

    /// Positions of the members, ascending.
    ///
    /// Only the first 64 positions are addressable by the mask.
    pub fn indices(&self) -> impl Iterator<Item = usize> + 'a {
        let mask = self.mask;
        (0..self.items.len().min(64)).filter(move |&j| mask & (1u64 << j) != 0)
    }

    /// Members in original order.
    pub fn members(&self) -> impl Iterator<Item = &'a T> + 'a {
        let items = self.items;
        self.indices().map(move |j| &items[j])
    }

    /// Collects the members.
    pub fn to_vec(&self) -> Vec<&'a T> {
        self.members().collect()
    }
}

/// Iterator over the non-empty subsets of a sequence in increasing mask order.
///
/// Holds no state beyond its cursor; two enumerators over the same input
/// yield identical sequences.
///
/// # Examples
///
/// ```
/// use u_knapsack::subset::SubsetEnumerator;
///
/// let items = ["a", "b", "c"];
/// let masks: Vec<u64> = SubsetEnumerator::new(&items).map(|s| s.mask()).collect();
/// assert_eq!(masks, vec![1, 2, 3, 4, 5, 6, 7]);
/// ```
#[derive(Debug, Clone)]
pub struct SubsetEnumerator<'a, T> {
    items: &'a [T],
    next: u64,
    end: u64,
}

impl<'a, T> SubsetEnumerator<'a, T> {
    /// Enumerates every non-empty subset of `items`.
    ///
    /// # Panics
    /// Panics if `items.len()` exceeds [`MAX_ITEMS`].
    pub fn new(items: &'a [T]) -> Self {
        let full = Self::full_range(items.len());
        Self::with_range(items, full)
    }

    /// Enumerates only the masks in `range`, clipped to the valid mask range.
    ///
    /// Used to partition the search space across workers.
    ///
    /// # Panics
    /// Panics if `items.len()` exceeds [`MAX_ITEMS`].
    pub fn with_range(items: &'a [T], range: Range<u64>) -> Self {
        let full = Self::full_range(items.len());
        let next = range.start.max(full.start);
        let end = range.end.min(full.end);
        Self {
            items,
            next,
            end: end.max(next),
        }
    }

    /// Mask range `1..2^n` covering all non-empty subsets of `n` items.
    ///
    /// # Panics
    /// Panics if `n` exceeds [`MAX_ITEMS`].
    pub fn full_range(n: usize) -> Range<u64> {
        assert!(
            n <= MAX_ITEMS,
            "cannot enumerate subsets of {n} items (limit {MAX_ITEMS})"
        );
        1..(1u64 << n)
    }

    /// Number of non-empty subsets of `n` items: `2^n - 1`.
    pub fn subset_count(n: usize) -> u64 {
        let range = Self::full_range(n);
        range.end - range.start
    }

    /// Masks not yet yielded.
    pub fn remaining(&self) -> u64 {
        self.end - self.next
    }
}

impl<'a, T> Iterator for SubsetEnumerator<'a, T> {
    type Item = Subset<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;
        Some(Subset {
            items: self.items,
            mask,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_empty_sequence() {
        let items: [u8; 0] = [];
        assert_eq!(SubsetEnumerator::new(&items).count(), 0);
        assert_eq!(SubsetEnumerator::<u8>::subset_count(0), 0);
    }

    #[test]
    fn test_counts_and_uniqueness() {
        for n in 1..=10 {
            let items: Vec<usize> = (0..n).collect();
            let masks: Vec<u64> = SubsetEnumerator::new(&items).map(|s| s.mask()).collect();
            assert_eq!(masks.len() as u64, (1u64 << n) - 1);

            let unique: HashSet<u64> = masks.iter().copied().collect();
            assert_eq!(unique.len(), masks.len());
            assert!(masks.iter().all(|&m| m >= 1 && m < (1u64 << n)));
            assert!(masks.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_members_preserve_order() {
        let items = ["a", "b", "c", "d"];
        let subset = Subset::from_mask(&items, 0b1011);
        assert_eq!(subset.to_vec(), vec![&"a", &"b", &"d"]);
        assert_eq!(subset.indices().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(subset.len(), 3);
        assert!(subset.contains(3));
        assert!(!subset.contains(2));
    }

    #[test]
    fn test_membership_covers_power_set() {
        let items = [10, 20, 30];
        let sets: HashSet<Vec<i32>> = SubsetEnumerator::new(&items)
            .map(|s| s.members().copied().collect())
            .collect();

        let expected: HashSet<Vec<i32>> = [
            vec![10],
            vec![20],
            vec![10, 20],
            vec![30],
            vec![10, 30],
            vec![20, 30],
            vec![10, 20, 30],
        ]
        .into_iter()
        .collect();
        assert_eq!(sets, expected);
    }

    #[test]
    fn test_restartable() {
        let items = [1, 2, 3, 4];
        let first: Vec<u64> = SubsetEnumerator::new(&items).map(|s| s.mask()).collect();
        let second: Vec<u64> = SubsetEnumerator::new(&items).map(|s| s.mask()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_ranges_partition_full_space() {
        let items: Vec<u8> = (0..7).collect();
        let full: Vec<u64> = SubsetEnumerator::new(&items).map(|s| s.mask()).collect();

        let mut stitched = Vec::new();
        let mut start = 0;
        while start < 128 {
            let end = start + 20;
            stitched.extend(SubsetEnumerator::with_range(&items, start..end).map(|s| s.mask()));
            start = end;
        }
        assert_eq!(stitched, full);
    }

    #[test]
    fn test_range_clipped() {
        let items = [1, 2];
        let masks: Vec<u64> = SubsetEnumerator::with_range(&items, 0..100)
            .map(|s| s.mask())
            .collect();
        assert_eq!(masks, vec![1, 2, 3]);

        let (start, end) = (10, 5);
        let empty = SubsetEnumerator::with_range(&items, start..end);
        assert_eq!(empty.count(), 0);
    }

    #[test]
    fn test_size_hint_exact() {
        let items = [0; 5];
        let mut it = SubsetEnumerator::new(&items);
        assert_eq!(it.size_hint(), (31, Some(31)));
        it.next();
        assert_eq!(it.size_hint(), (30, Some(30)));
    }

    #[test]
    fn test_from_mask_ignores_high_bits() {
        let items = [1, 2];
        let subset = Subset::from_mask(&items, 0b1110);
        assert_eq!(subset.mask(), 0b10);
    }

    #[test]
    fn test_from_mask_on_long_sequence() {
        let items = vec![0u8; 70];
        let subset = Subset::from_mask(&items, 0b101);
        assert_eq!(subset.indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(subset.members().count(), 2);
        assert_eq!(subset.to_vec().len(), 2);

        let top = Subset::from_mask(&items, 1u64 << 63);
        assert_eq!(top.indices().collect::<Vec<_>>(), vec![63]);
        assert!(!top.contains(64));
    }

    #[test]
    #[should_panic(expected = "cannot enumerate subsets")]
    fn test_too_many_items_panics() {
        let items = vec![0u8; MAX_ITEMS + 1];
        let _ = SubsetEnumerator::new(&items);
    }
}
