//! Deterministic power-set enumeration.
//!
//! Every non-empty subset of a sequence is identified by a bitmask over
//! item positions: bit `j` set means item `j` is a member. Subsets are
//! produced in increasing mask order, which makes "first seen" a stable
//! tie-breaker for any search built on top.
//!
//! # Scaling
//!
//! Enumeration is exponential in the item count. Masks are `u64`, so at
//! most [`MAX_ITEMS`] items are accepted; beyond [`RECOMMENDED_MAX_ITEMS`]
//! exhaustive search stops being practical.

mod enumerator;

pub use enumerator::{Subset, SubsetEnumerator, MAX_ITEMS, RECOMMENDED_MAX_ITEMS};
