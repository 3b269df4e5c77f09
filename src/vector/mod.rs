//! Vector similarity primitives.
//!
//! Cosine similarity between attribute vectors and the mean pairwise
//! similarity of a group, the compatibility measure every subset is
//! scored with.
//!
//! # Degenerate vectors
//!
//! A zero-magnitude vector has no direction. Its similarity with any
//! vector is defined as `0.0` rather than `NaN`.

mod similarity;

pub use similarity::{
    average_pairwise_similarity, average_pairwise_similarity_fixed, cosine_similarity,
    cosine_similarity_fixed,
};

pub(crate) use similarity::pairwise_mean;
