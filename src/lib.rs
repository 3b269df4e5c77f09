//! Exact cosine-similarity knapsack for compatibility puzzles.
//!
//! Each round presents a handful of items, each with a value and a
//! five-dimensional attribute vector. A selection is valid when the average
//! pairwise cosine similarity of its members reaches the round's threshold;
//! the goal is the valid selection of maximum total value.
//!
//! - **Vector**: cosine similarity and average pairwise similarity.
//! - **Subset**: deterministic bitmask enumeration of the power set.
//! - **Search**: exhaustive optimum search and candidate ranking, with an
//!   optional chunked parallel scan (feature `parallel`).
//! - **Generator**: randomized rounds biased toward a non-trivial optimum.
//! - **Round**: selection scoring, round records, record hand-off, and
//!   multi-round sessions.
//!
//! # Architecture
//!
//! The core is synchronous and free of I/O. Presentation and record
//! transport live with consumers; records leave the crate only through the
//! [`round::RecordSink`] trait.

pub mod error;
pub mod generator;
pub mod round;
pub mod search;
pub mod subset;
pub mod vector;

pub use error::{HandoffError, KnapsackError, Result};
