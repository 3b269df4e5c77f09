//! Randomized round generation.
//!
//! Rounds are biased so that a genuine, non-trivial optimum exists: a
//! cluster of items jittered around one base vector competes against
//! scattered items, and the compatibility threshold is high enough that
//! taking everything fails.
//!
//! All randomness flows through an explicit RNG, so tests can seed it.

mod config;
mod runner;

pub use config::GeneratorConfig;
pub use runner::{create_rng, ItemGenerator};
