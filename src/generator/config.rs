//! Round generation parameters.

use crate::round::{ATTRIBUTE_MAX, MAX_ITEM_VALUE};
use crate::search::SizeBounds;
use crate::subset::MAX_ITEMS;

/// Configuration for [`ItemGenerator`](super::ItemGenerator).
///
/// Defaults reproduce the standard round shape: six items, three of them
/// clustered tightly around a shared base vector, the rest scattered.
///
/// # Examples
///
/// ```
/// use u_knapsack::generator::GeneratorConfig;
///
/// let config = GeneratorConfig::default()
///     .with_item_count(8)
///     .with_similar_count(4)
///     .with_cluster_jitter(0.5)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Items per round.
    pub item_count: usize,

    /// Items drawn around the shared base vector.
    pub similar_count: usize,

    /// Per-component jitter half-width for clustered items.
    pub cluster_jitter: f64,

    /// Per-component jitter half-width for scattered items.
    pub scatter_jitter: f64,

    /// Inclusive lower bound of the threshold draw.
    pub min_threshold: f64,

    /// Exclusive upper bound of the threshold draw.
    pub max_threshold: f64,

    /// Largest item value drawn (inclusive).
    pub max_value: u32,

    /// Size bounds for the reference optimum stored with each round.
    pub optimal_bounds: SizeBounds,

    /// Whether the reference optimum search runs in parallel.
    pub parallel: bool,

    /// Random seed for [`ItemGenerator::generate`](super::ItemGenerator::generate).
    ///
    /// `None` draws a fresh seed per call.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            item_count: 6,
            similar_count: 3,
            cluster_jitter: 1.0,
            scatter_jitter: 5.0,
            min_threshold: 0.88,
            max_threshold: 0.98,
            max_value: MAX_ITEM_VALUE,
            optimal_bounds: SizeBounds::ROUND_DEFAULT,
            parallel: false,
            seed: None,
        }
    }
}

impl GeneratorConfig {
    pub fn with_item_count(mut self, n: usize) -> Self {
        self.item_count = n;
        self
    }

    pub fn with_similar_count(mut self, n: usize) -> Self {
        self.similar_count = n;
        self
    }

    pub fn with_cluster_jitter(mut self, jitter: f64) -> Self {
        self.cluster_jitter = jitter;
        self
    }

    pub fn with_scatter_jitter(mut self, jitter: f64) -> Self {
        self.scatter_jitter = jitter;
        self
    }

    pub fn with_threshold_range(mut self, min: f64, max: f64) -> Self {
        self.min_threshold = min;
        self.max_threshold = max;
        self
    }

    pub fn with_max_value(mut self, value: u32) -> Self {
        self.max_value = value;
        self
    }

    pub fn with_optimal_bounds(mut self, bounds: SizeBounds) -> Self {
        self.optimal_bounds = bounds;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.item_count == 0 {
            return Err("item_count must be positive".into());
        }
        if self.item_count > MAX_ITEMS {
            return Err(format!(
                "item_count must be at most {MAX_ITEMS}, got {}",
                self.item_count
            ));
        }
        if self.similar_count > self.item_count {
            return Err(format!(
                "similar_count ({}) must not exceed item_count ({})",
                self.similar_count, self.item_count
            ));
        }
        for (name, jitter) in [
            ("cluster_jitter", self.cluster_jitter),
            ("scatter_jitter", self.scatter_jitter),
        ] {
            if !jitter.is_finite() || !(0.0..=ATTRIBUTE_MAX).contains(&jitter) {
                return Err(format!("{name} must be in [0, {ATTRIBUTE_MAX}], got {jitter}"));
            }
        }
        if !self.min_threshold.is_finite() || !self.max_threshold.is_finite() {
            return Err("threshold bounds must be finite".into());
        }
        if self.min_threshold >= self.max_threshold {
            return Err(format!(
                "min_threshold ({}) must be less than max_threshold ({})",
                self.min_threshold, self.max_threshold
            ));
        }
        if self.max_value > MAX_ITEM_VALUE {
            return Err(format!(
                "max_value must be at most {MAX_ITEM_VALUE}, got {}",
                self.max_value
            ));
        }
        if self.optimal_bounds.min > self.optimal_bounds.max {
            return Err("optimal_bounds min must not exceed max".into());
        }
        Ok(())
    }
}
