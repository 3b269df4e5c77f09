//! Round generation.

use super::config::GeneratorConfig;
use crate::round::{clamp_attribute, AttributeVector, Item, Round, ATTRIBUTE_MAX, ATTRIBUTE_MIN};
use crate::search::SearchConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Creates a seeded RNG, or a freshly seeded one when `seed` is `None`.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

/// Generates rounds whose data is shaped so that a small, high-value,
/// tightly compatible subset almost always exists.
///
/// # Algorithm
///
/// 1. Draw a base vector uniformly in `[0, 10)^5`.
/// 2. Pick `similar_count` slots at random; each gets the base vector plus
///    small jitter. The lowest-indexed of them keeps the base vector exactly.
/// 3. Every other slot gets its own random vector plus large jitter.
/// 4. Values are uniform in `[0, max_value]`.
/// 5. The threshold is uniform in `[min_threshold, max_threshold)`,
///    truncated to four decimals.
///
/// Including every item dilutes the average similarity with the scattered
/// slots, so the optimum is usually a strict subset.
///
/// # Usage
///
/// ```
/// use u_knapsack::generator::{GeneratorConfig, ItemGenerator};
///
/// let generator = ItemGenerator::new(GeneratorConfig::default().with_seed(42));
/// let round = generator.generate();
/// assert_eq!(round.len(), 6);
/// assert!(round.threshold() >= 0.88 && round.threshold() < 0.98);
/// ```
#[derive(Debug, Clone)]
pub struct ItemGenerator {
    config: GeneratorConfig,
}

impl ItemGenerator {
    /// Creates a generator.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`GeneratorConfig::validate`]
    /// first to get a descriptive error).
    pub fn new(config: GeneratorConfig) -> Self {
        config.validate().expect("invalid GeneratorConfig");
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a round from the configured seed.
    ///
    /// With a fixed seed every call returns the same round; use
    /// [`generate_with`](Self::generate_with) to draw a sequence.
    pub fn generate(&self) -> Round {
        let mut rng = create_rng(self.config.seed);
        self.generate_with(&mut rng)
    }

    /// Generates a round drawing from `rng`.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> Round {
        let config = &self.config;
        let n = config.item_count;

        let base = random_vector(rng);

        let mut slots: Vec<usize> = (0..n).collect();
        slots.shuffle(rng);
        let similar = &slots[..config.similar_count];
        let anchor = similar.iter().min().copied();

        let mut items = Vec::with_capacity(n);
        for i in 0..n {
            let attributes = if anchor == Some(i) {
                base
            } else if similar.contains(&i) {
                jitter(&base, config.cluster_jitter, rng)
            } else {
                let origin = random_vector(rng);
                jitter(&origin, config.scatter_jitter, rng)
            };
            let value = rng.random_range(0..=config.max_value);
            items.push(Item::new(
                format!("project-{i}"),
                format!("Project {}", i + 1),
                value,
                attributes,
            ));
        }

        let threshold = draw_threshold(rng, config.min_threshold, config.max_threshold);
        let search = SearchConfig::default()
            .with_size_bounds(config.optimal_bounds)
            .with_parallel(config.parallel);
        let round = Round::from_generated(items, threshold, &search);

        tracing::debug!(
            items = n,
            threshold,
            optimal_value = round.optimal().value,
            optimal_size = round.optimal().len(),
            "round generated"
        );
        round
    }
}

fn random_vector<R: Rng>(rng: &mut R) -> AttributeVector {
    std::array::from_fn(|_| rng.random_range(ATTRIBUTE_MIN..ATTRIBUTE_MAX))
}

/// Adds independent uniform noise in `[-noise, noise)` to each component, then clamps.
fn jitter<R: Rng>(origin: &AttributeVector, noise: f64, rng: &mut R) -> AttributeVector {
    if noise <= 0.0 {
        return origin.map(clamp_attribute);
    }
    origin.map(|v| clamp_attribute(v + rng.random_range(-noise..noise)))
}

/// Uniform draw in `[min, max)` truncated to four decimals.
fn draw_threshold<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    let raw = rng.random_range(min..max);
    ((raw * 10_000.0).floor() / 10_000.0).max(min)
}
