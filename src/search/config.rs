//! Search configuration.

use super::types::SizeBounds;

/// Configuration for exhaustive subset search.
///
/// # Examples
///
/// ```
/// use u_knapsack::search::{SearchConfig, SizeBounds};
///
/// let config = SearchConfig::default()
///     .with_size_bounds(SizeBounds::new(2, 5))
///     .with_parallel(true)
///     .with_chunk_size(1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Inclusive size bounds. `None` accepts any non-empty subset.
    pub size_bounds: Option<SizeBounds>,

    /// Whether to partition the mask range across rayon workers.
    ///
    /// Only effective with the `parallel` feature; results are identical
    /// to sequential search either way.
    pub parallel: bool,

    /// Number of masks per parallel work unit.
    pub chunk_size: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            size_bounds: None,
            parallel: false,
            chunk_size: 4096,
        }
    }
}

impl SearchConfig {
    pub fn with_size_bounds(mut self, bounds: SizeBounds) -> Self {
        self.size_bounds = Some(bounds);
        self
    }

    pub fn with_optional_size_bounds(mut self, bounds: Option<SizeBounds>) -> Self {
        self.size_bounds = bounds;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_chunk_size(mut self, n: u64) -> Self {
        self.chunk_size = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(bounds) = self.size_bounds {
            if bounds.min > bounds.max {
                return Err(format!(
                    "size_bounds min ({}) must not exceed max ({})",
                    bounds.min, bounds.max
                ));
            }
        }
        if self.chunk_size == 0 {
            return Err("chunk_size must be positive".into());
        }
        Ok(())
    }
}
