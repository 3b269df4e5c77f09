//! Cosine similarity and pairwise averages.

use crate::error::{KnapsackError, Result};

/// Shared kernel. Callers guarantee `a.len() == b.len()`.
fn cosine_kernel(a: &[f64], b: &[f64]) -> f64 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    // sqrt of the product (not product of sqrts) keeps cos(a, a) == 1.0 exactly.
    let denom = (norm_a * norm_b).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return 0.0;
    }
    (dot / denom).clamp(-1.0, 1.0)
}

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
///
/// Returns `0.0` when either vector has zero magnitude.
///
/// # Errors
///
/// [`KnapsackError::DimensionMismatch`] if the vectors differ in length.
///
/// # Examples
///
/// ```
/// use u_knapsack::vector::cosine_similarity;
///
/// let s = cosine_similarity(&[1.0, 0.0], &[0.0, 2.0]).unwrap();
/// assert!(s.abs() < 1e-12);
/// assert!(cosine_similarity(&[1.0], &[1.0, 2.0]).is_err());
/// ```
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(KnapsackError::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(cosine_kernel(a, b))
}

/// Cosine similarity for fixed-size vectors. Cannot fail.
pub fn cosine_similarity_fixed<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    cosine_kernel(a, b)
}

/// Mean cosine similarity over all unordered pairs.
///
/// Returns `0.0` for fewer than two vectors: a singleton has no internal
/// compatibility to score.
///
/// # Errors
///
/// [`KnapsackError::DimensionMismatch`] if any vector differs in length
/// from the first.
pub fn average_pairwise_similarity<V: AsRef<[f64]>>(vectors: &[V]) -> Result<f64> {
    let Some(first) = vectors.first() else {
        return Ok(0.0);
    };
    let dim = first.as_ref().len();
    if let Some(bad) = vectors.iter().find(|v| v.as_ref().len() != dim) {
        return Err(KnapsackError::DimensionMismatch {
            left: dim,
            right: bad.as_ref().len(),
        });
    }

    Ok(pairwise_mean(vectors.len(), |i, j| {
        cosine_kernel(vectors[i].as_ref(), vectors[j].as_ref())
    }))
}

/// [`average_pairwise_similarity`] for fixed-size vectors.
pub fn average_pairwise_similarity_fixed<const N: usize>(vectors: &[&[f64; N]]) -> f64 {
    pairwise_mean(vectors.len(), |i, j| {
        cosine_similarity_fixed(vectors[i], vectors[j])
    })
}

/// Mean of `score(i, j)` over `i < j < n`, summed in row-major order.
pub(crate) fn pairwise_mean(n: usize, mut score: impl FnMut(usize, usize) -> f64) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        for j in (i + 1)..n {
            sum += score(i, j);
        }
    }
    sum / (n * (n - 1) / 2) as f64
}
