//! Distance metrics for routing and exact search

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};

/// Distance metrics for measuring point similarity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Euclidean (L2) distance
    #[default]
    Euclidean,
    /// Manhattan (L1) distance
    Manhattan,
    /// Cosine similarity (converted to distance: 1 - similarity)
    Cosine,
}

impl DistanceMetric {
    /// Compute the distance between two coordinate slices using this metric
    pub fn distance(&self, a: &[f32], b: &[f32]) -> Result<f32> {
        if a.len() != b.len() {
            return Err(EvalError::DimensionMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }

        match self {
            DistanceMetric::Euclidean => Ok(euclidean_distance(a, b)),
            DistanceMetric::Manhattan => Ok(manhattan_distance(a, b)),
            DistanceMetric::Cosine => cosine_distance(a, b),
        }
    }
}

/// Compute Euclidean (L2) distance
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f32>()
        .sqrt()
}

/// Compute Manhattan (L1) distance
pub fn manhattan_distance(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum()
}

/// Compute cosine distance (1 - cosine similarity)
pub fn cosine_distance(a: &[f32], b: &[f32]) -> Result<f32> {
    let norm_a = dot_product(a, a).sqrt();
    let norm_b = dot_product(b, b).sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(EvalError::QueryFailure(
            "Cannot compute cosine distance with zero vector".to_string(),
        ));
    }

    // Clamp to [-1, 1] to handle floating point errors
    let similarity = (dot_product(a, b) / (norm_a * norm_b)).clamp(-1.0, 1.0);

    Ok(1.0 - similarity)
}

/// Compute dot product of two slices
pub fn dot_product(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
