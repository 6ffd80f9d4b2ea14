//! Brute-force flat store: O(n) exact k-NN, used as ground truth.

use crate::distance::DistanceMetric;
use crate::error::{EvalError, Result};
use crate::neighbor_queue::{Neighbor, TopK};
use crate::vector::Vector;

/// Points addressed by their insertion position.
#[derive(Debug)]
pub struct FlatIndex {
    vectors: Vec<Vector>,
    dimension: Option<usize>,
    metric: DistanceMetric,
}

impl FlatIndex {
    /// Create a new empty flat index with the given distance metric.
    pub fn new(metric: DistanceMetric) -> Self {
        Self {
            vectors: Vec::new(),
            dimension: None,
            metric,
        }
    }

    /// Append a point and return its id.
    pub fn add(&mut self, vector: Vector) -> Result<usize> {
        let dim = vector.dimension();
        match self.dimension {
            Some(expected) if expected != dim => {
                return Err(EvalError::DimensionMismatch {
                    expected,
                    actual: dim,
                });
            }
            Some(_) => {}
            None => self.dimension = Some(dim),
        }
        self.vectors.push(vector);
        Ok(self.vectors.len() - 1)
    }

    pub fn get(&self, id: usize) -> Option<&Vector> {
        self.vectors.get(id)
    }

    pub fn vectors(&self) -> &[Vector] {
        &self.vectors
    }

    pub fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Exact `k` nearest neighbours over every stored point.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        self.search_among(0..self.vectors.len(), query, k)
    }

    /// Exact `k` nearest neighbours restricted to `ids`.
    pub fn search_among<It>(&self, ids: It, query: &[f32], k: usize) -> Result<Vec<Neighbor>>
    where
        It: IntoIterator<Item = usize>,
    {
        let mut top = TopK::new(k);
        for id in ids {
            let vector = self
                .vectors
                .get(id)
                .ok_or_else(|| EvalError::QueryFailure(format!("unknown point id {}", id)))?;
            let distance = self.metric.distance(query, vector.as_slice())?;
            top.push(Neighbor::new(id, distance));
        }
        Ok(top.into_sorted_vec())
    }
}
