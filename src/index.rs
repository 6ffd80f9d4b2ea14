//! Contract a hierarchical index must expose to be evaluated

use crate::error::{EvalError, Result};
use crate::vector::Coordinates;

/// Per-dimension `(min, max)` support of an index.
pub type BoundingBox = Vec<(f32, f32)>;

/// A leaf of the hierarchy, identified by its path from the root.
///
/// The path starts with the root itself, so a leaf reached after `d`
/// routing decisions has an index of length `d + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub index: Vec<usize>,
}

impl Leaf {
    pub fn new(index: Vec<usize>) -> Self {
        Self { index }
    }

    pub fn height(&self) -> usize {
        self.index.len()
    }
}

/// The candidate a single layer proposed for a query.
#[derive(Debug, Clone)]
pub struct LayerPrediction<P> {
    /// Layer the prediction was made at, 0 being closest to the root.
    pub layer: usize,
    /// Candidates in rank order; the first one is the layer's top-1.
    pub candidates: Vec<P>,
}

impl<P> LayerPrediction<P> {
    pub fn new(layer: usize, candidates: Vec<P>) -> Self {
        Self { layer, candidates }
    }

    pub fn top(&self) -> Option<&P> {
        self.candidates.first()
    }
}

/// Result of a layer-wise query: one prediction per traversed layer.
#[derive(Debug, Clone)]
pub struct LayeredQuery<P> {
    pub predictions: Vec<LayerPrediction<P>>,
}

impl<P> LayeredQuery<P> {
    pub fn new(predictions: Vec<LayerPrediction<P>>) -> Self {
        Self { predictions }
    }

    /// Number of layers the query actually traversed.
    pub fn reached_depth(&self) -> usize {
        self.predictions.len()
    }
}

/// A tree-structured nearest-neighbour index with a layer-wise query path.
///
/// Queries must be pure: evaluating the same point twice observes the
/// same index state.
pub trait HierarchicalIndex {
    type Point: Coordinates;

    /// All leaves of the hierarchy.
    fn leaves(&self) -> Vec<Leaf>;

    /// Per-dimension bounds of the indexed space.
    fn bounding_box(&self) -> BoundingBox;

    /// Declared coordinate dimensionality.
    fn dim(&self) -> usize;

    /// Device query points must be materialized on.
    fn device(&self) -> &<Self::Point as Coordinates>::Device;

    /// Exhaustive top-`k` query, nearest first.
    fn exact_query(&self, point: &Self::Point, k: usize) -> Result<Vec<Self::Point>>;

    /// Approximate query recording the prediction of every traversed layer.
    fn layered_query(&self, point: &Self::Point) -> Result<LayeredQuery<Self::Point>>;
}

/// Height of the deepest leaf, `max(|leaf.index|)`.
pub fn max_height<I: HierarchicalIndex + ?Sized>(index: &I) -> Result<usize> {
    index
        .leaves()
        .iter()
        .map(Leaf::height)
        .max()
        .ok_or(EvalError::EmptyIndex)
}
