//! Runs the exact and layer-wise queries for a single point.

use log::debug;

use crate::error::{EvalError, Result};
use crate::index::{HierarchicalIndex, LayeredQuery};
use crate::vector::Coordinates;

/// Ground truth and layer-wise trace for one query point.
#[derive(Debug, Clone)]
pub struct QueryOutcome<P> {
    /// Exact top-`k` neighbours, nearest first.
    pub ground_truth: Vec<P>,
    /// One prediction per traversed layer.
    pub trace: LayeredQuery<P>,
}

impl<P> QueryOutcome<P> {
    pub fn reached_depth(&self) -> usize {
        self.trace.reached_depth()
    }
}

/// Drives both query paths of an index.
#[derive(Debug)]
pub struct QueryRunner<'a, I: HierarchicalIndex> {
    index: &'a I,
    max_depth: usize,
}

impl<'a, I: HierarchicalIndex> QueryRunner<'a, I> {
    /// `max_depth` is the number of internal decision layers, `max_height - 1`.
    pub fn new(index: &'a I, max_depth: usize) -> Self {
        Self { index, max_depth }
    }

    pub fn run_one(&self, point: &I::Point, k: usize) -> Result<QueryOutcome<I::Point>> {
        if point.dimension() != self.index.dim() {
            return Err(EvalError::DimensionMismatch {
                expected: self.index.dim(),
                actual: point.dimension(),
            });
        }

        let ground_truth = self.index.exact_query(point, k)?;
        if ground_truth.len() != k {
            return Err(EvalError::IncompleteGroundTruth {
                expected: k,
                actual: ground_truth.len(),
            });
        }

        let trace = self.index.layered_query(point)?;
        let depth = trace.reached_depth();
        if depth == 0 || depth > self.max_depth {
            debug!("rejecting trace of depth {} for {:?}", depth, point);
            return Err(EvalError::InvalidTrace {
                depth,
                max_depth: self.max_depth,
            });
        }

        Ok(QueryOutcome {
            ground_truth,
            trace,
        })
    }
}
