//! Reference hierarchical index: a k-ary space-partitioning tree.
//!
//! Each internal node routes a query to the child whose centroid is
//! nearest and predicts the nearest point inside that child. A query stops
//! once it reaches a leaf, so leaves at different depths yield traces of
//! different lengths.

mod node;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;
use crate::error::{EvalError, Result};
use crate::flat_index::FlatIndex;
use crate::index::{BoundingBox, HierarchicalIndex, LayerPrediction, LayeredQuery, Leaf};
use crate::vector::{Device, Vector};

use node::Node;

/// Construction parameters for a [`PartitionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeParams {
    /// Children per internal node.
    pub branching: usize,
    /// Nodes holding at most this many points become leaves.
    pub leaf_size: usize,
    /// Hard cap on the number of routing decisions.
    pub max_depth: usize,
    /// Metric for routing and exact search.
    pub metric: DistanceMetric,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            branching: 4,
            leaf_size: 16,
            max_depth: 16,
            metric: DistanceMetric::Euclidean,
        }
    }
}

impl TreeParams {
    pub fn new(branching: usize, leaf_size: usize, max_depth: usize) -> Self {
        Self {
            branching,
            leaf_size,
            max_depth,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.branching < 2 {
            return Err(EvalError::InvalidConfiguration {
                reason: "branching must be at least 2".to_string(),
            });
        }
        if self.leaf_size == 0 {
            return Err(EvalError::InvalidConfiguration {
                reason: "leaf_size must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// A built partition tree over a fixed point set.
#[derive(Debug)]
pub struct PartitionTree {
    store: FlatIndex,
    root: Node,
    bounds: BoundingBox,
    dim: usize,
    device: Device,
}

impl PartitionTree {
    /// Build the tree. All points must share one dimensionality.
    pub fn build(points: Vec<Vector>, params: TreeParams) -> Result<Self> {
        params.validate()?;
        if points.is_empty() {
            return Err(EvalError::EmptyIndex);
        }

        let mut store = FlatIndex::new(params.metric);
        for point in points {
            store.add(point)?;
        }
        let dim = store.dimension().unwrap_or(0);
        if dim == 0 {
            return Err(EvalError::InvalidConfiguration {
                reason: "points must have at least one dimension".to_string(),
            });
        }

        let ids: Vec<usize> = (0..store.len()).collect();
        let bounds = node::bounds(store.vectors(), &ids);
        let root = Node::build(
            store.vectors(),
            ids,
            0,
            params.branching,
            params.leaf_size,
            params.max_depth,
        );
        debug!(
            "built partition tree over {} points in {} dimensions",
            store.len(),
            dim
        );

        Ok(Self {
            store,
            root,
            bounds,
            dim,
            device: Device::Cpu,
        })
    }

    fn nearest_child<'n>(&self, node: &'n Node, query: &[f32]) -> Result<&'n Node> {
        let metric = self.store.metric();
        let mut best: Option<(f32, &Node)> = None;
        for child in &node.children {
            let d = metric.distance(query, &child.centroid)?;
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, child));
            }
        }
        best.map(|(_, child)| child)
            .ok_or_else(|| EvalError::QueryFailure("internal node without children".to_string()))
    }

    fn resolve(&self, id: usize) -> Result<Vector> {
        self.store
            .get(id)
            .cloned()
            .ok_or_else(|| EvalError::QueryFailure(format!("unknown point id {}", id)))
    }
}

impl HierarchicalIndex for PartitionTree {
    type Point = Vector;

    fn leaves(&self) -> Vec<Leaf> {
        let mut paths = Vec::new();
        self.root.leaf_paths(&mut vec![0], &mut paths);
        paths.into_iter().map(Leaf::new).collect()
    }

    fn bounding_box(&self) -> BoundingBox {
        self.bounds.clone()
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn device(&self) -> &Device {
        &self.device
    }

    fn exact_query(&self, point: &Vector, k: usize) -> Result<Vec<Vector>> {
        self.store
            .search(point.as_slice(), k)?
            .into_iter()
            .map(|n| self.resolve(n.id))
            .collect()
    }

    fn layered_query(&self, point: &Vector) -> Result<LayeredQuery<Vector>> {
        let query = point.as_slice();
        let mut predictions = Vec::new();
        let mut node = &self.root;
        while !node.is_leaf() {
            node = self.nearest_child(node, query)?;
            let top = self.store.search_among(node.ids.iter().copied(), query, 1)?;
            let candidates = top
                .into_iter()
                .map(|n| self.resolve(n.id))
                .collect::<Result<Vec<_>>>()?;
            predictions.push(LayerPrediction::new(predictions.len(), candidates));
        }
        Ok(LayeredQuery::new(predictions))
    }
}
