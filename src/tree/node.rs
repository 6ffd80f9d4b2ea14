//! Recursive construction of the partition tree.

use crate::index::BoundingBox;
use crate::vector::Vector;

/// A subtree: every point id below it, its centroid, and its children.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) ids: Vec<usize>,
    pub(crate) centroid: Vec<f32>,
    pub(crate) children: Vec<Node>,
}

impl Node {
    pub(crate) fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Split `ids` until every node holds at most `leaf_size` points or
    /// `max_depth` is reached.
    pub(crate) fn build(
        vectors: &[Vector],
        mut ids: Vec<usize>,
        depth: usize,
        branching: usize,
        leaf_size: usize,
        max_depth: usize,
    ) -> Node {
        let centroid = centroid(vectors, &ids);
        if ids.len() <= leaf_size || depth >= max_depth || branching < 2 {
            return Node {
                ids,
                centroid,
                children: Vec::new(),
            };
        }

        let axis = widest_axis(&bounds(vectors, &ids));
        ids.sort_by(|&a, &b| {
            vectors[a].as_slice()[axis]
                .total_cmp(&vectors[b].as_slice()[axis])
                .then(a.cmp(&b))
        });

        let chunk = ids.len().div_ceil(branching);
        let children = ids
            .chunks(chunk)
            .map(|part| {
                Node::build(
                    vectors,
                    part.to_vec(),
                    depth + 1,
                    branching,
                    leaf_size,
                    max_depth,
                )
            })
            .collect();

        Node {
            ids,
            centroid,
            children,
        }
    }

    /// Paths of every leaf below this node, each prefixed with `path`.
    pub(crate) fn leaf_paths(&self, path: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if self.is_leaf() {
            out.push(path.clone());
            return;
        }
        for (i, child) in self.children.iter().enumerate() {
            path.push(i);
            child.leaf_paths(path, out);
            path.pop();
        }
    }
}

/// Per-dimension `(min, max)` over `ids`.
pub(crate) fn bounds(vectors: &[Vector], ids: &[usize]) -> BoundingBox {
    let dim = ids.first().map_or(0, |&id| vectors[id].dimension());
    let mut bounds = vec![(f32::INFINITY, f32::NEG_INFINITY); dim];
    for &id in ids {
        for (b, &x) in bounds.iter_mut().zip(vectors[id].as_slice()) {
            b.0 = b.0.min(x);
            b.1 = b.1.max(x);
        }
    }
    bounds
}

fn widest_axis(bounds: &BoundingBox) -> usize {
    bounds
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| (a.1 - a.0).total_cmp(&(b.1 - b.0)))
        .map_or(0, |(axis, _)| axis)
}

fn centroid(vectors: &[Vector], ids: &[usize]) -> Vec<f32> {
    let dim = ids.first().map_or(0, |&id| vectors[id].dimension());
    let mut sum = vec![0.0f32; dim];
    for &id in ids {
        for (s, x) in sum.iter_mut().zip(vectors[id].as_slice()) {
            *s += x;
        }
    }
    let count = ids.len().max(1) as f32;
    sum.iter_mut().for_each(|s| *s /= count);
    sum
}
