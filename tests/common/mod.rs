//! Scripted index shared by the integration tests.

#![allow(dead_code)]

use ktree_accuracy::{
    BoundingBox, Device, EvalError, HierarchicalIndex, LayerPrediction, LayeredQuery, Leaf,
    Result, Vector,
};

/// Query `i` is the point `[i]`; its neighbours are `[0], [1], [2], ...` and
/// its trace is `traces[i]`, each entry naming the predicted value.
pub struct Scripted {
    pub layers: usize,
    pub traces: Vec<Vec<f32>>,
    pub device: Device,
}

impl Scripted {
    pub fn new(layers: usize, traces: Vec<Vec<f32>>) -> Self {
        Self {
            layers,
            traces,
            device: Device::Cpu,
        }
    }

    pub fn points(&self) -> Vec<Vector> {
        (0..self.traces.len())
            .map(|i| Vector::new(vec![i as f32]))
            .collect()
    }
}

impl HierarchicalIndex for Scripted {
    type Point = Vector;

    fn leaves(&self) -> Vec<Leaf> {
        vec![Leaf::new(vec![0; self.layers + 1]), Leaf::new(vec![0, 1])]
    }

    fn bounding_box(&self) -> BoundingBox {
        vec![(0.0, self.traces.len() as f32)]
    }

    fn dim(&self) -> usize {
        1
    }

    fn device(&self) -> &Device {
        &self.device
    }

    fn exact_query(&self, _point: &Vector, k: usize) -> Result<Vec<Vector>> {
        Ok((0..k).map(|j| Vector::new(vec![j as f32])).collect())
    }

    fn layered_query(&self, point: &Vector) -> Result<LayeredQuery<Vector>> {
        let id = point.as_slice()[0] as usize;
        let trace = self
            .traces
            .get(id)
            .ok_or_else(|| EvalError::QueryFailure(format!("no script for {}", id)))?;
        Ok(LayeredQuery::new(
            trace
                .iter()
                .enumerate()
                .map(|(layer, &x)| LayerPrediction::new(layer, vec![Vector::new(vec![x])]))
                .collect(),
        ))
    }
}
