//! Query point generation over an index's bounding box.
//!
//! Two strategies are provided:
//! - [`RandomGenerator`]: `n` points drawn uniformly from the box, reproducible
//!   from an explicit trial seed.
//! - [`GridGenerator`]: a deterministic lattice of `floor(sqrt(n))` samples per
//!   dimension, endpoints included.

use ndarray::{Array1, Array2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{EvalError, Result};
use crate::index::{BoundingBox, HierarchicalIndex};
use crate::vector::Coordinates;

/// Produces a batch of query points in an index's coordinate space.
pub trait PointGenerator {
    fn generate<I: HierarchicalIndex>(&self, index: &I) -> Result<Vec<I::Point>>;
}

/// Fetch the bounding box and check it agrees with the declared dimensionality.
fn checked_bounds<I: HierarchicalIndex>(index: &I) -> Result<BoundingBox> {
    let bounds = index.bounding_box();
    if bounds.len() != index.dim() {
        return Err(EvalError::DimensionMismatch {
            expected: index.dim(),
            actual: bounds.len(),
        });
    }
    Ok(bounds)
}

fn check_count(n: usize) -> Result<()> {
    if n == 0 {
        return Err(EvalError::InvalidConfiguration {
            reason: "point count must be positive".to_string(),
        });
    }
    Ok(())
}

/// Uniform random points, one seed per trial.
#[derive(Debug, Clone, Copy)]
pub struct RandomGenerator {
    n: usize,
    trial_seed: u64,
}

impl RandomGenerator {
    pub fn new(n: usize, trial_seed: u64) -> Self {
        Self { n, trial_seed }
    }
}

impl PointGenerator for RandomGenerator {
    fn generate<I: HierarchicalIndex>(&self, index: &I) -> Result<Vec<I::Point>> {
        check_count(self.n)?;
        let bounds = checked_bounds(index)?;

        let mut rng = StdRng::seed_from_u64(self.trial_seed);
        let unit: Array2<f32> =
            Array2::random_using((self.n, bounds.len()), Uniform::new(0.0, 1.0), &mut rng);

        let device = index.device();
        Ok(unit
            .rows()
            .into_iter()
            .map(|row| {
                let coords = row
                    .iter()
                    .zip(&bounds)
                    .map(|(u, &(lo, hi))| u * (hi - lo) + lo)
                    .collect();
                <I::Point as Coordinates>::from_coords(coords, device)
            })
            .collect())
    }
}

/// Cartesian lattice spanning the bounding box.
///
/// Yields `floor(sqrt(n))^dim` points, which only equals `n` in two
/// dimensions with a perfect-square `n`.
#[derive(Debug, Clone, Copy)]
pub struct GridGenerator {
    n: usize,
}

impl GridGenerator {
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    /// Samples taken along each dimension.
    pub fn samples_per_dim(&self) -> usize {
        (self.n as f64).sqrt().floor() as usize
    }
}

impl PointGenerator for GridGenerator {
    fn generate<I: HierarchicalIndex>(&self, index: &I) -> Result<Vec<I::Point>> {
        check_count(self.n)?;
        let bounds = checked_bounds(index)?;
        let num = self.samples_per_dim();

        let axes: Vec<Array1<f32>> = bounds
            .iter()
            .map(|&(lo, hi)| Array1::linspace(lo, hi, num))
            .collect();

        // Last dimension varies fastest.
        let mut coords: Vec<Vec<f32>> = vec![Vec::with_capacity(bounds.len())];
        for axis in &axes {
            coords = coords
                .into_iter()
                .flat_map(|prefix| {
                    axis.iter().map(move |&x| {
                        let mut point = prefix.clone();
                        point.push(x);
                        point
                    })
                })
                .collect();
        }

        let device = index.device();
        Ok(coords
            .into_iter()
            .map(|c| <I::Point as Coordinates>::from_coords(c, device))
            .collect())
    }
}
