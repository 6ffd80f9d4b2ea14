//! Coordinate vectors and the exact-equality capability used to score predictions

use crate::error::{EvalError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Compute device a point lives on.
///
/// The reference index only ever computes on the CPU; other backends
/// declare their own device type through [`Coordinates::Device`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Cpu,
}

/// A point type an index can be queried with.
///
/// Predictions are scored by *exact* equality, never by proximity, so
/// implementations must compare values rather than distances.
pub trait Coordinates: Clone + Debug {
    /// Opaque device/context handle the point is materialized on.
    type Device;

    /// Materialize a point from raw coordinates on `device`.
    fn from_coords(coords: Vec<f32>, device: &Self::Device) -> Self;

    /// Number of coordinates.
    fn dimension(&self) -> usize;

    /// Exact value equality.
    fn exact_eq(&self, other: &Self) -> bool;
}

/// A vector in n-dimensional space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    data: Vec<f32>,
}

impl Vector {
    /// Create a new vector from a Vec<f32>
    pub fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Get the dimension of the vector
    pub fn dimension(&self) -> usize {
        self.data.len()
    }

    /// Get the underlying data as a slice
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Parse a vector from a comma-separated string
    pub fn from_str(s: &str) -> Result<Self> {
        let data: Result<Vec<f32>> = s
            .split(',')
            .map(|x| {
                x.trim()
                    .parse::<f32>()
                    .map_err(|_| EvalError::InvalidConfiguration {
                        reason: format!("Invalid float: {}", x),
                    })
            })
            .collect();
        Ok(Vector::new(data?))
    }
}

impl Coordinates for Vector {
    type Device = Device;

    fn from_coords(coords: Vec<f32>, _device: &Device) -> Self {
        Vector::new(coords)
    }

    fn dimension(&self) -> usize {
        self.data.len()
    }

    fn exact_eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}
