//! Evaluation configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Options recognised by both evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Number of query points per run.
    pub n: usize,
    /// Random trials to average over. Ignored by the grid evaluator.
    pub times: usize,
    /// Neighbour count used for ground truth.
    pub k: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { n: 300, times: 4, k: 1 }
    }
}

impl EvalConfig {
    pub fn new(n: usize, times: usize, k: usize) -> Self {
        Self { n, times, k }
    }

    /// Defaults used for grid evaluation.
    pub fn grid_default() -> Self {
        Self {
            n: 500,
            ..Self::default()
        }
    }

    /// Reject non-positive counts before any query runs.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field: &str| EvalError::InvalidConfiguration {
            reason: format!("{} must be positive", field),
        };
        if self.n == 0 {
            return Err(invalid("n"));
        }
        if self.times == 0 {
            return Err(invalid("times"));
        }
        if self.k == 0 {
            return Err(invalid("k"));
        }
        Ok(())
    }

    /// Load and validate a JSON config. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: EvalConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }
}
