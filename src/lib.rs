//! # ktree_accuracy
//!
//! Measures how faithfully a hierarchical nearest-neighbour index reproduces
//! exact search, layer by layer.
//!
//! This library provides:
//! - The [`HierarchicalIndex`] contract an index exposes to be evaluated
//! - Random and grid query point generation over the index's bounding box
//! - Per-layer correctness scoring with depth padding for early leaves
//! - Trial averaging and text/JSON/log reporting
//! - A reference [`PartitionTree`] index
//!
//! ## Example
//!
//! ```rust
//! use ktree_accuracy::{CollectingSink, EvalConfig, Evaluator, PartitionTree, TreeParams, Vector};
//!
//! let points: Vec<Vector> = (0..64)
//!     .map(|i| Vector::new(vec![(i % 8) as f32, (i / 8) as f32]))
//!     .collect();
//! let tree = PartitionTree::build(points, TreeParams::new(2, 4, 8)).unwrap();
//!
//! let evaluator = Evaluator::new(&tree).unwrap();
//! let mut sink = CollectingSink::default();
//! let summary = evaluator
//!     .random_queries(&EvalConfig::new(50, 2, 1), &mut sink)
//!     .unwrap();
//! assert_eq!(summary.mean_accuracy.len(), evaluator.layers());
//! ```

pub mod accuracy;
pub mod config;
pub mod distance;
pub mod error;
pub mod evaluator;
pub mod flat_index;
pub mod generator;
pub mod index;
pub mod neighbor_queue;
pub mod report;
pub mod runner;
pub mod tree;
pub mod vector;

pub use accuracy::{is_correct, LayerStats, RunReport, TrialSummary};
pub use config::EvalConfig;
pub use distance::DistanceMetric;
pub use error::{EvalError, Result};
pub use evaluator::Evaluator;
pub use flat_index::FlatIndex;
pub use generator::{GridGenerator, PointGenerator, RandomGenerator};
pub use index::{max_height, BoundingBox, HierarchicalIndex, LayerPrediction, LayeredQuery, Leaf};
pub use report::{CollectingSink, JsonSink, LogSink, ReportSink, RunKind, TextSink};
pub use runner::{QueryOutcome, QueryRunner};
pub use tree::{PartitionTree, TreeParams};
pub use vector::{Coordinates, Device, Vector};
