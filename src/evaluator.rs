//! Evaluation runs: generate points, query, score, report.

use log::{debug, info};

use crate::accuracy::{LayerStats, RunReport, TrialSummary};
use crate::config::EvalConfig;
use crate::error::{EvalError, Result};
use crate::generator::{GridGenerator, PointGenerator, RandomGenerator};
use crate::index::{max_height, HierarchicalIndex};
use crate::report::{ReportSink, RunKind};
use crate::runner::QueryRunner;

/// Measures per-layer accuracy of a hierarchical index against exact search.
#[derive(Debug)]
pub struct Evaluator<'a, I: HierarchicalIndex> {
    index: &'a I,
    max_height: usize,
}

impl<'a, I: HierarchicalIndex> Evaluator<'a, I> {
    /// Fails with [`EvalError::EmptyIndex`] when the index has no decision layer.
    pub fn new(index: &'a I) -> Result<Self> {
        let max_height = max_height(index)?;
        if max_height < 2 {
            return Err(EvalError::EmptyIndex);
        }
        Ok(Self { index, max_height })
    }

    pub fn max_height(&self) -> usize {
        self.max_height
    }

    /// Number of internal decision layers, `max_height - 1`.
    pub fn layers(&self) -> usize {
        self.max_height - 1
    }

    /// Score a batch of points. Accuracy is normalized by the batch size.
    pub fn evaluate(&self, points: &[I::Point], k: usize) -> Result<RunReport> {
        if k == 0 {
            return Err(EvalError::InvalidConfiguration {
                reason: "k must be positive".to_string(),
            });
        }

        let runner = QueryRunner::new(self.index, self.layers());
        let mut stats = LayerStats::new(self.layers());
        let mut fully_correct = 0usize;
        for point in points {
            let outcome = runner.run_one(point, k)?;
            if stats.record(&outcome, k) {
                fully_correct += 1;
            }
        }
        debug!(
            "{} of {} queries correct at every traversed layer",
            fully_correct,
            points.len()
        );
        Ok(stats.finalize(points.len()))
    }

    /// Run `config.times` random trials, trial `t` seeded with `t`, and
    /// average their per-layer accuracy.
    pub fn random_queries(
        &self,
        config: &EvalConfig,
        sink: &mut dyn ReportSink,
    ) -> Result<TrialSummary> {
        config.validate()?;

        let mut trials = Vec::with_capacity(config.times);
        for trial in 0..config.times {
            let points = RandomGenerator::new(config.n, trial as u64).generate(self.index)?;
            let report = self.evaluate(&points, config.k)?;
            info!(
                "trial {} finished: mean accuracy {:.2}%",
                trial,
                report.mean_accuracy()
            );
            trials.push(report);
        }

        let summary = TrialSummary::from_trials(trials);
        for (trial, report) in summary.trials.iter().enumerate() {
            sink.run_finished(RunKind::Trial(trial), report)?;
        }
        sink.trials_finished(&summary)?;
        Ok(summary)
    }

    /// One deterministic pass over a lattice of roughly `config.n` points.
    pub fn grid_queries(
        &self,
        config: &EvalConfig,
        sink: &mut dyn ReportSink,
    ) -> Result<RunReport> {
        config.validate()?;

        let points = GridGenerator::new(config.n).generate(self.index)?;
        if points.len() != config.n {
            debug!(
                "grid holds {} points for a requested {}",
                points.len(),
                config.n
            );
        }
        let report = self.evaluate(&points, config.k)?;
        info!(
            "grid run finished: mean accuracy {:.2}%",
            report.mean_accuracy()
        );

        sink.run_finished(RunKind::Grid, &report)?;
        Ok(report)
    }
}
