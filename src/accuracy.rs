//! Per-layer correctness accounting.
//!
//! A query is walked layer by layer against its ground truth. The first
//! incorrect layer ends the walk. Layers the query never reached, because
//! its trace ended at a shallower leaf, are credited with the query's
//! overall verdict: a query that was right all the way down is assumed to
//! stay right below its leaf. Only reached layers count toward the
//! per-layer query tally.

use serde::{Deserialize, Serialize};

use crate::runner::QueryOutcome;
use crate::vector::Coordinates;

/// Whether `prediction` matches the ground truth.
///
/// With `k == 1` it must equal the nearest neighbour; with `k > 1` it may
/// equal any of the first `k` neighbours.
pub fn is_correct<P: Coordinates>(prediction: &P, ground_truth: &[P], k: usize) -> bool {
    if k == 1 {
        return ground_truth
            .first()
            .map_or(false, |nearest| prediction.exact_eq(nearest));
    }
    ground_truth
        .iter()
        .take(k)
        .any(|neighbour| prediction.exact_eq(neighbour))
}

/// Running per-layer counters for one evaluation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStats {
    correct: Vec<u64>,
    queries: Vec<u64>,
}

impl LayerStats {
    /// Counters for `layers` decision layers (`max_height - 1`).
    pub fn new(layers: usize) -> Self {
        Self {
            correct: vec![0; layers],
            queries: vec![0; layers],
        }
    }

    pub fn layers(&self) -> usize {
        self.correct.len()
    }

    pub fn correct_counts(&self) -> &[u64] {
        &self.correct
    }

    pub fn query_counts(&self) -> &[u64] {
        &self.queries
    }

    /// Score one query. Returns whether every traversed layer was correct.
    ///
    /// Layers beyond [`LayerStats::layers`] are ignored;
    /// [`QueryRunner`](crate::runner::QueryRunner) rejects such traces.
    pub fn record<P: Coordinates>(&mut self, outcome: &QueryOutcome<P>, k: usize) -> bool {
        let mut fully_correct = true;
        let layers = self.layers();
        for (layer, prediction) in outcome.trace.predictions.iter().take(layers).enumerate() {
            self.queries[layer] += 1;
            let hit = prediction
                .top()
                .map_or(false, |p| is_correct(p, &outcome.ground_truth, k));
            if !hit {
                fully_correct = false;
                break;
            }
            self.correct[layer] += 1;
        }

        let reached = outcome.reached_depth().min(layers);
        for correct in &mut self.correct[reached..] {
            *correct += u64::from(fully_correct);
        }
        fully_correct
    }

    /// Freeze the counters into percentages normalized by `n`, the number of
    /// points in the run.
    pub fn finalize(&self, n: usize) -> RunReport {
        let accuracy = self
            .correct
            .iter()
            .map(|&c| if n == 0 { 0.0 } else { 100.0 * c as f64 / n as f64 })
            .collect();
        RunReport {
            points: n,
            query_counts: self.queries.clone(),
            correct_counts: self.correct.clone(),
            accuracy,
        }
    }
}

/// Per-layer statistics of one completed run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Normalizing point count.
    pub points: usize,
    /// How many queries reached each layer.
    pub query_counts: Vec<u64>,
    /// Correct predictions per layer, padding included.
    pub correct_counts: Vec<u64>,
    /// `100 * correct / points` per layer.
    pub accuracy: Vec<f64>,
}

impl RunReport {
    /// Unweighted mean over layers.
    pub fn mean_accuracy(&self) -> f64 {
        if self.accuracy.is_empty() {
            return 0.0;
        }
        self.accuracy.iter().sum::<f64>() / self.accuracy.len() as f64
    }
}

/// Reports of every random trial plus their layer-wise mean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub trials: Vec<RunReport>,
    pub mean_accuracy: Vec<f64>,
}

impl TrialSummary {
    pub fn from_trials(trials: Vec<RunReport>) -> Self {
        let layers = trials.first().map_or(0, |t| t.accuracy.len());
        let mut mean_accuracy = vec![0.0; layers];
        for trial in &trials {
            for (sum, acc) in mean_accuracy.iter_mut().zip(&trial.accuracy) {
                *sum += acc;
            }
        }
        if !trials.is_empty() {
            let times = trials.len() as f64;
            for sum in &mut mean_accuracy {
                *sum /= times;
            }
        }
        Self {
            trials,
            mean_accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{LayerPrediction, LayeredQuery};
    use crate::vector::Vector;
    use approx::assert_relative_eq;

    fn v(x: f32) -> Vector {
        Vector::new(vec![x])
    }

    /// Ground truth `[0]` (plus `[1]` as second neighbour); each `true` in
    /// `hits` predicts `0`, each `false` predicts `9`.
    fn outcome(hits: &[bool]) -> QueryOutcome<Vector> {
        QueryOutcome {
            ground_truth: vec![v(0.0), v(1.0)],
            trace: LayeredQuery::new(
                hits.iter()
                    .enumerate()
                    .map(|(l, &hit)| LayerPrediction::new(l, vec![v(if hit { 0.0 } else { 9.0 })]))
                    .collect(),
            ),
        }
    }

    #[test]
    fn test_is_correct_k1_uses_nearest_only() {
        let truth = vec![v(0.0), v(1.0)];
        assert!(is_correct(&v(0.0), &truth, 1));
        assert!(!is_correct(&v(1.0), &truth, 1));
    }

    #[test]
    fn test_is_correct_k2_is_set_membership() {
        let truth = vec![v(0.0), v(1.0)];
        assert!(is_correct(&v(1.0), &truth, 2));
        assert!(!is_correct(&v(2.0), &truth, 2));
    }

    #[test]
    fn test_record_stops_at_first_miss() {
        let mut stats = LayerStats::new(3);
        assert!(!stats.record(&outcome(&[true, false, true]), 1));
        assert_eq!(stats.query_counts(), &[1, 1, 0]);
        assert_eq!(stats.correct_counts(), &[1, 0, 0]);
    }

    #[test]
    fn test_shallow_correct_query_pads_deeper_layers() {
        let mut stats = LayerStats::new(3);
        assert!(stats.record(&outcome(&[true]), 1));
        assert_eq!(stats.query_counts(), &[1, 0, 0]);
        assert_eq!(stats.correct_counts(), &[1, 1, 1]);
    }

    #[test]
    fn test_shallow_wrong_query_pads_nothing() {
        let mut stats = LayerStats::new(3);
        stats.record(&outcome(&[false]), 1);
        assert_eq!(stats.query_counts(), &[1, 0, 0]);
        assert_eq!(stats.correct_counts(), &[0, 0, 0]);
    }

    #[test]
    fn test_empty_candidate_list_is_a_miss() {
        let mut stats = LayerStats::new(1);
        let mut o = outcome(&[true]);
        o.trace.predictions[0].candidates.clear();
        assert!(!stats.record(&o, 1));
        assert_eq!(stats.correct_counts(), &[0]);
    }

    #[test]
    fn test_mixed_depth_scenario() {
        // Traces of depth [2, 1, 2, 2] scored (T,T) (F) (T,T) (T,F).
        let mut stats = LayerStats::new(2);
        stats.record(&outcome(&[true, true]), 1);
        stats.record(&outcome(&[false]), 1);
        stats.record(&outcome(&[true, true]), 1);
        stats.record(&outcome(&[true, false]), 1);

        let report = stats.finalize(4);
        assert_eq!(report.query_counts, vec![4, 3]);
        assert_eq!(report.correct_counts, vec![3, 2]);
        assert_relative_eq!(report.accuracy[0], 75.0);
        assert_relative_eq!(report.accuracy[1], 50.0);
        assert_relative_eq!(report.mean_accuracy(), 62.5);
    }

    #[test]
    fn test_finalize_uses_run_size_not_reached_count() {
        let mut stats = LayerStats::new(2);
        stats.record(&outcome(&[true, true]), 1);
        stats.record(&outcome(&[false]), 1);
        let report = stats.finalize(2);
        assert_eq!(report.query_counts, vec![2, 1]);
        assert_relative_eq!(report.accuracy[1], 50.0);
    }

    #[test]
    fn test_trial_mean() {
        let a = RunReport {
            points: 2,
            query_counts: vec![2, 2],
            correct_counts: vec![2, 1],
            accuracy: vec![100.0, 50.0],
        };
        let b = RunReport {
            accuracy: vec![50.0, 0.0],
            ..a.clone()
        };
        let summary = TrialSummary::from_trials(vec![a, b]);
        assert_eq!(summary.trials.len(), 2);
        assert_relative_eq!(summary.mean_accuracy[0], 75.0);
        assert_relative_eq!(summary.mean_accuracy[1], 25.0);
    }

    #[test]
    fn test_trial_mean_empty() {
        let summary = TrialSummary::from_trials(vec![]);
        assert!(summary.mean_accuracy.is_empty());
    }
}
