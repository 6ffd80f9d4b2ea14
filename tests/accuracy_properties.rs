//! Properties of per-layer scoring, checked against scripted traces.

mod common;

use approx::assert_relative_eq;
use common::Scripted;
use ktree_accuracy::{EvalError, Evaluator};
use proptest::prelude::*;

/// Prediction `0.0` is the nearest neighbour, `1.0` the second one,
/// `9.0` is never a neighbour.
const HIT: f32 = 0.0;
const SECOND: f32 = 1.0;
const MISS: f32 = 9.0;

#[test]
fn test_mixed_depth_scenario() {
    // Three layers deep at most; traces of depth [2, 1, 2, 2].
    let index = Scripted::new(
        2,
        vec![vec![HIT, HIT], vec![MISS], vec![HIT, HIT], vec![HIT, MISS]],
    );
    let evaluator = Evaluator::new(&index).unwrap();
    let report = evaluator.evaluate(&index.points(), 1).unwrap();

    assert_eq!(report.query_counts, vec![4, 3]);
    assert_eq!(report.correct_counts, vec![3, 2]);
    assert_relative_eq!(report.accuracy[0], 75.0);
    assert_relative_eq!(report.accuracy[1], 50.0);
}

#[test]
fn test_early_leaf_inherits_verdict() {
    let index = Scripted::new(3, vec![vec![HIT], vec![HIT, MISS], vec![HIT, HIT, HIT]]);
    let evaluator = Evaluator::new(&index).unwrap();
    let report = evaluator.evaluate(&index.points(), 1).unwrap();

    assert_eq!(report.query_counts, vec![3, 2, 1]);
    // query 0 pads layers 1 and 2; query 1 pads nothing
    assert_eq!(report.correct_counts, vec![3, 2, 2]);
}

#[test]
fn test_second_neighbour_counts_only_with_k2() {
    let index = Scripted::new(2, vec![vec![HIT, SECOND]]);
    let evaluator = Evaluator::new(&index).unwrap();

    let k1 = evaluator.evaluate(&index.points(), 1).unwrap();
    let k2 = evaluator.evaluate(&index.points(), 2).unwrap();
    assert_eq!(k1.correct_counts, vec![1, 0]);
    assert_eq!(k2.correct_counts, vec![1, 1]);
}

#[test]
fn test_trace_deeper_than_tree_aborts_run() {
    let index = Scripted::new(2, vec![vec![HIT], vec![HIT, HIT, HIT]]);
    let evaluator = Evaluator::new(&index).unwrap();
    assert!(matches!(
        evaluator.evaluate(&index.points(), 1),
        Err(EvalError::InvalidTrace {
            depth: 3,
            max_depth: 2
        })
    ));
}

fn scripts() -> impl Strategy<Value = (usize, Vec<Vec<f32>>)> {
    (1usize..5).prop_flat_map(|layers| {
        let trace = prop::collection::vec(prop::sample::select(vec![HIT, SECOND, MISS]), 1..=layers);
        (Just(layers), prop::collection::vec(trace, 1..40))
    })
}

proptest! {
    #[test]
    fn prop_every_query_reaches_layer_zero((layers, traces) in scripts()) {
        let index = Scripted::new(layers, traces);
        let evaluator = Evaluator::new(&index).unwrap();
        let report = evaluator.evaluate(&index.points(), 1).unwrap();
        prop_assert_eq!(report.query_counts[0], index.traces.len() as u64);
    }

    #[test]
    fn prop_query_counts_non_increasing((layers, traces) in scripts(), k in 1usize..3) {
        let index = Scripted::new(layers, traces);
        let evaluator = Evaluator::new(&index).unwrap();
        let report = evaluator.evaluate(&index.points(), k).unwrap();
        for pair in report.query_counts.windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn prop_accuracy_is_a_percentage((layers, traces) in scripts(), k in 1usize..3) {
        let index = Scripted::new(layers, traces);
        let evaluator = Evaluator::new(&index).unwrap();
        let report = evaluator.evaluate(&index.points(), k).unwrap();
        prop_assert_eq!(report.accuracy.len(), layers);
        for acc in &report.accuracy {
            prop_assert!((0.0..=100.0).contains(acc));
        }
    }

    #[test]
    fn prop_k2_never_worse_than_k1((layers, traces) in scripts()) {
        let index = Scripted::new(layers, traces);
        let evaluator = Evaluator::new(&index).unwrap();
        let k1 = evaluator.evaluate(&index.points(), 1).unwrap();
        let k2 = evaluator.evaluate(&index.points(), 2).unwrap();
        for (a, b) in k1.accuracy.iter().zip(&k2.accuracy) {
            prop_assert!(b >= a);
        }
    }
}
