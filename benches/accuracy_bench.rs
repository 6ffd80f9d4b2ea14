//! Evaluation throughput on the reference partition tree

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ktree_accuracy::{
    Evaluator, GridGenerator, PartitionTree, PointGenerator, RandomGenerator, TreeParams, Vector,
};

fn create_random_vectors(n: usize, dim: usize) -> Vec<Vector> {
    (0..n)
        .map(|_| {
            let data: Vec<f32> = (0..dim).map(|_| rand::random::<f32>()).collect();
            Vector::new(data)
        })
        .collect()
}

fn benchmark_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");
    group.sample_size(20);

    for &size in &[1_000, 10_000] {
        let tree =
            PartitionTree::build(create_random_vectors(size, 8), TreeParams::default()).unwrap();
        let evaluator = Evaluator::new(&tree).unwrap();
        let points = RandomGenerator::new(100, 0).generate(&tree).unwrap();

        group.bench_with_input(BenchmarkId::new("k1", size), &size, |b, _| {
            b.iter(|| evaluator.evaluate(black_box(&points), 1).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("k5", size), &size, |b, _| {
            b.iter(|| evaluator.evaluate(black_box(&points), 5).unwrap());
        });
    }

    group.finish();
}

fn benchmark_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let tree = PartitionTree::build(create_random_vectors(1_000, 3), TreeParams::default()).unwrap();

    group.bench_function("random_10000", |b| {
        b.iter(|| RandomGenerator::new(10_000, 1).generate(&tree).unwrap());
    });
    group.bench_function("grid_400", |b| {
        b.iter(|| GridGenerator::new(400).generate(&tree).unwrap());
    });

    group.finish();
}

criterion_group!(benches, benchmark_evaluate, benchmark_generate);
criterion_main!(benches);
