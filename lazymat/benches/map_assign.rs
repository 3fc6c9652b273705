//! Benchmarks for element-wise map assignment across strategy tiers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lazymat::{
    add, assign, max, mul, serial, AssignConfig, ColumnMajor, DynamicMatrix, Evaluator, RowMajor,
    StorageOrder,
};

/// Generates a random square matrix in the requested storage order.
fn random_matrix<O: StorageOrder>(seed: u64, n: usize) -> DynamicMatrix<f64, O> {
    let mut rng = StdRng::seed_from_u64(seed);
    DynamicMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..1.0))
}

fn bench_storage_orders(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_orders");

    for size in [64, 256, 512] {
        let a = random_matrix::<RowMajor>(1, size);
        let b = random_matrix::<RowMajor>(2, size);
        let b_col = random_matrix::<ColumnMajor>(2, size);
        let mut target = DynamicMatrix::<f64>::new(size, size);

        group.bench_with_input(BenchmarkId::new("same_order", size), &size, |bench, _| {
            bench.iter(|| assign(&mut target, &max(&a, &b).unwrap()).unwrap());
            black_box(&target);
        });
        group.bench_with_input(BenchmarkId::new("mixed_order", size), &size, |bench, _| {
            bench.iter(|| assign(&mut target, &max(&a, &b_col).unwrap()).unwrap());
            black_box(&target);
        });
    }

    group.finish();
}

fn bench_strategy_tiers(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_tiers");

    for size in [32, 96] {
        let a = random_matrix::<RowMajor>(3, size);
        let b = random_matrix::<RowMajor>(4, size);
        let product = lazymat::evaluate(&mul(&a, &b).unwrap());
        let mut target = DynamicMatrix::<f64>::new(size, size);

        group.bench_with_input(BenchmarkId::new("direct", size), &size, |bench, _| {
            bench.iter(|| assign(&mut target, &add(&product, &a).unwrap()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("evaluated", size), &size, |bench, _| {
            bench.iter(|| assign(&mut target, &add(mul(&a, &b).unwrap(), &a).unwrap()).unwrap());
        });
    }

    group.finish();
}

fn bench_serial_vs_smp(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_smp");
    let serial_evaluator = Evaluator::new(AssignConfig::serial()).unwrap();
    let smp_evaluator = Evaluator::default();

    for size in [256, 1024] {
        let a = random_matrix::<RowMajor>(5, size);
        let b = random_matrix::<ColumnMajor>(6, size);
        let mut target = DynamicMatrix::<f64>::new(size, size);

        group.bench_with_input(BenchmarkId::new("serial", size), &size, |bench, _| {
            bench.iter(|| serial_evaluator.assign(&mut target, &max(&a, &b).unwrap()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("smp", size), &size, |bench, _| {
            bench.iter(|| smp_evaluator.assign(&mut target, &max(&a, &b).unwrap()).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("serial_section", size), &size, |bench, _| {
            bench.iter(|| {
                smp_evaluator
                    .assign(&mut target, &serial(max(&a, &b).unwrap()))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_storage_orders, bench_strategy_tiers, bench_serial_vs_smp);
criterion_main!(benches);
