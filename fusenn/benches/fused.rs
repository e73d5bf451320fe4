/*
 * Copyright (c) Microsoft Corporation.
 * Licensed under the MIT license.
 */

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use fusenn::{
    fused_l2_nearest_serial,
    views::{Matrix, MatrixView},
    DistanceForm, Element,
};
use rand::{
    distr::{Distribution, StandardUniform},
    rngs::StdRng,
    SeedableRng,
};

fn random_matrix<T: Element>(rng: &mut StdRng, nrows: usize, ncols: usize) -> Matrix<T>
where
    StandardUniform: Distribution<T>,
{
    Matrix::from_fn(|| StandardUniform.sample(rng), nrows, ncols)
}

fn bench_case<T: Element>(
    c: &mut Criterion,
    group: &str,
    queries: MatrixView<'_, T>,
    references: MatrixView<'_, T>,
) {
    let mut group = c.benchmark_group(group);
    let mut indices = vec![0u32; queries.nrows()];
    let mut distances = vec![T::ZERO; queries.nrows()];

    group.bench_function("squared", |f| {
        f.iter(|| {
            fused_l2_nearest_serial(
                queries,
                references,
                DistanceForm::Squared,
                &mut indices,
                None,
            )
            .unwrap()
        });
    });

    group.bench_function("euclidean-with-distances", |f| {
        f.iter(|| {
            fused_l2_nearest_serial(
                queries,
                references,
                DistanceForm::Euclidean,
                &mut indices,
                Some(&mut distances),
            )
            .unwrap()
        });
    });
}

fn benchmark_f32(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xbe9c_52f7_013d_a48e);
    let queries = random_matrix::<f32>(&mut rng, 1024, 96);
    let references = random_matrix::<f32>(&mut rng, 64, 96);
    bench_case(c, "fused-l2-nearest-f32", queries.as_view(), references.as_view());
}

fn benchmark_f64(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0x40d6_ee12_97cb_5a03);
    let queries = random_matrix::<f64>(&mut rng, 1024, 96);
    let references = random_matrix::<f64>(&mut rng, 64, 96);
    bench_case(c, "fused-l2-nearest-f64", queries.as_view(), references.as_view());
}

criterion_group!(
    name = benches;
    config = Criterion::default()
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5));
    targets = benchmark_f32, benchmark_f64,
);
criterion_main!(benches);
