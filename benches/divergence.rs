use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kde_divergence::{DivergenceEstimator, EvaluationGrid, GaussianKde};

/// Build a seeded sample of `n` values spread over `[low, high)`.
fn build_sample(n: usize, low: f64, high: f64, seed: u64) -> Vec<f64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..n).map(|_| low + rng.f64() * (high - low)).collect()
}

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    let estimator = DivergenceEstimator::new();

    for n in [10, 100, 1000, 10_000] {
        let previous = build_sample(n, 10.0, 30.0, 1);
        let current = build_sample(n, 12.0, 32.0, 2);
        group.bench_with_input(
            BenchmarkId::new("sample_size", n),
            &(current, previous),
            |b, (current, previous)| {
                b.iter(|| estimator.compute(current, previous).unwrap());
            },
        );
    }
    group.finish();
}

fn bench_grid_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_points");
    let previous = build_sample(500, 10.0, 30.0, 1);
    let current = build_sample(500, 12.0, 32.0, 2);

    for points in [50, 500, 5000] {
        let grid = EvaluationGrid::new(3.0, 45.0, points).unwrap();
        let estimator = DivergenceEstimator::with_grid(grid);
        group.bench_with_input(BenchmarkId::new("points", points), &estimator, |b, est| {
            b.iter(|| est.compute(&current, &previous).unwrap());
        });
    }
    group.finish();
}

fn bench_kde_fit(c: &mut Criterion) {
    let sample = build_sample(10_000, 0.0, 50.0, 3);
    c.bench_function("kde_fit_10k", |b| {
        b.iter(|| GaussianKde::new(&sample).unwrap());
    });
}

criterion_group!(benches, bench_compute, bench_grid_points, bench_kde_fit);
criterion_main!(benches);
