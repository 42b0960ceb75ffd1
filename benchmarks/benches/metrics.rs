use benchmarks::metrics::Metrics;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn labels(n: usize, offset: usize) -> Vec<String> {
    (0..n).map(|i| ((i + offset) % 3).to_string()).collect()
}

fn bench_accuracy(c: &mut Criterion) {
    for size in [100, 1000, 10000, 100000].iter() {
        c.bench_with_input(BenchmarkId::new("accuracy", size), size, |b, &n| {
            let y_true = labels(n, 0);
            let y_pred = labels(n, n % 7);

            b.iter(|| {
                let accuracy = Metrics::accuracy(black_box(&y_true), black_box(&y_pred));
                black_box(accuracy);
            });
        });
    }
}

fn bench_accuracy_on_subset(c: &mut Criterion) {
    for size in [1000, 100000].iter() {
        c.bench_with_input(BenchmarkId::new("accuracy_on", size), size, |b, &n| {
            let y_true = labels(n, 0);
            let y_pred = labels(n, 1);
            let rows: Vec<usize> = (0..n).step_by(5).collect();

            b.iter(|| {
                let accuracy = Metrics::accuracy_on(black_box(&y_true), black_box(&y_pred), &rows);
                black_box(accuracy);
            });
        });
    }
}

criterion_group!(benches, bench_accuracy, bench_accuracy_on_subset);
criterion_main!(benches);
