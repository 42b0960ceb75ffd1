use autonbox_rs::classifier::{KNeighborsClassifier, RandomForestClassifier};
use autonbox_rs::{IterativeLabeling, IterativeLabelingHyperparams, SupervisedLearner};
use benchmarks::SyntheticTask;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_fit_random_forest(c: &mut Criterion) {
    let mut group = c.benchmark_group("fit_random_forest");
    group.sample_size(10);
    for n_rows in [200, 1000].iter() {
        let task = SyntheticTask::two_blobs(*n_rows, 4, 0.1, 0);
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &task, |b, task| {
            b.iter(|| {
                let forest = RandomForestClassifier::new()
                    .with_n_estimators(20)
                    .with_random_state(0);
                let mut primitive =
                    IterativeLabeling::new(IterativeLabelingHyperparams::with_instance(forest));
                primitive.set_training_data(task.features.clone(), task.labels.clone());
                primitive.fit(None, None).expect("fit failed");
                black_box(primitive)
            });
        });
    }
    group.finish();
}

fn bench_fit_k_neighbors(c: &mut Criterion) {
    for n_rows in [200, 1000].iter() {
        let task = SyntheticTask::two_blobs(*n_rows, 4, 0.1, 0);
        c.bench_with_input(BenchmarkId::new("fit_k_neighbors", n_rows), &task, |b, task| {
            b.iter(|| {
                let mut primitive = IterativeLabeling::new(
                    IterativeLabelingHyperparams::with_instance(KNeighborsClassifier::new(5)),
                );
                primitive.set_training_data(task.features.clone(), task.labels.clone());
                primitive.fit(None, None).expect("fit failed");
                black_box(primitive)
            });
        });
    }
}

fn bench_produce(c: &mut Criterion) {
    let task = SyntheticTask::two_blobs(1000, 4, 0.1, 0);
    let forest = RandomForestClassifier::new()
        .with_n_estimators(20)
        .with_random_state(0);
    let mut primitive = IterativeLabeling::new(IterativeLabelingHyperparams::with_instance(forest));
    primitive.set_training_data(task.features.clone(), task.labels.clone());
    primitive.fit(None, None).expect("fit failed");

    c.bench_function("produce_random_forest_1000", |b| {
        b.iter(|| {
            let predicted = primitive
                .produce(black_box(&task.features), None, None)
                .expect("produce failed");
            black_box(predicted)
        });
    });
}

criterion_group!(benches, bench_fit_random_forest, bench_fit_k_neighbors, bench_produce);
criterion_main!(benches);
