// Pseudo-labeling quality report across labeled fractions and blackboxes.

use std::time::Instant;

use autonbox_rs::{Blackbox, IterativeLabeling, IterativeLabelingHyperparams, SupervisedLearner};
use benchmarks::{Metrics, SyntheticTask};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("autonbox-rs self-training report");
    println!();
    println!("{:<14} {:>9} {:>14} {:>12} {:>10}", "blackbox", "labeled", "pseudo acc", "train acc", "fit ms");

    for name in ["random_forest", "k_neighbors"] {
        for fraction in [0.05, 0.1, 0.2, 0.5] {
            let task = SyntheticTask::two_blobs(1000, 4, fraction, 7);
            let hidden = task.hidden_rows();

            let mut primitive = IterativeLabeling::new(IterativeLabelingHyperparams::new(Blackbox::from_name(name)?));
            primitive.set_training_data(task.features.clone(), task.labels.clone());

            let start = Instant::now();
            primitive.fit(None, None)?;
            let elapsed = start.elapsed();

            let filled = primitive.training_outputs().ok_or("training data missing after fit")?;
            let predicted = primitive.produce(&task.features, None, None)?.value;

            println!(
                "{:<14} {:>8.0}% {:>14.4} {:>12.4} {:>10.1}",
                name,
                fraction * 100.0,
                Metrics::accuracy_on(&task.truth, filled.values(), &hidden),
                Metrics::accuracy(&task.truth, predicted.labels.values()),
                elapsed.as_secs_f64() * 1000.0,
            );
        }
    }

    println!();
    println!("Criterion benchmarks:");
    println!("  cargo bench --package benchmarks --bench self_training");
    println!("  cargo bench --package benchmarks --bench metrics");
    Ok(())
}
