// demos/self_training.rs
use autonbox_rs::dataset::{FeatureTable, LabelColumn, UNLABELED};
use autonbox_rs::{logging, IterativeLabeling, SupervisedLearner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    // label = "near" if x1 < 5, else "far". Only every fourth row keeps its label.
    let mut rows = Vec::new();
    let mut truth = Vec::new();
    for i in 0..40 {
        let t = i as f64 * 0.25;
        rows.push(vec![t, (t - 5.0).abs()]);
        truth.push(if t < 5.0 { "near" } else { "far" });
    }
    let x = FeatureTable::from_rows(rows)?;
    let y = LabelColumn::new(
        "distance",
        truth
            .iter()
            .enumerate()
            .map(|(i, label)| if i % 4 == 0 { label.to_string() } else { UNLABELED.to_string() })
            .collect(),
    );
    println!("labeled rows: {} / {}", y.partition().labeled.len(), y.len());

    let mut primitive = IterativeLabeling::default();
    primitive.set_training_data(x.clone(), y);
    primitive.fit(None, None)?;

    let filled = primitive.training_outputs().ok_or("no training data")?;
    let correct = filled.iter().zip(&truth).filter(|(got, want)| got == *want).count();
    println!("pseudo-label agreement: {correct} / {}", truth.len());

    let predicted = primitive.produce(&x, None, None)?.value;
    println!("metadata: {:?}", predicted.metadata.dimension);
    println!("first predictions: {:?}", &predicted.labels.values()[..5]);
    Ok(())
}
