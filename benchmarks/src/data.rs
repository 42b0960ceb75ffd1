use autonbox_rs::dataset::{FeatureTable, LabelColumn, UNLABELED};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A partially labeled dataset with its hidden ground truth.
#[derive(Clone, Debug)]
pub struct SyntheticTask {
    pub features: FeatureTable,
    /// Observed labels; hidden rows hold the sentinel.
    pub labels: LabelColumn,
    /// Every row's true label.
    pub truth: Vec<String>,
}

impl SyntheticTask {
    /// Two Gaussian-ish blobs around `(0, .., 0)` and `(3, .., 3)`, labeled "0" and "1".
    ///
    /// Every `1 / labeled_fraction`-th row keeps its label.
    pub fn two_blobs(n_rows: usize, n_features: usize, labeled_fraction: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let stride = (1.0 / labeled_fraction.clamp(f64::EPSILON, 1.0)).round().max(1.0) as usize;

        let mut values = Array2::<f64>::zeros((n_rows, n_features));
        let mut truth = Vec::with_capacity(n_rows);
        let mut observed = Vec::with_capacity(n_rows);
        for (i, mut row) in values.rows_mut().into_iter().enumerate() {
            let class = i % 2;
            let center = 3.0 * class as f64;
            for cell in row.iter_mut() {
                *cell = center + rng.random_range(-1.0..1.0) + rng.random_range(-1.0..1.0);
            }
            let label = class.to_string();
            observed.push(if (i / 2) % stride == 0 {
                label.clone()
            } else {
                UNLABELED.to_string()
            });
            truth.push(label);
        }

        Self {
            features: FeatureTable::new(values),
            labels: LabelColumn::new("class", observed),
            truth,
        }
    }

    /// Rows whose label is hidden.
    pub fn hidden_rows(&self) -> Vec<usize> {
        self.labels.partition().unlabeled
    }
}
