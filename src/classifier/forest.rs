//! Random forest classifier, the default blackbox of the self-training primitive.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tree::{DecisionTree, MaxFeatures, TreeParams};
use super::{Classifier, ClassifierDescriptor, TrainingData};
use crate::dataset::{FeatureTable, LabelColumn};
use crate::error::{PrimitiveError, Result};
use crate::hyperparams::HyperparamSet;
use crate::preprocessing::{FittedLabelEncoder, LabelEncoder};

/// Hyperparameters of [`RandomForestClassifier`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RandomForestConfig {
    /// Number of trees.
    pub n_estimators: usize,
    /// Maximum tree depth; `None` grows until leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    pub max_features: MaxFeatures,
    /// Draw each tree's rows with replacement.
    pub bootstrap: bool,
    /// Seed for bootstrap and feature sampling; `None` seeds from the OS.
    pub random_state: Option<u64>,
}

impl Default for RandomForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 10,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: MaxFeatures::Sqrt,
            bootstrap: true,
            random_state: None,
        }
    }
}

impl RandomForestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(PrimitiveError::InvalidHyperparameter {
                name: "n_estimators",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_samples_split < 2 {
            return Err(PrimitiveError::InvalidHyperparameter {
                name: "min_samples_split",
                reason: format!("must be at least 2, got {}", self.min_samples_split),
            });
        }
        if self.min_samples_leaf == 0 {
            return Err(PrimitiveError::InvalidHyperparameter {
                name: "min_samples_leaf",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.max_features == MaxFeatures::Count(0) {
            return Err(PrimitiveError::InvalidHyperparameter {
                name: "max_features",
                reason: "count must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Debug)]
struct FittedForest {
    trees: Vec<DecisionTree>,
    encoder: FittedLabelEncoder,
    n_features: usize,
    target: String,
}

/// Bagged ensemble of CART trees with soft voting.
///
/// # Example
/// ```rust
/// use autonbox_rs::classifier::{Classifier, RandomForestClassifier};
/// use autonbox_rs::dataset::{FeatureTable, LabelColumn};
///
/// let x = FeatureTable::from_rows(vec![vec![0.0], vec![0.2], vec![5.0], vec![5.2]]).unwrap();
/// let y = LabelColumn::from_labels(["a", "a", "b", "b"]);
///
/// let mut forest = RandomForestClassifier::new().with_random_state(7);
/// forest.set_training_data(&x, &y).unwrap();
/// forest.fit().unwrap();
///
/// let predicted = forest.produce(&x).unwrap();
/// assert_eq!(predicted.len(), 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RandomForestClassifier {
    config: RandomForestConfig,
    training: Option<TrainingData>,
    fitted: Option<FittedForest>,
}

impl RandomForestClassifier {
    pub const NAME: &'static str = "RandomForestClassifier";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RandomForestConfig) -> Self {
        Self {
            config,
            training: None,
            fitted: None,
        }
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.config.n_estimators = n_estimators;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.config.max_features = max_features;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.config.bootstrap = bootstrap;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.config.random_state = Some(seed);
        self
    }

    pub fn config(&self) -> &RandomForestConfig {
        &self.config
    }

    /// Number of trees in the fitted ensemble (0 before fit).
    pub fn n_trees(&self) -> usize {
        self.fitted.as_ref().map_or(0, |f| f.trees.len())
    }

    /// Sorted class labels seen during fit.
    pub fn classes(&self) -> Option<&[String]> {
        self.fitted.as_ref().map(|f| f.encoder.classes())
    }

    /// Mean leaf class distribution over all trees, one row per input row.
    ///
    /// Columns follow [`classes`](Self::classes).
    pub fn predict_proba(&self, inputs: &FeatureTable) -> Result<Array2<f64>> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| PrimitiveError::NotFitted(Self::NAME.to_string()))?;
        if inputs.n_features() != fitted.n_features {
            return Err(PrimitiveError::FeatureMismatch {
                expected: fitted.n_features,
                got: inputs.n_features(),
            });
        }
        inputs.ensure_finite()?;

        let n_classes = fitted.encoder.n_classes();
        let mut proba = Array2::<f64>::zeros((inputs.n_rows(), n_classes));
        for (i, mut out) in proba.rows_mut().into_iter().enumerate() {
            let row = inputs.row(i);
            for tree in &fitted.trees {
                for (acc, p) in out.iter_mut().zip(tree.predict_proba(row)) {
                    *acc += p;
                }
            }
        }
        proba /= fitted.trees.len() as f64;
        Ok(proba)
    }

    fn seeded_rng(&self) -> StdRng {
        match self.config.random_state {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

impl Classifier for RandomForestClassifier {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn hyperparams(&self) -> HyperparamSet {
        HyperparamSet::from_config(&self.config).unwrap_or_default()
    }

    fn set_training_data(&mut self, inputs: &FeatureTable, outputs: &LabelColumn) -> Result<()> {
        self.training = Some(TrainingData::new(inputs, outputs)?);
        self.fitted = None;
        Ok(())
    }

    fn fit(&mut self) -> Result<()> {
        self.config.validate()?;
        let data = self
            .training
            .as_ref()
            .ok_or(PrimitiveError::MissingTrainingData)?;
        if data.inputs.is_empty() {
            return Err(PrimitiveError::EmptyTrainingData {
                classifier: Self::NAME.to_string(),
            });
        }
        data.inputs.ensure_finite()?;

        let (encoder, y) = LabelEncoder::new().fit_transform(data.outputs.values())?;
        let x = data.inputs.values();
        let n = x.nrows();
        let params = TreeParams {
            max_depth: self.config.max_depth,
            min_samples_split: self.config.min_samples_split,
            min_samples_leaf: self.config.min_samples_leaf,
            max_features: self.config.max_features.resolve(x.ncols()),
        };

        let mut rng = self.seeded_rng();
        let all_rows: Vec<usize> = (0..n).collect();
        let trees: Vec<DecisionTree> = (0..self.config.n_estimators)
            .map(|_| {
                let mut tree_rng = StdRng::seed_from_u64(rng.random());
                let samples: Vec<usize> = if self.config.bootstrap {
                    (0..n).map(|_| tree_rng.random_range(0..n)).collect()
                } else {
                    all_rows.clone()
                };
                DecisionTree::fit(
                    x,
                    &y,
                    encoder.n_classes(),
                    &samples,
                    params,
                    &mut tree_rng,
                )
            })
            .collect();

        debug!(
            rows = n,
            features = x.ncols(),
            classes = encoder.n_classes(),
            trees = trees.len(),
            "random forest fitted"
        );

        self.fitted = Some(FittedForest {
            trees,
            encoder,
            n_features: x.ncols(),
            target: data.outputs.name().to_string(),
        });
        Ok(())
    }

    fn produce(&self, inputs: &FeatureTable) -> Result<LabelColumn> {
        let proba = self.predict_proba(inputs)?;
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| PrimitiveError::NotFitted(Self::NAME.to_string()))?;

        let indices: Vec<usize> = proba.rows().into_iter().map(|row| argmax(row.iter())).collect();
        let labels = fitted.encoder.inverse_transform(&indices)?;
        Ok(LabelColumn::new(fitted.target.clone(), labels))
    }
}

/// Index of the first maximum.
pub(crate) fn argmax<'a>(values: impl Iterator<Item = &'a f64>) -> usize {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &v) in values.enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best.0
}

/// Descriptor building [`RandomForestClassifier`] instances from hyperparameters.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomForestDescriptor;

impl RandomForestDescriptor {
    pub const NAME: &'static str = "random_forest";
}

impl ClassifierDescriptor for RandomForestDescriptor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_hyperparams(&self) -> HyperparamSet {
        HyperparamSet::from_config(&RandomForestConfig::default()).unwrap_or_default()
    }

    fn build(&self, hyperparams: &HyperparamSet) -> Result<Box<dyn Classifier>> {
        let config: RandomForestConfig = hyperparams.decode(RandomForestClassifier::NAME)?;
        config.validate()?;
        Ok(Box::new(RandomForestClassifier::with_config(config)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn blobs() -> (FeatureTable, LabelColumn) {
        let x = FeatureTable::new(array![
            [0.0, 0.1],
            [0.2, 0.0],
            [0.1, 0.3],
            [0.3, 0.2],
            [5.0, 5.1],
            [5.2, 4.9],
            [4.8, 5.3],
            [5.1, 5.0],
        ]);
        let y = LabelColumn::from_labels(["left", "left", "left", "left", "right", "right", "right", "right"]);
        (x, y)
    }

    fn fitted_forest(seed: u64) -> RandomForestClassifier {
        let (x, y) = blobs();
        let mut forest = RandomForestClassifier::new()
            .with_n_estimators(25)
            .with_random_state(seed);
        forest.set_training_data(&x, &y).unwrap();
        forest.fit().unwrap();
        forest
    }

    #[test]
    fn test_forest_learns_separated_blobs() {
        let forest = fitted_forest(42);
        let x = FeatureTable::new(array![[0.1, 0.1], [5.0, 5.0]]);

        let predicted = forest.produce(&x).unwrap();

        assert_eq!(predicted.values(), &["left", "right"]);
        assert_eq!(predicted.name(), "label");
        assert_eq!(forest.n_trees(), 25);
    }

    #[test]
    fn test_forest_proba_rows_sum_to_one() {
        let forest = fitted_forest(1);
        let (x, _) = blobs();

        let proba = forest.predict_proba(&x).unwrap();

        assert_eq!(proba.dim(), (8, 2));
        for row in proba.rows() {
            assert!((row.sum() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_forest_is_deterministic_with_seed() {
        let (x, _) = blobs();
        let a = fitted_forest(3).predict_proba(&x).unwrap();
        let b = fitted_forest(3).predict_proba(&x).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_forest_refit_is_deterministic() {
        let (x, _) = blobs();
        let mut forest = fitted_forest(9);
        let first = forest.predict_proba(&x).unwrap();
        forest.fit().unwrap();
        assert_eq!(forest.predict_proba(&x).unwrap(), first);
    }

    #[test]
    fn test_forest_single_class() {
        let x = FeatureTable::new(array![[0.0], [1.0]]);
        let y = LabelColumn::from_labels(["only", "only"]);
        let mut forest = RandomForestClassifier::new().with_random_state(0);
        forest.set_training_data(&x, &y).unwrap();
        forest.fit().unwrap();

        let predicted = forest.produce(&FeatureTable::new(array![[7.0]])).unwrap();
        assert_eq!(predicted.values(), &["only"]);
    }

    #[test]
    fn test_forest_empty_training_data() {
        let x = FeatureTable::new(Array2::zeros((0, 2)));
        let y = LabelColumn::from_labels(Vec::<String>::new());
        let mut forest = RandomForestClassifier::new();
        forest.set_training_data(&x, &y).unwrap();

        let result = forest.fit();

        assert!(matches!(result, Err(PrimitiveError::EmptyTrainingData { .. })));
        assert!(forest.classes().is_none());
    }

    #[test]
    fn test_forest_fit_without_data() {
        let mut forest = RandomForestClassifier::new();
        assert!(matches!(forest.fit(), Err(PrimitiveError::MissingTrainingData)));
    }

    #[test]
    fn test_forest_produce_before_fit() {
        let forest = RandomForestClassifier::new();
        let result = forest.produce(&FeatureTable::new(array![[1.0]]));
        assert!(matches!(result, Err(PrimitiveError::NotFitted(_))));
    }

    #[test]
    fn test_forest_feature_mismatch() {
        let forest = fitted_forest(0);
        let result = forest.produce(&FeatureTable::new(array![[1.0, 2.0, 3.0]]));
        assert!(matches!(
            result,
            Err(PrimitiveError::FeatureMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_forest_without_bootstrap_uses_all_rows() {
        let (x, y) = blobs();
        let mut forest = RandomForestClassifier::new()
            .with_n_estimators(3)
            .with_bootstrap(false)
            .with_max_features(MaxFeatures::All)
            .with_random_state(0);
        forest.set_training_data(&x, &y).unwrap();
        forest.fit().unwrap();

        let proba = forest.predict_proba(&x).unwrap();
        for (row, label) in proba.rows().into_iter().zip(y.iter()) {
            let expected = if label == "left" { 0 } else { 1 };
            assert_eq!(row[expected], 1.0);
        }
    }

    #[test]
    fn test_forest_rejects_nan_training_features() {
        let x = FeatureTable::new(array![[0.0], [f64::NAN], [f64::NAN], [0.5]]);
        let y = LabelColumn::from_labels(["a", "a", "b", "b"]);
        let mut forest = RandomForestClassifier::new()
            .with_n_estimators(1)
            .with_bootstrap(false)
            .with_max_features(MaxFeatures::All)
            .with_random_state(0);
        forest.set_training_data(&x, &y).unwrap();

        assert!(matches!(
            forest.fit(),
            Err(PrimitiveError::NonFiniteFeature { row: 1, column: 0 })
        ));
        assert_eq!(forest.n_trees(), 0);
    }

    #[test]
    fn test_forest_rejects_non_finite_inputs_at_produce() {
        let forest = fitted_forest(0);
        let result = forest.produce(&FeatureTable::new(array![[0.1, 0.1], [f64::INFINITY, 5.0]]));
        assert!(matches!(
            result,
            Err(PrimitiveError::NonFiniteFeature { row: 1, column: 0 })
        ));
    }

    #[test]
    fn test_config_validation() {
        let config = RandomForestConfig {
            n_estimators: 0,
            ..RandomForestConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PrimitiveError::InvalidHyperparameter { name: "n_estimators", .. })
        ));

        let config = RandomForestConfig {
            min_samples_split: 1,
            ..RandomForestConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_descriptor_defaults_and_build() {
        let descriptor = RandomForestDescriptor;
        let defaults = descriptor.default_hyperparams();
        assert_eq!(defaults.get("n_estimators"), Some(&serde_json::Value::from(10)));

        let classifier = descriptor
            .build(&defaults.with("n_estimators", 4).with("random_state", 5))
            .unwrap();
        let hyperparams = classifier.hyperparams();
        assert_eq!(hyperparams.get("n_estimators"), Some(&serde_json::Value::from(4)));
        assert_eq!(hyperparams.get("random_state"), Some(&serde_json::Value::from(5)));
    }

    #[test]
    fn test_descriptor_rejects_unknown_hyperparameter() {
        let result = RandomForestDescriptor.build(&HyperparamSet::new().with("n_neighbors", 3));
        assert!(matches!(result, Err(PrimitiveError::Hyperparams { .. })));
    }

    #[test]
    fn test_argmax_first_maximum() {
        assert_eq!(argmax([0.2, 0.4, 0.4].iter()), 1);
        assert_eq!(argmax([0.5].iter()), 0);
    }
}
