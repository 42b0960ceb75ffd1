//! k-nearest-neighbours classifier.

use ndarray::{Array2, ArrayView1};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::forest::argmax;
use super::{Classifier, ClassifierDescriptor, TrainingData};
use crate::dataset::{FeatureTable, LabelColumn};
use crate::error::{PrimitiveError, Result};
use crate::hyperparams::HyperparamSet;
use crate::preprocessing::{FittedLabelEncoder, LabelEncoder};

/// How neighbour votes are weighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborWeights {
    #[default]
    Uniform,
    /// Inverse distance. Exact matches, when present, outvote everything else.
    Distance,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KNeighborsConfig {
    pub n_neighbors: usize,
    pub weights: NeighborWeights,
}

impl Default for KNeighborsConfig {
    fn default() -> Self {
        Self {
            n_neighbors: 5,
            weights: NeighborWeights::Uniform,
        }
    }
}

#[derive(Clone, Debug)]
struct FittedNeighbors {
    x: Array2<f64>,
    y: Vec<usize>,
    encoder: FittedLabelEncoder,
    target: String,
}

/// Majority vote among the `n_neighbors` closest training rows (Euclidean).
///
/// Ties go to the lowest class in sorted label order; equidistant neighbours are
/// ordered by training row index.
#[derive(Clone, Debug, Default)]
pub struct KNeighborsClassifier {
    config: KNeighborsConfig,
    training: Option<TrainingData>,
    fitted: Option<FittedNeighbors>,
}

impl KNeighborsClassifier {
    pub const NAME: &'static str = "KNeighborsClassifier";

    pub fn new(n_neighbors: usize) -> Self {
        Self::with_config(KNeighborsConfig {
            n_neighbors,
            ..KNeighborsConfig::default()
        })
    }

    pub fn with_config(config: KNeighborsConfig) -> Self {
        Self {
            config,
            training: None,
            fitted: None,
        }
    }

    pub fn with_weights(mut self, weights: NeighborWeights) -> Self {
        self.config.weights = weights;
        self
    }

    fn vote(&self, fitted: &FittedNeighbors, row: ArrayView1<'_, f64>) -> usize {
        let mut distances: Vec<(f64, usize)> = fitted
            .x
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, train)| {
                let d = train
                    .iter()
                    .zip(row.iter())
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum::<f64>()
                    .sqrt();
                (d, i)
            })
            .collect();
        distances.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        let k = self.config.n_neighbors.min(distances.len());
        let nearest = &distances[..k];
        let exact = nearest.iter().any(|&(d, _)| d == 0.0);

        let mut votes = vec![0.0; fitted.encoder.n_classes()];
        for &(d, i) in nearest {
            let weight = match self.config.weights {
                NeighborWeights::Uniform => 1.0,
                NeighborWeights::Distance if exact => {
                    if d == 0.0 {
                        1.0
                    } else {
                        0.0
                    }
                }
                NeighborWeights::Distance => 1.0 / d,
            };
            votes[fitted.y[i]] += weight;
        }
        argmax(votes.iter())
    }
}

impl Classifier for KNeighborsClassifier {
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
        if self.config.n_neighbors == 0 {
            return Err(PrimitiveError::InvalidHyperparameter {
                name: "n_neighbors",
                reason: "must be at least 1".to_string(),
            });
        }
        let data = self
            .training
            .as_ref()
            .ok_or(PrimitiveError::MissingTrainingData)?;
        if data.inputs.is_empty() {
            return Err(PrimitiveError::EmptyTrainingData {
                classifier: Self::NAME.to_string(),
            });
        }

        let (encoder, y) = LabelEncoder::new().fit_transform(data.outputs.values())?;
        debug!(
            rows = y.len(),
            classes = encoder.n_classes(),
            n_neighbors = self.config.n_neighbors,
            "k-neighbours fitted"
        );
        self.fitted = Some(FittedNeighbors {
            x: data.inputs.values().clone(),
            y,
            encoder,
            target: data.outputs.name().to_string(),
        });
        Ok(())
    }

    fn produce(&self, inputs: &FeatureTable) -> Result<LabelColumn> {
        let fitted = self
            .fitted
            .as_ref()
            .ok_or_else(|| PrimitiveError::NotFitted(Self::NAME.to_string()))?;
        if inputs.n_features() != fitted.x.ncols() {
            return Err(PrimitiveError::FeatureMismatch {
                expected: fitted.x.ncols(),
                got: inputs.n_features(),
            });
        }

        let indices: Vec<usize> = (0..inputs.n_rows())
            .map(|i| self.vote(fitted, inputs.row(i)))
            .collect();
        let labels = fitted.encoder.inverse_transform(&indices)?;
        Ok(LabelColumn::new(fitted.target.clone(), labels))
    }
}

/// Descriptor building [`KNeighborsClassifier`] instances.
///
/// Declares no `n_estimators`, so the ensemble-size override leaves it untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct KNeighborsDescriptor;

impl KNeighborsDescriptor {
    pub const NAME: &'static str = "k_neighbors";
}

impl ClassifierDescriptor for KNeighborsDescriptor {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn default_hyperparams(&self) -> HyperparamSet {
        HyperparamSet::from_config(&KNeighborsConfig::default()).unwrap_or_default()
    }

    fn build(&self, hyperparams: &HyperparamSet) -> Result<Box<dyn Classifier>> {
        let config: KNeighborsConfig = hyperparams.decode(KNeighborsClassifier::NAME)?;
        Ok(Box::new(KNeighborsClassifier::with_config(config)))
    }
}
