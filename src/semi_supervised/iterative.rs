use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::params::{IterativeLabelingHyperparams, IterativeLabelingParams};
use crate::classifier::{instantiate, Blackbox, Classifier, ClassifierDescriptor};
use crate::dataset::{FeatureTable, LabelColumn};
use crate::error::{PrimitiveError, Result};
use crate::metadata::{PredictionTable, PrimitiveDescription};
use crate::primitive::{CallResult, SupervisedLearner};

/// The wrapped classifier, resolved once from the [`Blackbox`].
#[derive(Debug)]
enum Learner {
    /// Rebuilt from scratch on every fit.
    Descriptor {
        descriptor: Arc<dyn ClassifierDescriptor>,
        built: Option<Box<dyn Classifier>>,
    },
    /// Owned for the primitive's lifetime and refitted in place.
    Instance(Box<dyn Classifier>),
}

impl Learner {
    fn name(&self) -> &str {
        match self {
            Learner::Descriptor { descriptor, .. } => descriptor.name(),
            Learner::Instance(classifier) => classifier.name(),
        }
    }

    fn prepare(&mut self) -> Result<&mut Box<dyn Classifier>> {
        match self {
            Learner::Descriptor { descriptor, built } => {
                Ok(built.insert(instantiate(descriptor.as_ref())?))
            }
            Learner::Instance(classifier) => Ok(classifier),
        }
    }

    fn current(&self) -> Option<&dyn Classifier> {
        match self {
            Learner::Descriptor { built, .. } => built.as_deref(),
            Learner::Instance(classifier) => Some(classifier.as_ref()),
        }
    }
}

impl From<Blackbox> for Learner {
    fn from(blackbox: Blackbox) -> Self {
        match blackbox {
            Blackbox::Descriptor(descriptor) => Learner::Descriptor {
                descriptor,
                built: None,
            },
            Blackbox::Instance(classifier) => Learner::Instance(classifier),
        }
    }
}

/// Self-training wrapper around a pluggable classifier.
///
/// One `fit` runs a single labeling pass:
/// 1. split rows into labeled and unlabeled (label equals [`UNLABELED`]);
/// 2. train the classifier on the labeled rows;
/// 3. predict the unlabeled rows and write the predictions into the stored
///    label column at their original positions;
/// 4. retrain the classifier on every row.
///
/// The completed label column stays inside the primitive and can be read back
/// with [`training_outputs`](Self::training_outputs).
///
/// [`UNLABELED`]: crate::dataset::UNLABELED
#[derive(Debug)]
pub struct IterativeLabeling {
    learner: Learner,
    inputs: Option<FeatureTable>,
    outputs: Option<LabelColumn>,
    is_fitted: bool,
    /// Set only by a successful fit in this instance, never by `set_params`.
    trained: bool,
}

impl Default for IterativeLabeling {
    fn default() -> Self {
        Self::new(IterativeLabelingHyperparams::default())
    }
}

impl IterativeLabeling {
    pub fn new(hyperparams: IterativeLabelingHyperparams) -> Self {
        Self {
            learner: hyperparams.blackbox.into(),
            inputs: None,
            outputs: None,
            is_fitted: false,
            trained: false,
        }
    }

    /// Name of the wrapped classifier (descriptor name or instance name).
    pub fn blackbox_name(&self) -> &str {
        self.learner.name()
    }

    pub fn is_fitted(&self) -> bool {
        self.is_fitted
    }

    /// The classifier trained by the last successful fit.
    pub fn classifier(&self) -> Option<&dyn Classifier> {
        if self.trained {
            self.learner.current()
        } else {
            None
        }
    }

    pub fn training_inputs(&self) -> Option<&FeatureTable> {
        self.inputs.as_ref()
    }

    /// Stored label column; after a fit, unlabeled cells hold pseudo-labels.
    pub fn training_outputs(&self) -> Option<&LabelColumn> {
        self.outputs.as_ref()
    }

    /// Hands the stored training data back to the caller.
    pub fn into_training_data(self) -> Option<(FeatureTable, LabelColumn)> {
        self.inputs.zip(self.outputs)
    }

    pub fn description() -> PrimitiveDescription {
        PrimitiveDescription::iterative_labeling()
    }

    #[instrument(skip_all, fields(blackbox = %self.learner.name()))]
    fn label_and_retrain(&mut self) -> Result<()> {
        self.is_fitted = false;
        self.trained = false;

        let (Some(inputs), Some(outputs)) = (self.inputs.as_ref(), self.outputs.as_mut()) else {
            return Err(PrimitiveError::MissingTrainingData);
        };
        if inputs.n_rows() != outputs.len() {
            return Err(PrimitiveError::LengthMismatch {
                what: "training labels",
                expected: inputs.n_rows(),
                got: outputs.len(),
            });
        }

        let partition = outputs.partition();
        info!(
            rows = inputs.n_rows(),
            labeled = partition.labeled.len(),
            unlabeled = partition.unlabeled.len(),
            "starting labeling pass"
        );
        if partition.labeled.is_empty() {
            warn!("no labeled rows; training the base classifier on zero rows");
        }

        let classifier = self.learner.prepare()?;
        classifier.set_training_data(
            &inputs.select_rows(&partition.labeled),
            &outputs.select(&partition.labeled),
        )?;
        classifier.fit()?;

        if partition.unlabeled.is_empty() {
            debug!("every row is labeled; nothing to pseudo-label");
        } else {
            let predictions = classifier.produce(&inputs.select_rows(&partition.unlabeled))?;
            outputs.assign(&partition.unlabeled, &predictions)?;
            debug!(assigned = predictions.len(), "pseudo-labels written");
        }

        classifier.set_training_data(inputs, outputs)?;
        classifier.fit()?;

        self.trained = true;
        self.is_fitted = true;
        info!("labeling pass complete");
        Ok(())
    }
}

impl SupervisedLearner for IterativeLabeling {
    type Params = IterativeLabelingParams;
    type Output = PredictionTable;

    fn set_training_data(&mut self, inputs: FeatureTable, outputs: LabelColumn) {
        self.inputs = Some(inputs);
        self.outputs = Some(outputs);
    }

    fn fit(&mut self, timeout: Option<Duration>, iterations: Option<usize>) -> Result<CallResult<()>> {
        if timeout.is_some() || iterations.is_some() {
            debug!(?timeout, ?iterations, "timeout and iterations are ignored");
        }
        self.label_and_retrain()?;
        Ok(CallResult::finished(()))
    }

    fn produce(
        &self,
        inputs: &FeatureTable,
        timeout: Option<Duration>,
        iterations: Option<usize>,
    ) -> Result<CallResult<PredictionTable>> {
        if timeout.is_some() || iterations.is_some() {
            debug!(?timeout, ?iterations, "timeout and iterations are ignored");
        }
        let classifier = match self.classifier() {
            Some(classifier) => classifier,
            None if self.is_fitted => return Err(PrimitiveError::ClassifierNotReconstituted),
            None => return Err(PrimitiveError::NotFitted("IterativeLabeling".to_string())),
        };
        let labels = classifier.produce(inputs)?;
        Ok(CallResult::finished(PredictionTable::new(labels)))
    }

    fn get_params(&self) -> IterativeLabelingParams {
        IterativeLabelingParams {
            is_fitted: self.is_fitted,
        }
    }

    /// Restores the fitted flag only. Clearing it also drops the trained state.
    fn set_params(&mut self, params: IterativeLabelingParams) {
        self.is_fitted = params.is_fitted;
        if !params.is_fitted {
            self.trained = false;
        }
    }
}
