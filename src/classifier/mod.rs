//! Pluggable base classifiers.
//!
//! The self-training primitive talks to its base learner only through the
//! [`Classifier`] trait. A learner is supplied as a [`Blackbox`], either a
//! descriptor that still has to be built from hyperparameters, or a ready
//! instance that is used untouched.
//!
//! Building from a descriptor always merges the descriptor's defaults with
//! [`ENSEMBLE_SIZE_OVERRIDE`] (when the classifier declares that hyperparameter).

use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::dataset::{FeatureTable, LabelColumn};
use crate::error::{PrimitiveError, Result};
use crate::hyperparams::{HyperparamSet, ENSEMBLE_SIZE_OVERRIDE};

pub mod forest;
pub mod neighbors;
mod tree;

pub use forest::{RandomForestClassifier, RandomForestConfig, RandomForestDescriptor};
pub use neighbors::{KNeighborsClassifier, KNeighborsConfig, KNeighborsDescriptor, NeighborWeights};
pub use tree::MaxFeatures;

/// Supervised classifier with a set-data / fit / produce lifecycle.
pub trait Classifier: fmt::Debug + Send {
    fn name(&self) -> &str;

    /// Current hyperparameters.
    fn hyperparams(&self) -> HyperparamSet;

    /// Stores a copy of the training rows. Discards any previous fit.
    fn set_training_data(&mut self, inputs: &FeatureTable, outputs: &LabelColumn) -> Result<()>;

    /// Trains from scratch on the stored rows.
    fn fit(&mut self) -> Result<()>;

    /// Predicts one label per input row.
    fn produce(&self, inputs: &FeatureTable) -> Result<LabelColumn>;
}

/// Uninstantiated classifier: a name, default hyperparameters, and a builder.
pub trait ClassifierDescriptor: fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    fn default_hyperparams(&self) -> HyperparamSet;

    fn build(&self, hyperparams: &HyperparamSet) -> Result<Box<dyn Classifier>>;
}

/// Training rows owned by a classifier between `set_training_data` and `fit`.
#[derive(Clone, Debug)]
pub(crate) struct TrainingData {
    pub inputs: FeatureTable,
    pub outputs: LabelColumn,
}

impl TrainingData {
    pub fn new(inputs: &FeatureTable, outputs: &LabelColumn) -> Result<Self> {
        if inputs.n_rows() != outputs.len() {
            return Err(PrimitiveError::LengthMismatch {
                what: "training labels",
                expected: inputs.n_rows(),
                got: outputs.len(),
            });
        }
        Ok(Self {
            inputs: inputs.clone(),
            outputs: outputs.clone(),
        })
    }
}

/// The base learner handed to the self-training primitive.
#[derive(Debug)]
pub enum Blackbox {
    /// Built on every fit from defaults plus the ensemble-size override.
    Descriptor(Arc<dyn ClassifierDescriptor>),
    /// Used as-is, no hyperparameter override.
    Instance(Box<dyn Classifier>),
}

impl Default for Blackbox {
    fn default() -> Self {
        Self::random_forest()
    }
}

impl Blackbox {
    pub fn random_forest() -> Self {
        Self::Descriptor(Arc::new(RandomForestDescriptor))
    }

    pub fn k_neighbors() -> Self {
        Self::Descriptor(Arc::new(KNeighborsDescriptor))
    }

    /// Descriptor registered under `name`.
    pub fn from_name(name: &str) -> Result<Self> {
        lookup(name).map(Self::Descriptor)
    }

    pub fn instance(classifier: impl Classifier + 'static) -> Self {
        Self::Instance(Box::new(classifier))
    }

    /// Descriptor name, or the instance's own name.
    pub fn name(&self) -> &str {
        match self {
            Self::Descriptor(descriptor) => descriptor.name(),
            Self::Instance(classifier) => classifier.name(),
        }
    }
}

/// Builds a classifier from `descriptor` with the ensemble-size override applied.
pub fn instantiate(descriptor: &dyn ClassifierDescriptor) -> Result<Box<dyn Classifier>> {
    let mut hyperparams = descriptor.default_hyperparams();
    let (name, value) = ENSEMBLE_SIZE_OVERRIDE;
    let applied = hyperparams.apply_override(name, value);
    debug!(
        classifier = descriptor.name(),
        override_applied = applied,
        "instantiating classifier from descriptor"
    );
    descriptor.build(&hyperparams)
}

/// Names accepted by [`lookup`].
pub fn registered() -> &'static [&'static str] {
    &[RandomForestDescriptor::NAME, KNeighborsDescriptor::NAME]
}

/// Descriptor registered under `name`.
pub fn lookup(name: &str) -> Result<Arc<dyn ClassifierDescriptor>> {
    match name {
        RandomForestDescriptor::NAME => Ok(Arc::new(RandomForestDescriptor)),
        KNeighborsDescriptor::NAME => Ok(Arc::new(KNeighborsDescriptor)),
        other => Err(PrimitiveError::UnknownClassifier(other.to_string())),
    }
}
