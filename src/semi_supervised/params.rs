use serde::{Deserialize, Serialize};

use crate::classifier::{Blackbox, Classifier};
use crate::error::Result;
use crate::serialization::SerializableParams;

/// Construction-time options of [`IterativeLabeling`](super::IterativeLabeling).
#[derive(Debug, Default)]
pub struct IterativeLabelingHyperparams {
    /// Base classifier. Defaults to the random forest descriptor.
    pub blackbox: Blackbox,
}

impl IterativeLabelingHyperparams {
    pub fn new(blackbox: Blackbox) -> Self {
        Self { blackbox }
    }

    /// Hyperparameters wrapping a ready classifier instance.
    pub fn with_instance(classifier: impl Classifier + 'static) -> Self {
        Self::new(Blackbox::instance(classifier))
    }

    /// Hyperparameters wrapping the descriptor registered under `name`.
    pub fn from_name(name: &str) -> Result<Self> {
        Blackbox::from_name(name).map(Self::new)
    }
}

/// Checkpointed state: only the fitted flag.
///
/// Restoring it never brings back a trained classifier; training data has to be
/// supplied again and `fit` called before `produce` works.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IterativeLabelingParams {
    pub is_fitted: bool,
}

impl SerializableParams for IterativeLabelingParams {}
