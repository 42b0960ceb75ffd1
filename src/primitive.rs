//! Lifecycle shared by pipeline primitives.
//!
//! A host pipeline drives a primitive through `set_training_data`, `fit`,
//! `produce`, and checkpoints it with `get_params` / `set_params`.

use std::time::Duration;

use crate::dataset::{FeatureTable, LabelColumn};
use crate::error::Result;

/// Outcome of a lifecycle call.
#[derive(Clone, Debug, PartialEq)]
pub struct CallResult<T> {
    pub value: T,
    /// Whether the call ran to completion.
    pub has_finished: bool,
    /// Iterations performed, when the primitive counts them.
    pub iterations_done: Option<usize>,
}

impl<T> CallResult<T> {
    /// A call that ran to completion without counting iterations.
    pub fn finished(value: T) -> Self {
        Self {
            value,
            has_finished: true,
            iterations_done: None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CallResult<U> {
        CallResult {
            value: f(self.value),
            has_finished: self.has_finished,
            iterations_done: self.iterations_done,
        }
    }
}

/// A primitive trained on a feature table and a label column.
pub trait SupervisedLearner {
    /// Externally visible parameter state.
    type Params;
    /// Output of `produce`.
    type Output;

    /// Stores the training data. No validation happens here.
    fn set_training_data(&mut self, inputs: FeatureTable, outputs: LabelColumn);

    fn fit(&mut self, timeout: Option<Duration>, iterations: Option<usize>) -> Result<CallResult<()>>;

    fn produce(
        &self,
        inputs: &FeatureTable,
        timeout: Option<Duration>,
        iterations: Option<usize>,
    ) -> Result<CallResult<Self::Output>>;

    fn get_params(&self) -> Self::Params;

    fn set_params(&mut self, params: Self::Params);
}
