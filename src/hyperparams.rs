//! Hyperparameter records for pluggable classifiers.
//!
//! A [`HyperparamSet`] is an ordered name -> JSON value map. Descriptors publish
//! their defaults as a set and decode a (possibly overridden) set into their own
//! typed configuration with [`HyperparamSet::decode`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{PrimitiveError, Result};

/// Ensemble size forced on every classifier built from a descriptor.
///
/// Applied only when the classifier declares a hyperparameter of this name.
pub const ENSEMBLE_SIZE_OVERRIDE: (&str, u64) = ("n_estimators", 100);

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HyperparamSet(Map<String, Value>);

impl HyperparamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from any serializable configuration struct.
    ///
    /// Returns `None` if `config` does not serialize to a JSON object.
    pub fn from_config<T: Serialize>(config: &T) -> Option<Self> {
        match serde_json::to_value(config).ok()? {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Replaces `name` only if the set already declares it.
    ///
    /// Returns whether the override was applied.
    pub fn apply_override(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.0.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decodes the set into a typed configuration for `classifier`.
    pub fn decode<T: DeserializeOwned>(&self, classifier: &str) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(|source| {
            PrimitiveError::Hyperparams {
                classifier: classifier.to_string(),
                source,
            }
        })
    }
}
