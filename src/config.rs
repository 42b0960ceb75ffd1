//! File and environment configuration for the self-training primitive.
//!
//! The only configurable choice is which registered classifier to wrap:
//!
//! ```yaml
//! blackbox: k_neighbors
//! ```
//!
//! or `AUTONBOX_BLACKBOX=k_neighbors` in the environment. The ensemble-size
//! override is fixed and cannot be configured.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{lookup, registered, Blackbox};
use crate::error::PrimitiveError;
use crate::semi_supervised::IterativeLabelingHyperparams;

/// Environment variable naming the blackbox classifier.
pub const BLACKBOX_ENV: &str = "AUTONBOX_BLACKBOX";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    FileError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse error: {0}")]
    ParseError(#[from] serde_yaml::Error),
    #[error("unknown blackbox {name:?}; expected one of {expected:?}")]
    UnknownBlackbox {
        name: String,
        expected: &'static [&'static str],
    },
    #[error(transparent)]
    Primitive(#[from] PrimitiveError),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrimitiveConfig {
    /// Registered classifier name.
    pub blackbox: String,
}

impl Default for PrimitiveConfig {
    fn default() -> Self {
        Self {
            blackbox: "random_forest".to_string(),
        }
    }
}

impl PrimitiveConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::FileError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    /// Defaults, with the blackbox taken from [`BLACKBOX_ENV`] when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(name) = std::env::var(BLACKBOX_ENV) {
            let name = name.trim();
            if !name.is_empty() {
                config.blackbox = name.to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if registered().iter().any(|name| *name == self.blackbox) {
            Ok(())
        } else {
            Err(ConfigError::UnknownBlackbox {
                name: self.blackbox.clone(),
                expected: registered(),
            })
        }
    }

    pub fn into_hyperparams(self) -> Result<IterativeLabelingHyperparams, ConfigError> {
        let descriptor = lookup(&self.blackbox)?;
        Ok(IterativeLabelingHyperparams::new(Blackbox::Descriptor(descriptor)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = PrimitiveConfig::default();
        assert_eq!(config.blackbox, "random_forest");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_str() {
        let config = PrimitiveConfig::from_yaml_str("blackbox: k_neighbors\n").unwrap();
        assert_eq!(config.blackbox, "k_neighbors");

        let hyperparams = config.into_hyperparams().unwrap();
        assert_eq!(hyperparams.blackbox.name(), "k_neighbors");
    }

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config = PrimitiveConfig::from_yaml_str("{}").unwrap();
        assert_eq!(config, PrimitiveConfig::default());
    }

    #[test]
    fn test_unknown_blackbox_rejected() {
        let result = PrimitiveConfig::from_yaml_str("blackbox: svm");
        assert!(matches!(
            result,
            Err(ConfigError::UnknownBlackbox { ref name, .. }) if name == "svm"
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = PrimitiveConfig::from_yaml_str("n_estimators: 5");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "blackbox: random_forest").unwrap();

        let config = PrimitiveConfig::from_path(file.path()).unwrap();
        assert_eq!(config.blackbox, "random_forest");
    }

    #[test]
    fn test_from_missing_path() {
        let tmp = tempfile::tempdir().unwrap();
        let result = PrimitiveConfig::from_path(tmp.path().join("missing.yaml"));
        assert!(matches!(result, Err(ConfigError::FileError { .. })));
    }

    #[test]
    fn test_from_env() {
        temp_env::with_var(BLACKBOX_ENV, Some("k_neighbors"), || {
            assert_eq!(PrimitiveConfig::from_env().unwrap().blackbox, "k_neighbors");
        });
        temp_env::with_var(BLACKBOX_ENV, None::<&str>, || {
            assert_eq!(PrimitiveConfig::from_env().unwrap().blackbox, "random_forest");
        });
        temp_env::with_var(BLACKBOX_ENV, Some("gradient_boosting"), || {
            assert!(PrimitiveConfig::from_env().is_err());
        });
    }
}
