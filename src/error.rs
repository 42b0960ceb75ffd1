//! Error types shared by the primitive, the bundled classifiers and the data loaders.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used across the crate.
pub type Result<T, E = PrimitiveError> = std::result::Result<T, E>;

/// Error type for every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum PrimitiveError {
    /// `fit` was called before `set_training_data`.
    #[error("training data has not been set; call set_training_data before fit")]
    MissingTrainingData,

    /// `produce` (or a classifier's `fit`) was called on an untrained model.
    #[error("{0} is not fitted")]
    NotFitted(String),

    /// The fitted flag was restored through `set_params`, but the wrapped
    /// classifier was never trained in this instance.
    #[error("fitted flag was restored but the wrapped classifier was not reconstituted; re-supply training data and call fit")]
    ClassifierNotReconstituted,

    /// A classifier was asked to train on zero rows.
    #[error("{classifier} cannot be trained on an empty set of rows")]
    EmptyTrainingData { classifier: String },

    /// Two row-aligned collections have different lengths.
    #[error("length mismatch for {what}: expected {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// Feature dimension differs from the one seen during fit.
    #[error("feature mismatch: expected {expected} features, got {got}")]
    FeatureMismatch { expected: usize, got: usize },

    /// Data does not form a rectangular table.
    #[error("invalid shape: {0}")]
    InvalidShape(String),

    /// A feature value is NaN or infinite.
    #[error("feature value at row {row}, column {column} is not finite")]
    NonFiniteFeature { row: usize, column: usize },

    /// A label was not seen by the encoder during fit.
    #[error("unknown label {0:?}")]
    UnknownLabel(String),

    /// An encoded class index is out of range.
    #[error("class index {index} out of bounds for {n_classes} classes")]
    ClassIndexOutOfBounds { index: usize, n_classes: usize },

    /// Hyperparameters could not be decoded into a classifier configuration.
    #[error("invalid hyperparameters for {classifier}: {source}")]
    Hyperparams {
        classifier: String,
        #[source]
        source: serde_json::Error,
    },

    /// A hyperparameter value is well-formed but out of range.
    #[error("invalid hyperparameter {name}: {reason}")]
    InvalidHyperparameter { name: &'static str, reason: String },

    /// No classifier is registered under the requested name.
    #[error("no classifier registered under {0:?}")]
    UnknownClassifier(String),

    /// A named column was not found in a CSV header.
    #[error("column {0:?} not found")]
    MissingColumn(String),

    /// A feature cell could not be parsed as a number.
    #[error("cannot parse {value:?} in column {column:?} at row {row} as a number")]
    ParseFeature {
        column: String,
        row: usize,
        value: String,
    },

    /// CSV decoding failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Parameter (de)serialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),

    /// I/O failure while reading or writing `path`.
    #[error("i/o error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrimitiveError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrimitiveError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_missing_training_data() {
        let err = PrimitiveError::MissingTrainingData;
        assert!(err.to_string().contains("set_training_data"));
    }

    #[test]
    fn test_error_display_length_mismatch() {
        let err = PrimitiveError::LengthMismatch {
            what: "labels",
            expected: 10,
            got: 9,
        };
        let msg = err.to_string();
        assert!(msg.contains("labels"));
        assert!(msg.contains("expected 10"));
    }

    #[test]
    fn test_error_display_not_fitted() {
        let err = PrimitiveError::NotFitted("RandomForestClassifier".to_string());
        assert_eq!(err.to_string(), "RandomForestClassifier is not fitted");
    }

    #[test]
    fn test_error_from_bincode_error() {
        let bad_bytes: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        let result: std::result::Result<String, bincode::Error> = bincode::deserialize(bad_bytes);
        if let Err(e) = result {
            let err: PrimitiveError = e.into();
            assert!(matches!(err, PrimitiveError::Serialization(_)));
        }
    }

    #[test]
    fn test_error_io_keeps_path() {
        let err = PrimitiveError::io(
            "params.bin",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(err.to_string().contains("params.bin"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_is_std_error() {
        let err = PrimitiveError::UnknownClassifier("svm".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
