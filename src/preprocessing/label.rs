//! Label encoding for string class labels.
//!
//! Maps class labels to integer indices (0, 1, 2, ...) in sorted label order.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{PrimitiveError, Result};
use crate::serialization::SerializableParams;

/// Label encoder for a single target column.
///
/// Classifiers work on dense class indices; this encoder converts the string
/// labels of a [`LabelColumn`](crate::dataset::LabelColumn) into indices and
/// back.
#[derive(Clone, Debug, Default)]
pub struct LabelEncoder;

impl LabelEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Learns the sorted set of distinct labels.
    pub fn fit<I, S>(&self, labels: I) -> Result<FittedLabelEncoder>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes_set: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_string())
            .collect();

        if classes_set.is_empty() {
            return Err(PrimitiveError::EmptyTrainingData {
                classifier: "LabelEncoder".to_string(),
            });
        }

        Ok(FittedLabelEncoder::from_classes(
            classes_set.into_iter().collect(),
        ))
    }

    /// Fit and transform in one step.
    pub fn fit_transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<(FittedLabelEncoder, Vec<usize>)> {
        let fitted = self.fit(labels)?;
        let encoded = fitted.transform(labels)?;
        Ok((fitted, encoded))
    }
}

/// Serializable parameters for a fitted [`LabelEncoder`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LabelEncoderParams {
    /// Distinct classes in sorted order.
    pub classes: Vec<String>,
}

impl SerializableParams for LabelEncoderParams {}

/// Fitted label encoder.
#[derive(Clone, Debug)]
pub struct FittedLabelEncoder {
    classes: Vec<String>,
    class_to_idx: HashMap<String, usize>,
}

impl FittedLabelEncoder {
    fn from_classes(classes: Vec<String>) -> Self {
        let class_to_idx = classes
            .iter()
            .enumerate()
            .map(|(idx, class)| (class.clone(), idx))
            .collect();
        Self {
            classes,
            class_to_idx,
        }
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Encodes labels to class indices.
    pub fn transform<I, S>(&self, labels: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| {
                let label = label.as_ref();
                self.class_to_idx
                    .get(label)
                    .copied()
                    .ok_or_else(|| PrimitiveError::UnknownLabel(label.to_string()))
            })
            .collect()
    }

    /// Decodes class indices back to labels.
    pub fn inverse_transform(&self, indices: &[usize]) -> Result<Vec<String>> {
        indices
            .iter()
            .map(|&index| {
                self.classes
                    .get(index)
                    .cloned()
                    .ok_or(PrimitiveError::ClassIndexOutOfBounds {
                        index,
                        n_classes: self.classes.len(),
                    })
            })
            .collect()
    }

    pub fn extract_params(&self) -> LabelEncoderParams {
        LabelEncoderParams {
            classes: self.classes.clone(),
        }
    }

    pub fn from_params(params: LabelEncoderParams) -> Self {
        Self::from_classes(params.classes)
    }

    pub fn save_to_file<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        self.extract_params().save_to_file(path)
    }

    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        LabelEncoderParams::load_from_file(path).map(Self::from_params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_encoder_basic() {
        let labels = ["cat", "ant", "bee", "ant"];
        let fitted = LabelEncoder::new().fit(labels).unwrap();

        assert_eq!(fitted.n_classes(), 3);
        assert_eq!(fitted.classes(), &["ant", "bee", "cat"]);
        assert_eq!(fitted.transform(labels).unwrap(), vec![2, 0, 1, 0]);
    }

    #[test]
    fn test_label_encoder_numeric_strings_sort_lexically() {
        let fitted = LabelEncoder::new().fit(["10", "2", "1"]).unwrap();
        assert_eq!(fitted.classes(), &["1", "10", "2"]);
    }

    #[test]
    fn test_label_encoder_inverse() {
        let labels = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        let (fitted, encoded) = LabelEncoder::new().fit_transform(&labels).unwrap();
        assert_eq!(fitted.inverse_transform(&encoded).unwrap(), labels);
    }

    #[test]
    fn test_label_encoder_unknown_label() {
        let fitted = LabelEncoder::new().fit(["a", "b"]).unwrap();
        let result = fitted.transform(["c"]);
        assert!(matches!(result, Err(PrimitiveError::UnknownLabel(ref l)) if l == "c"));
    }

    #[test]
    fn test_label_encoder_index_out_of_bounds() {
        let fitted = LabelEncoder::new().fit(["a"]).unwrap();
        let result = fitted.inverse_transform(&[1]);
        assert!(matches!(
            result,
            Err(PrimitiveError::ClassIndexOutOfBounds { index: 1, n_classes: 1 })
        ));
    }

    #[test]
    fn test_label_encoder_empty_data() {
        let result = LabelEncoder::new().fit(Vec::<String>::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_label_encoder_serialization() {
        let fitted = LabelEncoder::new().fit(["x", "y", "z"]).unwrap();

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("label.bin");
        fitted.save_to_file(&path).unwrap();

        let loaded = FittedLabelEncoder::load_from_file(&path).unwrap();
        assert_eq!(loaded.classes(), fitted.classes());
        assert_eq!(
            loaded.transform(["z", "x"]).unwrap(),
            fitted.transform(["z", "x"]).unwrap()
        );
    }
}
