//! Metadata attached to produced tables and the static primitive description.

use serde::{Deserialize, Serialize};

use crate::classifier::registered;
use crate::dataset::LabelColumn;

const SEMANTIC_TABLE: &str = "https://metadata.datadrivendiscovery.org/types/Table";
const SEMANTIC_PREDICTED: &str = "https://metadata.datadrivendiscovery.org/types/PredictedTarget";
const SEMANTIC_CATEGORICAL: &str = "https://metadata.datadrivendiscovery.org/types/CategoricalData";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub rows: usize,
    pub columns: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    pub name: String,
    pub structural_type: String,
    pub semantic_types: Vec<String>,
}

/// Metadata derived from a table's contents; nothing is carried over from the input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMetadata {
    pub dimension: Dimension,
    pub semantic_types: Vec<String>,
    pub columns: Vec<ColumnMetadata>,
}

impl TableMetadata {
    /// Describes a single-column table of predicted labels.
    pub fn generate(labels: &LabelColumn) -> Self {
        Self {
            dimension: Dimension {
                rows: labels.len(),
                columns: 1,
            },
            semantic_types: vec![SEMANTIC_TABLE.to_string()],
            columns: vec![ColumnMetadata {
                name: labels.name().to_string(),
                structural_type: "str".to_string(),
                semantic_types: vec![
                    SEMANTIC_CATEGORICAL.to_string(),
                    SEMANTIC_PREDICTED.to_string(),
                ],
            }],
        }
    }
}

/// A predicted label column together with its generated metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionTable {
    pub labels: LabelColumn,
    pub metadata: TableMetadata,
}

impl PredictionTable {
    pub fn new(labels: LabelColumn) -> Self {
        let metadata = TableMetadata::generate(&labels);
        Self { labels, metadata }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperparameterDescription {
    pub name: String,
    pub description: String,
    pub default: String,
    pub choices: Vec<String>,
}

/// Static description of a primitive: identity, inputs/outputs and hyperparameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimitiveDescription {
    pub id: String,
    pub version: String,
    pub name: String,
    pub python_path: String,
    pub description: String,
    pub source_uri: String,
    pub primitive_family: String,
    pub algorithm_types: Vec<String>,
    pub inputs: String,
    pub outputs: String,
    pub hyperparameters: Vec<HyperparameterDescription>,
}

impl PrimitiveDescription {
    /// Description of the iterative labeling primitive.
    pub fn iterative_labeling() -> Self {
        Self {
            id: "6bb5824f-cf16-4615-8643-8c1758bd6751".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: "Iterative labeling for semi-supervised learning".to_string(),
            python_path: "d3m.primitives.semisupervised_classification.iterative_labeling.AutonBox".to_string(),
            description: "Blackbox based iterative labeling for semi-supervised classification".to_string(),
            source_uri: "https://github.com/autonlab/autonbox".to_string(),
            primitive_family: "semisupervised_classification".to_string(),
            algorithm_types: vec!["binary_classification".to_string()],
            inputs: "FeatureTable".to_string(),
            outputs: "LabelColumn".to_string(),
            hyperparameters: vec![HyperparameterDescription {
                name: "blackbox".to_string(),
                description: "Base classifier, as a registered descriptor or a ready instance".to_string(),
                default: "random_forest".to_string(),
                choices: registered().iter().map(|name| name.to_string()).collect(),
            }],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_metadata_dimension() {
        let labels = LabelColumn::new("species", vec!["a".into(), "b".into(), "a".into()]);
        let metadata = TableMetadata::generate(&labels);
        assert_eq!(metadata.dimension, Dimension { rows: 3, columns: 1 });
        assert_eq!(metadata.columns[0].name, "species");
        assert!(metadata.columns[0]
            .semantic_types
            .iter()
            .any(|t| t.ends_with("PredictedTarget")));
    }

    #[test]
    fn test_prediction_table_tracks_labels() {
        let table = PredictionTable::new(LabelColumn::from_labels(["x"]));
        assert_eq!(table.len(), 1);
        assert_eq!(table.metadata.dimension.rows, 1);
    }

    #[test]
    fn test_description_json() {
        let description = PrimitiveDescription::iterative_labeling();
        let json = description.to_json().unwrap();
        assert!(json.contains("6bb5824f-cf16-4615-8643-8c1758bd6751"));

        let decoded: PrimitiveDescription = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, description);
        assert_eq!(decoded.hyperparameters[0].choices, vec!["random_forest", "k_neighbors"]);
    }
}
