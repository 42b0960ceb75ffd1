//! # autonbox-rs
//!
//! Self-training ("iterative labeling") for semi-supervised classification,
//! wrapped around a pluggable base classifier.
//!
//! Given a feature table and a label column in which some cells hold the
//! [`UNLABELED`](dataset::UNLABELED) sentinel, [`IterativeLabeling`] trains its
//! classifier on the labeled rows, writes predictions into the unlabeled cells,
//! and retrains on the completed column.
//!
//! ## Core Design Principles
//!
//! - **Pluggable learner**: any type implementing [`Classifier`] can be wrapped,
//!   either as a ready instance or through a [`ClassifierDescriptor`] built on
//!   every fit with the fixed ensemble-size override.
//! - **Explicit lifecycle**: `set_training_data`, `fit`, `produce`,
//!   `get_params` / `set_params` through the [`SupervisedLearner`] trait, with
//!   typed errors instead of panics for misuse.
//! - **Honest checkpoints**: parameters carry only the fitted flag; restoring
//!   them never pretends to bring back a trained model.
//!
//! ## Quick Start
//!
//! ```rust
//! use autonbox_rs::dataset::{FeatureTable, LabelColumn};
//! use autonbox_rs::{IterativeLabeling, SupervisedLearner};
//!
//! let x = FeatureTable::from_rows(vec![
//!     vec![0.0, 0.1],
//!     vec![0.2, 0.0],
//!     vec![5.0, 5.1],
//!     vec![5.2, 4.9],
//!     vec![0.1, 0.2],
//!     vec![5.1, 5.0],
//! ])
//! .unwrap();
//! let y = LabelColumn::from_labels(["a", "a", "b", "b", "", ""]);
//!
//! // Default blackbox: random forest with 100 trees.
//! let mut primitive = IterativeLabeling::default();
//! primitive.set_training_data(x.clone(), y);
//! primitive.fit(None, None).unwrap();
//!
//! assert!(primitive.training_outputs().unwrap().is_fully_labeled());
//! let predicted = primitive.produce(&x, None, None).unwrap().value;
//! assert_eq!(predicted.len(), 6);
//! ```
//!
//! ## Module Structure
//!
//! - `semi_supervised`: the iterative labeling primitive, its hyperparameters and params
//! - `classifier`: classifier trait, descriptors, random forest and k-nearest neighbours
//! - `dataset`: feature tables, label columns, CSV loading
//! - `preprocessing`: string label encoding
//! - `hyperparams`: hyperparameter sets and the ensemble-size override
//! - `primitive`: lifecycle trait and call results
//! - `metadata`: produced-table metadata and the primitive description
//! - `config` / `logging`: YAML and environment configuration, tracing setup

/// Pluggable base classifiers and the blackbox seam.
pub mod classifier;

pub mod config;

/// Feature tables and label columns.
pub mod dataset;

pub mod error;

/// Hyperparameter sets for classifier descriptors.
pub mod hyperparams;

pub mod logging;

pub mod metadata;

/// Lifecycle shared by pipeline primitives.
pub mod primitive;

/// Data preprocessing transformers.
pub mod preprocessing;

/// Self-training primitives.
pub mod semi_supervised;

/// Parameter persistence.
pub mod serialization;

pub use classifier::{Blackbox, Classifier, ClassifierDescriptor};
pub use error::{PrimitiveError, Result};
pub use primitive::{CallResult, SupervisedLearner};
pub use semi_supervised::{IterativeLabeling, IterativeLabelingHyperparams, IterativeLabelingParams};
