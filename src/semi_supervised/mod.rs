//! Semi-supervised classification primitives.
//!
//! [`IterativeLabeling`] fills in the unlabeled rows of a label column with a
//! base classifier trained on the labeled rows, then retrains the classifier
//! on the completed column.
//!
//! # Example
//!
//! ```rust
//! use autonbox_rs::classifier::KNeighborsClassifier;
//! use autonbox_rs::dataset::{FeatureTable, LabelColumn};
//! use autonbox_rs::primitive::SupervisedLearner;
//! use autonbox_rs::semi_supervised::{IterativeLabeling, IterativeLabelingHyperparams};
//!
//! let x = FeatureTable::from_rows(vec![vec![0.0], vec![0.1], vec![9.0], vec![9.1]]).unwrap();
//! let y = LabelColumn::from_labels(["low", "", "high", ""]);
//!
//! let mut primitive = IterativeLabeling::new(IterativeLabelingHyperparams::with_instance(
//!     KNeighborsClassifier::new(1),
//! ));
//! primitive.set_training_data(x.clone(), y);
//! primitive.fit(None, None).unwrap();
//!
//! let filled = primitive.training_outputs().unwrap();
//! assert_eq!(filled.values(), &["low", "low", "high", "high"]);
//!
//! let predicted = primitive.produce(&x, None, None).unwrap().value;
//! assert_eq!(predicted.len(), 4);
//! ```

mod iterative;
mod params;

pub use iterative::IterativeLabeling;
pub use params::{IterativeLabelingHyperparams, IterativeLabelingParams};
