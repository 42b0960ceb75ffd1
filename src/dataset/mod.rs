//! Tabular inputs for the self-training primitive.
//!
//! - [`FeatureTable`]: numeric feature matrix with named columns.
//! - [`LabelColumn`]: class labels aligned row-for-row with a feature table.
//!   Rows holding [`UNLABELED`] are the ones the self-training loop fills in.
//!
//! # Example
//!
//! ```rust
//! use autonbox_rs::dataset::{FeatureTable, LabelColumn};
//!
//! let x = FeatureTable::from_rows(vec![vec![0.0], vec![1.0], vec![0.9]]).unwrap();
//! let y = LabelColumn::from_labels(["low", "high", ""]);
//!
//! let partition = y.partition();
//! assert_eq!(partition.labeled, vec![0, 1]);
//! assert_eq!(partition.unlabeled, vec![2]);
//! assert_eq!(x.select_rows(&partition.unlabeled).n_rows(), 1);
//! ```

mod features;
mod labels;
mod loader;

pub use features::FeatureTable;
pub use labels::{LabelColumn, Partition, UNLABELED};
pub use loader::{load_csv, read_csv};
