//! Benchmark utilities for autonbox-rs.
//!
//! - Synthetic partially labeled datasets
//! - Classification metrics (accuracy, agreement on pseudo-labeled rows)

pub mod data;
pub mod metrics;

pub use data::SyntheticTask;
pub use metrics::Metrics;
