//! Target preprocessing shared by the bundled classifiers.
//!
//! # Example
//!
//! ```rust
//! use autonbox_rs::preprocessing::LabelEncoder;
//!
//! let fitted = LabelEncoder::new().fit(["b", "a", "b"]).unwrap();
//! assert_eq!(fitted.classes(), &["a", "b"]);
//! assert_eq!(fitted.transform(["b", "a"]).unwrap(), vec![1, 0]);
//! ```

pub mod label;

pub use label::{FittedLabelEncoder, LabelEncoder, LabelEncoderParams};
