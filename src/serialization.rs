//! Persistence of parameter records.
//!
//! Parameter records are plain data (a fitted flag, a class list). They are
//! written with `bincode` through [`SerializableParams`], which every record
//! type opts into with an empty `impl`.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{PrimitiveError, Result};

/// A parameter record that can be stored as bytes or in a file.
///
/// Implementors should contain only plain data, never a live classifier.
pub trait SerializableParams: Serialize + DeserializeOwned {
    fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        std::fs::write(path, bytes).map_err(|e| PrimitiveError::io(path, e))
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| PrimitiveError::io(path, e))?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Checkpoint {
        is_fitted: bool,
        classes: Vec<String>,
    }

    impl SerializableParams for Checkpoint {}

    fn checkpoint() -> Checkpoint {
        Checkpoint {
            is_fitted: true,
            classes: vec!["a".into(), "b".into()],
        }
    }

    #[test]
    fn test_bytes_roundtrip() {
        let bytes = checkpoint().to_bytes().unwrap();
        assert_eq!(Checkpoint::from_bytes(&bytes).unwrap(), checkpoint());
    }

    #[test]
    fn test_from_truncated_bytes_fails() {
        let bytes = checkpoint().to_bytes().unwrap();
        let result = Checkpoint::from_bytes(&bytes[..bytes.len() - 1]);
        assert!(matches!(result, Err(PrimitiveError::Serialization(_))));
    }

    #[test]
    fn test_file_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("checkpoint.bin");

        checkpoint().save_to_file(&path).unwrap();

        assert_eq!(Checkpoint::load_from_file(&path).unwrap(), checkpoint());
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let tmp = tempfile::tempdir().unwrap();
        let result = Checkpoint::load_from_file(tmp.path().join("absent.bin"));
        assert!(matches!(result, Err(PrimitiveError::Io { ref path, .. }) if path.ends_with("absent.bin")));
    }
}
