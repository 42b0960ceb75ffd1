use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{PrimitiveError, Result};

/// Reserved label value marking a row as unlabeled.
///
/// A class that is literally the empty string cannot be told apart from an
/// unlabeled row.
pub const UNLABELED: &str = "";

/// Row indices split by labeled / unlabeled status, each in original row order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partition {
    pub labeled: Vec<usize>,
    pub unlabeled: Vec<usize>,
}

/// A single named column of class labels aligned with a [`FeatureTable`].
///
/// Every cell is either a class label or [`UNLABELED`].
///
/// [`FeatureTable`]: crate::dataset::FeatureTable
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelColumn {
    name: String,
    values: Vec<String>,
}

impl LabelColumn {
    pub fn new(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Column named `label` built from anything string-like.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("label", labels.into_iter().map(Into::into).collect())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.values.get(row).map(String::as_str)
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    pub fn into_values(self) -> Vec<String> {
        self.values
    }

    pub fn is_unlabeled(&self, row: usize) -> bool {
        self.get(row) == Some(UNLABELED)
    }

    /// `true` when no cell carries the sentinel.
    pub fn is_fully_labeled(&self) -> bool {
        self.values.iter().all(|v| v != UNLABELED)
    }

    /// Splits row indices into labeled and unlabeled sets.
    pub fn partition(&self) -> Partition {
        let mut partition = Partition::default();
        for (i, value) in self.values.iter().enumerate() {
            if value == UNLABELED {
                partition.unlabeled.push(i);
            } else {
                partition.labeled.push(i);
            }
        }
        partition
    }

    /// Sorted distinct labels, sentinel excluded.
    pub fn classes(&self) -> Vec<String> {
        self.values
            .iter()
            .filter(|v| v.as_str() != UNLABELED)
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// New column holding only `rows`, in the given order.
    ///
    /// # Panics
    /// If any index is out of bounds.
    pub fn select(&self, rows: &[usize]) -> Self {
        Self {
            name: self.name.clone(),
            values: rows.iter().map(|&i| self.values[i].clone()).collect(),
        }
    }

    /// Writes `labels[k]` into row `rows[k]` for every `k`.
    pub fn assign(&mut self, rows: &[usize], labels: &LabelColumn) -> Result<()> {
        if rows.len() != labels.len() {
            return Err(PrimitiveError::LengthMismatch {
                what: "assigned labels",
                expected: rows.len(),
                got: labels.len(),
            });
        }
        if let Some(&row) = rows.iter().find(|&&row| row >= self.values.len()) {
            return Err(PrimitiveError::LengthMismatch {
                what: "label rows",
                expected: self.values.len(),
                got: row + 1,
            });
        }
        for (&row, label) in rows.iter().zip(labels.values.iter()) {
            self.values[row].clone_from(label);
        }
        Ok(())
    }
}
