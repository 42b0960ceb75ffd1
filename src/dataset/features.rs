use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::error::{PrimitiveError, Result};

/// Numeric feature table: `n_rows x n_features` values plus column names.
///
/// The column set is fixed at construction. Nothing in this crate mutates a
/// feature table after it has been handed to a learner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureTable {
    columns: Vec<String>,
    values: Array2<f64>,
}

impl FeatureTable {
    /// Wraps a matrix, naming the columns `f0`, `f1`, ...
    pub fn new(values: Array2<f64>) -> Self {
        let columns = (0..values.ncols()).map(|i| format!("f{i}")).collect();
        Self { columns, values }
    }

    /// Wraps a matrix with explicit column names.
    pub fn with_columns(columns: Vec<String>, values: Array2<f64>) -> Result<Self> {
        if columns.len() != values.ncols() {
            return Err(PrimitiveError::LengthMismatch {
                what: "column names",
                expected: values.ncols(),
                got: columns.len(),
            });
        }
        Ok(Self { columns, values })
    }

    /// Builds a table from row vectors. All rows must have the same width.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_features = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_features)
        {
            return Err(PrimitiveError::InvalidShape(format!(
                "row {i} has {} features, expected {n_features}",
                row.len()
            )));
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let values = Array2::from_shape_vec((n_rows, n_features), flat)
            .map_err(|e| PrimitiveError::InvalidShape(e.to_string()))?;
        Ok(Self::new(values))
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// View of a single row.
    ///
    /// # Panics
    /// If `index >= n_rows()`.
    pub fn row(&self, index: usize) -> ArrayView1<'_, f64> {
        self.values.row(index)
    }

    /// Fails on the first NaN or infinite value, in row-major order.
    pub fn ensure_finite(&self) -> Result<()> {
        match self.values.indexed_iter().find(|(_, v)| !v.is_finite()) {
            Some(((row, column), _)) => Err(PrimitiveError::NonFiniteFeature { row, column }),
            None => Ok(()),
        }
    }

    /// New table holding only `rows`, in the given order.
    ///
    /// # Panics
    /// If any index is out of bounds.
    pub fn select_rows(&self, rows: &[usize]) -> Self {
        let values = if rows.is_empty() {
            Array2::zeros((0, self.n_features()))
        } else {
            self.values.select(Axis(0), rows)
        };
        Self {
            columns: self.columns.clone(),
            values,
        }
    }
}

impl From<Array2<f64>> for FeatureTable {
    fn from(values: Array2<f64>) -> Self {
        Self::new(values)
    }
}
