//! CSV loading for partially labeled datasets.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::ReaderBuilder;
use ndarray::Array2;
use tracing::debug;

use super::{FeatureTable, LabelColumn, UNLABELED};
use crate::error::{PrimitiveError, Result};

/// Reads a headed CSV where every column except `target` is numeric.
///
/// Empty (or whitespace-only) target cells become [`UNLABELED`].
pub fn read_csv<R: Read>(reader: R, target: &str) -> Result<(FeatureTable, LabelColumn)> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let target_idx = headers
        .iter()
        .position(|h| h == target)
        .ok_or_else(|| PrimitiveError::MissingColumn(target.to_string()))?;
    let feature_names: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != target_idx)
        .map(|(_, h)| h.to_string())
        .collect();

    let mut flat = Vec::new();
    let mut labels = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        for (i, cell) in record.iter().enumerate() {
            if i == target_idx {
                labels.push(if cell.is_empty() {
                    UNLABELED.to_string()
                } else {
                    cell.to_string()
                });
                continue;
            }
            let value: f64 = cell.parse().map_err(|_| PrimitiveError::ParseFeature {
                column: headers.get(i).unwrap_or_default().to_string(),
                row,
                value: cell.to_string(),
            })?;
            flat.push(value);
        }
    }

    let n_rows = labels.len();
    let values = Array2::from_shape_vec((n_rows, feature_names.len()), flat)
        .map_err(|e| PrimitiveError::InvalidShape(e.to_string()))?;
    debug!(rows = n_rows, features = feature_names.len(), "loaded csv table");

    Ok((
        FeatureTable::with_columns(feature_names, values)?,
        LabelColumn::new(target, labels),
    ))
}

/// Opens `path` and delegates to [`read_csv`].
pub fn load_csv<P: AsRef<Path>>(path: P, target: &str) -> Result<(FeatureTable, LabelColumn)> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| PrimitiveError::io(path, e))?;
    read_csv(BufReader::new(file), target)
}
