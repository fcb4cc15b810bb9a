use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// Name of the designated target column in supervised datasets.
pub const TARGET_COLUMN: &str = "target";

/// A single cell in a tabular dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Per-column summary used by the preprocessing checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub mean: Option<f64>,
    pub std_dev: Option<f64>,
}

/// In-memory tabular dataset: named columns, rows of mixed
/// numeric/categorical cells. Loaded per evaluation, never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(CoreError::Validation(format!(
                    "Row {} has {} cells, expected {}",
                    idx,
                    row.len(),
                    columns.len()
                )));
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterate the cells of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[index])
    }

    /// True when any cell anywhere is null.
    pub fn has_nulls(&self) -> bool {
        self.rows.iter().any(|row| row.iter().any(Value::is_null))
    }

    /// A column counts as numeric when it contains no text cells; nulls do
    /// not disqualify it, mirroring how a float column with missing values
    /// is still float-typed.
    pub fn column_is_numeric(&self, index: usize) -> bool {
        self.column_values(index)
            .all(|v| !matches!(v, Value::Text(_)))
    }

    pub fn all_columns_numeric(&self) -> bool {
        (0..self.n_columns()).all(|i| self.column_is_numeric(i))
    }

    /// Mean and sample standard deviation over the non-null numeric cells
    /// of a column. `None` when the column holds fewer than one (mean) or
    /// two (std) numbers.
    pub fn column_stats(&self, index: usize) -> ColumnStats {
        let values: Vec<f64> = self
            .column_values(index)
            .filter_map(Value::as_number)
            .collect();

        let mean = if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        };

        let std_dev = match (mean, values.len()) {
            (Some(m), n) if n >= 2 => {
                let var =
                    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (n as f64 - 1.0);
                Some(var.sqrt())
            }
            _ => None,
        };

        ColumnStats {
            name: self.columns[index].clone(),
            mean,
            std_dev,
        }
    }

    /// Indices of the numeric columns.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.n_columns())
            .filter(|&i| self.column_is_numeric(i))
            .collect()
    }

    /// Split off the target column, returning the feature table and the
    /// target values. Fails when the column is absent or holds non-numeric
    /// cells; a caller-input problem, surfaced as a validation error.
    pub fn split_target(&self, target: &str) -> Result<(Dataset, Vec<f64>)> {
        let target_idx = self.column_index(target).ok_or_else(|| {
            CoreError::Validation(format!("Dataset has no '{}' column", target))
        })?;

        let mut y = Vec::with_capacity(self.n_rows());
        for (row_idx, row) in self.rows.iter().enumerate() {
            let v = row[target_idx].as_number().ok_or_else(|| {
                CoreError::Validation(format!(
                    "Non-numeric target value in row {}",
                    row_idx
                ))
            })?;
            y.push(v);
        }

        let columns: Vec<String> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != target_idx)
            .map(|(_, c)| c.clone())
            .collect();

        let rows: Vec<Vec<Value>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(i, _)| *i != target_idx)
                    .map(|(_, v)| v.clone())
                    .collect()
            })
            .collect();

        Ok((Dataset { columns, rows }, y))
    }
}
