use std::path::{Path, PathBuf};

use grandprix_core::{CoreError, Dataset, Result, Value};

/// Split of a task's data: training or held-out test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Test => "test",
        }
    }
}

/// Resolves and loads task datasets from the fixed naming convention
/// `task{id}_{split}.csv`. Loads are never cached: data may be regenerated
/// between runs, and staleness would silently corrupt comparisons.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn path_for(&self, task_id: u32, split: Split) -> PathBuf {
        self.data_dir
            .join(format!("task{}_{}.csv", task_id, split.as_str()))
    }

    pub fn load(&self, task_id: u32, split: Split) -> Result<Dataset> {
        let path = self.path_for(task_id, split);
        if !path.exists() {
            return Err(CoreError::DataNotFound(path.display().to_string()));
        }
        read_dataset(&path)
    }
}

fn parse_cell(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    match text.parse::<f64>() {
        Ok(n) => Value::Number(n),
        Err(_) => Value::Text(text.to_string()),
    }
}

/// Read a UTF-8, comma-delimited, header-rowed table into a `Dataset`.
pub fn read_dataset(path: &Path) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| CoreError::Internal(format!("{}: {}", path.display(), e)))?;

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| CoreError::Serialization(e.to_string()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CoreError::Serialization(e.to_string()))?;
        rows.push(record.iter().map(parse_cell).collect());
    }

    Dataset::new(columns, rows)
}

/// Write a `Dataset` back out in the same convention.
pub fn write_dataset(path: &Path, dataset: &Dataset) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| CoreError::Internal(format!("{}: {}", path.display(), e)))?;

    writer
        .write_record(&dataset.columns)
        .map_err(|e| CoreError::Serialization(e.to_string()))?;

    for row in &dataset.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|v| match v {
                Value::Number(n) => n.to_string(),
                Value::Text(s) => s.clone(),
                Value::Null => String::new(),
            })
            .collect();
        writer
            .write_record(&cells)
            .map_err(|e| CoreError::Serialization(e.to_string()))?;
    }

    writer
        .flush()
        .map_err(|e| CoreError::Internal(e.to_string()))?;
    Ok(())
}
