use indexmap::IndexMap;
use rayon::prelude::*;
use smallvec::SmallVec;

use crate::models::{FieldType, SAMPLE_SIZE};

use super::inference::infer_type;

/// Deterministic per-column facts derived from the sample rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub field_type: FieldType,
    pub sample_values: SmallVec<[String; SAMPLE_SIZE]>,
    pub unique_values: Vec<String>,
    pub value_distribution: IndexMap<String, usize>,
}

/// Raw cell for `column` in `row`; short rows read as empty.
pub fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Every row's cell for `column`, empties included.
pub fn column_cells(rows: &[Vec<String>], column: usize) -> Vec<&str> {
    rows.iter().map(|row| cell(row, column)).collect()
}

/// Non-empty cells for `column`, in row order.
pub fn column_values(rows: &[Vec<String>], column: usize) -> Vec<&str> {
    rows.iter()
        .map(|row| cell(row, column))
        .filter(|value| !value.is_empty())
        .collect()
}

pub fn profile_column(name: &str, column: usize, rows: &[Vec<String>]) -> ColumnProfile {
    let values = column_values(rows, column);

    let mut value_distribution: IndexMap<String, usize> = IndexMap::new();
    for value in &values {
        *value_distribution.entry((*value).to_string()).or_insert(0) += 1;
    }

    ColumnProfile {
        name: name.to_string(),
        field_type: infer_type(&values),
        sample_values: values.iter().take(SAMPLE_SIZE).map(|v| v.to_string()).collect(),
        unique_values: value_distribution.keys().cloned().collect(),
        value_distribution,
    }
}

/// Profiles every header. Columns are independent, so this fans out across
/// the rayon pool; output order still follows `headers`.
pub fn profile_columns(headers: &[String], rows: &[Vec<String>]) -> Vec<ColumnProfile> {
    let start = std::time::Instant::now();
    let profiles: Vec<ColumnProfile> = headers
        .par_iter()
        .enumerate()
        .map(|(idx, name)| profile_column(name, idx, rows))
        .collect();
    tracing::debug!("Profiled {} columns in {:?}", profiles.len(), start.elapsed());
    profiles
}
