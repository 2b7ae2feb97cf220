//! Row sets returned by reads.

use serde::{Deserialize, Serialize};

use crate::Value;

/// A result column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Result of a read: columns plus row arrays.
///
/// Serializes to the raw structured shape `{"columns": [{"name": ..}], "rows": [[..]]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowSet {
    /// Column descriptors.
    pub columns: Vec<Column>,
    /// Data rows, one value per column.
    pub rows: Vec<Vec<Value>>,
}

impl RowSet {
    /// Create a new row set.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// Create an empty row set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the result is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a value by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.columns.iter().position(|c| c.name == column)?;
        self.rows.get(row)?.get(idx)
    }

    /// Flatten rows into objects keyed by column name.
    pub fn to_objects(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row.iter())
                    .map(|(col, value)| (col.name.clone(), value.to_json()))
                    .collect()
            })
            .collect()
    }
}
