//! Notebook table export
//!
//! Converts an aggregated [`TableResult`] into the row-oriented layout used by
//! laboratory notebook tables: column definitions keyed by position (`"0"`,
//! `"1"`, ...) with human-readable names, and one row per measurement.

use std::io::Write;

use serde::Serialize;

use crate::Result;
use crate::app::models::{FieldMap, TableResult};

/// Column definition with a positional key and a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub key: String,
    pub name: String,
}

/// Row-oriented notebook table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub metadata: FieldMap<String>,
    pub columns: Vec<ColumnDef>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Transpose the column-oriented data of an aggregated result into rows
    pub fn from_result(result: &TableResult) -> Self {
        let columns = result
            .data
            .keys()
            .enumerate()
            .map(|(index, name)| ColumnDef {
                key: index.to_string(),
                name: name.to_string(),
            })
            .collect();

        let rows = (0..result.row_count())
            .map(|row| {
                result
                    .data
                    .values()
                    .map(|column| column.get(row).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();

        Self {
            metadata: result.metadata.clone(),
            columns,
            rows,
        }
    }

    /// Pretty-printed JSON representation
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the column names followed by the data rows as CSV
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(self.columns.iter().map(|column| column.name.as_str()))?;
        for row in &self.rows {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}
