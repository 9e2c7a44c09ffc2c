use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::services::table::Table;

use super::classify::{classify, ColumnKind};

pub const DEFAULT_PREVIEW_ROWS: usize = 10;

/// Read-only structural snapshot of one upload. Held in session state and
/// replaced wholesale by the next upload.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetDescription {
    pub filename: String,
    pub saved_path: String,
    pub columns: Vec<String>,
    pub row_count: usize,
    pub preview_rows: Vec<Map<String, Value>>,
    pub numeric_columns: Vec<String>,
    pub errors: Vec<String>,
}

/// Pure function of its inputs; never fails. A table without numeric columns
/// yields an empty `numeric_columns`, not an error.
pub fn describe(
    table: &Table,
    filename: &str,
    saved_path: &str,
    preview_n: usize,
) -> DatasetDescription {
    let columns: Vec<String> = table.column_names().to_vec();
    let row_count = table.row_count();

    let kinds: Vec<ColumnKind> = (0..table.column_count())
        .into_par_iter()
        .map(|idx| classify(table.column_at(idx)))
        .collect();

    let numeric_columns = columns
        .iter()
        .zip(&kinds)
        .filter(|(_, kind)| **kind == ColumnKind::Numeric)
        .map(|(name, _)| name.clone())
        .collect();

    let preview_rows = (0..row_count.min(preview_n))
        .map(|row| {
            let mut record = Map::new();
            for (idx, name) in columns.iter().enumerate() {
                let cell = &table.column_at(idx)[row];
                record.insert(name.clone(), Value::String(cell.to_string()));
            }
            record
        })
        .collect();

    DatasetDescription {
        filename: filename.to_string(),
        saved_path: saved_path.to_string(),
        columns,
        row_count,
        preview_rows,
        numeric_columns,
        errors: Vec::new(),
    }
}
