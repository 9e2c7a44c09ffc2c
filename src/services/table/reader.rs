use std::collections::HashSet;

use crate::error::AppError;

use super::cell::Cell;
use super::types::Table;

const DELIMITER_CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Pick the delimiter that occurs most often in the first non-empty line.
/// Falls back to a comma when nothing matches.
pub fn sniff_delimiter(sample: &str) -> u8 {
    let line = sample.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut best = (b',', 0usize);
    for candidate in DELIMITER_CANDIDATES {
        let count = line.bytes().filter(|b| *b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

/// Parse CSV bytes into a [`Table`] regardless of delimiter quirks. Short
/// records are padded with missing cells; duplicate header names get numeric
/// suffixes so column lookup stays unambiguous.
pub fn read_table(data: &[u8]) -> Result<Table, AppError> {
    let text = String::from_utf8_lossy(data);
    let text = text.trim_start_matches('\u{feff}');
    let delimiter = sniff_delimiter(text);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| AppError::FileProcessing(format!("Failed to read CSV header: {}", e)))?
        .clone();
    if headers.is_empty() {
        return Err(AppError::FileProcessing("CSV file has no header row".to_string()));
    }

    let mut existing_names = HashSet::new();
    let names: Vec<String> = headers
        .iter()
        .map(|h| unique_column_name(h.trim(), &mut existing_names))
        .collect();

    let mut columns: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];
    for record in reader.records() {
        let record =
            record.map_err(|e| AppError::FileProcessing(format!("Failed to read CSV row: {}", e)))?;
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(match record.get(idx) {
                None | Some("") => Cell::Empty,
                Some(field) => Cell::Text(field.to_string()),
            });
        }
    }

    Ok(Table::new(names, columns))
}

fn unique_column_name(name: &str, existing_names: &mut HashSet<String>) -> String {
    let base = if name.is_empty() {
        "column".to_string()
    } else {
        name.to_string()
    };

    // If the name already exists, add a numeric suffix
    let mut candidate = base.clone();
    let mut counter = 1;
    while !existing_names.insert(candidate.clone()) {
        candidate = format!("{}_{}", base, counter);
        counter += 1;
    }

    candidate
}
