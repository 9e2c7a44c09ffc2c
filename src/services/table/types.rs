use super::cell::Cell;

/// In-memory column-major table. Column order and row order are preserved
/// from the source; row count is uniform across columns (short columns are
/// padded with missing cells at construction).
#[derive(Debug, Clone, Default)]
pub struct Table {
    names: Vec<String>,
    columns: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(names: Vec<String>, mut columns: Vec<Vec<Cell>>) -> Self {
        let row_count = columns.iter().map(Vec::len).max().unwrap_or(0);
        for column in &mut columns {
            column.resize(row_count, Cell::Empty);
        }
        columns.resize(names.len(), vec![Cell::Empty; row_count]);
        Self { names, columns }
    }

    /// Row-major construction, mostly for tests. Short rows are padded with
    /// missing cells.
    pub fn from_rows<S: Into<String>>(names: Vec<S>, rows: Vec<Vec<Cell>>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut columns = vec![Vec::with_capacity(rows.len()); names.len()];
        for row in rows {
            for (idx, column) in columns.iter_mut().enumerate() {
                column.push(row.get(idx).cloned().unwrap_or(Cell::Empty));
            }
        }
        Self::new(names, columns)
    }

    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn column(&self, name: &str) -> Option<&[Cell]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|idx| self.columns[idx].as_slice())
    }

    pub fn column_at(&self, idx: usize) -> &[Cell] {
        self.columns[idx].as_slice()
    }
}
