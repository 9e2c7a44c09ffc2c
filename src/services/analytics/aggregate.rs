use std::collections::HashMap;

use serde::Serialize;

use crate::services::table::{coerce, Table};

pub const MAX_COUNT_BUCKETS: usize = 8;
pub const MAX_SUM_BUCKETS: usize = 12;

/// Ordered `(label, value)` pairs, descending by value, ties broken by the
/// label's first-occurrence row index. Repeated runs on the same table are
/// byte-identical.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryAggregation {
    pub entries: Vec<(String, f64)>,
}

impl CategoryAggregation {
    fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Top-k categories by occurrence count. Every cell is stringified, missing
/// cells grouping under the empty string.
pub fn top_counts(table: &Table, category_col: &str, k: usize) -> CategoryAggregation {
    let Some(values) = table.column(category_col) else {
        return CategoryAggregation::empty();
    };

    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();
    for (row, cell) in values.iter().enumerate() {
        let entry = groups.entry(cell.to_string()).or_insert((0.0, row));
        entry.0 += 1.0;
    }
    rank(groups, k)
}

/// Top-k categories by summed value. Cells of `value_col` that do not coerce
/// contribute 0 to their group's sum; the group itself is kept.
pub fn top_sums(table: &Table, category_col: &str, value_col: &str, k: usize) -> CategoryAggregation {
    let (Some(categories), Some(values)) = (table.column(category_col), table.column(value_col))
    else {
        return CategoryAggregation::empty();
    };

    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();
    for (row, (category, value)) in categories.iter().zip(values).enumerate() {
        let entry = groups.entry(category.to_string()).or_insert((0.0, row));
        entry.0 += coerce(value).finite().unwrap_or(0.0);
    }
    rank(groups, k)
}

fn rank(groups: HashMap<String, (f64, usize)>, k: usize) -> CategoryAggregation {
    let mut ranked: Vec<(String, f64, usize)> = groups
        .into_iter()
        .map(|(label, (value, first_row))| (label, value, first_row))
        .collect();
    // Hash iteration order is irrelevant: (value desc, first row asc) is a
    // total order over the groups.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(k);

    CategoryAggregation {
        entries: ranked.into_iter().map(|(label, value, _)| (label, value)).collect(),
    }
}
