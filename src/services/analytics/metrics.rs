use rayon::prelude::*;
use serde::{Serialize, Serializer};

use crate::services::table::{coerce, Cell, Table};

use super::classify::{classify, ColumnKind};

/// Summary statistics for one numeric column. Every field is null when the
/// column has no finite values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColumnStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
}

impl ColumnStats {
    fn empty() -> Self {
        Self {
            min: None,
            max: None,
            mean: None,
            median: None,
            std: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub row_count: usize,
    pub columns: Vec<String>,
    #[serde(serialize_with = "serialize_summary_map")]
    pub numeric_summary: Vec<(String, ColumnStats)>,
}

impl MetricsSummary {
    pub fn stats(&self, column: &str) -> Option<&ColumnStats> {
        self.numeric_summary
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, stats)| stats)
    }
}

// JSON shape is a mapping from column name to stats, in column order.
fn serialize_summary_map<S: Serializer>(
    entries: &[(String, ColumnStats)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(entries.iter().map(|(name, stats)| (name, stats)))
}

/// Compute per-numeric-column summary statistics. Created fresh per call;
/// non-numeric columns are excluded from the summary but still listed in
/// `columns`.
pub fn compute(table: &Table) -> MetricsSummary {
    let columns: Vec<String> = table.column_names().to_vec();

    let numeric_summary: Vec<(String, ColumnStats)> = (0..table.column_count())
        .into_par_iter()
        .filter_map(|idx| {
            let values = table.column_at(idx);
            if classify(values) != ColumnKind::Numeric {
                return None;
            }
            Some((columns[idx].clone(), column_stats(values)))
        })
        .collect();

    MetricsSummary {
        row_count: table.row_count(),
        columns,
        numeric_summary,
    }
}

fn column_stats(values: &[Cell]) -> ColumnStats {
    let mut finite: Vec<f64> = values.iter().filter_map(|c| coerce(c).finite()).collect();
    if finite.is_empty() {
        return ColumnStats::empty();
    }

    // Sorting first keeps every statistic independent of the source row
    // order, including the float summations.
    finite.sort_by(f64::total_cmp);
    let n = finite.len();
    let count = n as f64;

    let min = finite[0];
    let max = finite[n - 1];
    let mean = finite.iter().sum::<f64>() / count;
    let median = if n % 2 == 1 {
        finite[n / 2]
    } else {
        (finite[n / 2 - 1] + finite[n / 2]) / 2.0
    };
    // Population standard deviation; a single value yields 0, not null
    let variance = finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

    ColumnStats {
        min: Some(min),
        max: Some(max),
        mean: Some(mean),
        median: Some(median),
        std: Some(variance.sqrt()),
    }
}
