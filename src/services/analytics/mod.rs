pub mod aggregate;
pub mod classify;
pub mod metrics;
pub mod profile;

pub use aggregate::{top_counts, top_sums, CategoryAggregation, MAX_COUNT_BUCKETS, MAX_SUM_BUCKETS};
pub use classify::{classify, ColumnKind};
pub use metrics::{compute, ColumnStats, MetricsSummary};
pub use profile::{describe, DatasetDescription, DEFAULT_PREVIEW_ROWS};
