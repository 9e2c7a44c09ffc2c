use std::fs;

use chrono::Utc;
use serde::Serialize;

use crate::config::Config;
use crate::error::AppError;
use crate::services::analytics::{CategoryAggregation, MetricsSummary};

pub fn ensure_dirs(config: &Config) -> Result<(), AppError> {
    fs::create_dir_all(config.upload_dir())?;
    fs::create_dir_all(config.output_dir())?;
    Ok(())
}

/// Save uploaded bytes under the upload dir and return the path relative to
/// the data dir, recorded as the dataset's provenance.
pub fn save_upload(config: &Config, filename: &str, data: &[u8]) -> Result<String, AppError> {
    ensure_dirs(config)?;
    let safe_name = filename.replace("..", "_").replace(['/', '\\'], "_");
    let stamp = Utc::now().format("%Y%m%d_%H%M%S");
    let rel_path = format!("uploads/{}__{}", stamp, safe_name);
    fs::write(config.data_dir.join(&rel_path), data)?;
    Ok(rel_path)
}

pub fn write_json<T: Serialize>(config: &Config, name: &str, payload: &T) -> Result<String, AppError> {
    ensure_dirs(config)?;
    let rel_path = format!("outputs/{}", name);
    fs::write(config.data_dir.join(&rel_path), serde_json::to_vec_pretty(payload)?)?;
    Ok(rel_path)
}

/// Tidy CSV of the numeric summaries, one row per numeric column.
pub fn write_metrics_csv(
    config: &Config,
    name: &str,
    summary: &MetricsSummary,
) -> Result<String, AppError> {
    ensure_dirs(config)?;
    let rel_path = format!("outputs/{}", name);
    let mut writer = csv::Writer::from_path(config.data_dir.join(&rel_path))?;
    writer.write_record(["column", "min", "max", "mean", "median", "std"])?;
    for (column, stats) in &summary.numeric_summary {
        writer.write_record([
            column.as_str(),
            &format_stat(stats.min),
            &format_stat(stats.max),
            &format_stat(stats.mean),
            &format_stat(stats.median),
            &format_stat(stats.std),
        ])?;
    }
    writer.flush()?;
    Ok(rel_path)
}

pub fn write_aggregation_csv(
    config: &Config,
    name: &str,
    aggregation: &CategoryAggregation,
) -> Result<String, AppError> {
    ensure_dirs(config)?;
    let rel_path = format!("outputs/{}", name);
    let mut writer = csv::Writer::from_path(config.data_dir.join(&rel_path))?;
    writer.write_record(["category", "value"])?;
    for (category, value) in &aggregation.entries {
        writer.write_record([category.as_str(), &value.to_string()])?;
    }
    writer.flush()?;
    Ok(rel_path)
}

fn format_stat(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
