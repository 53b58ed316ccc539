//! Anomaly export to CSV.
//!
//! The file starts with the timestamp column, followed by the remaining columns in the order
//! they had in the source file. Values other than the timestamp are written back exactly as
//! they were read.

use anyhow::Context;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use super::parser::quote_field;
use super::types::{LogRecord, LogTable, TIMESTAMP_COLUMN};

/// Layout used when writing timestamps. The fraction is omitted when it is zero.
const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Render every anomaly-flagged row of `table` as CSV text.
pub fn anomalies_csv(table: &LogTable) -> String {
    let ts_index = table.timestamp_column_index();
    let other_columns: Vec<usize> = (0..table.columns.len()).filter(|i| Some(*i) != ts_index).collect();

    let mut out = String::new();
    let header: Vec<String> = std::iter::once(TIMESTAMP_COLUMN.to_string())
        .chain(other_columns.iter().map(|&i| quote_field(&table.columns[i])))
        .collect();
    out.push_str(&header.join(","));
    out.push('\n');

    for record in table.records.iter().filter(|r| r.is_anomaly()) {
        write_row(&mut out, record, &other_columns);
    }
    out
}

fn write_row(out: &mut String, record: &LogRecord, columns: &[usize]) {
    let _ = write!(out, "{}", record.timestamp.format(TIMESTAMP_OUTPUT_FORMAT));
    for &i in columns {
        out.push(',');
        if let Some(value) = record.fields.get(i) {
            out.push_str(&quote_field(value));
        }
    }
    out.push('\n');
}

/// Write the anomaly rows of `table` to `destination`.
///
/// # Returns
///
/// Number of rows written (header excluded).
pub fn export_anomalies(table: &LogTable, destination: &Path) -> anyhow::Result<usize> {
    let count = table.records.iter().filter(|r| r.is_anomaly()).count();
    fs::write(destination, anomalies_csv(table).as_bytes()).with_context(|| format!("Failed to write {}", destination.display()))?;
    log::info!("Exported {} anomalies to {}", count, destination.display());
    Ok(count)
}
