//! File I/O for the firewall log CSV.
//!
//! Loading never fails hard: problems are turned into `Notice`s that the dashboard shows
//! above the charts, and the caller always receives a (possibly empty) `LogTable`.

use anyhow::Context;
use std::fs;
use std::path::Path;

use super::parser::{HeaderIndex, parse_record, split_records};
use super::types::{ANOMALY_COLUMN, LogTable};

/// Message shown when the optional anomaly column is missing.
pub const ANOMALY_MISSING_WARNING: &str = "Run the anomaly detection notebook first to tag anomalies.";

/// Error type for load failures that leave the dashboard with an empty table.
#[derive(Debug)]
pub enum LoadError {
    NotFound(String),
    Io(String),
    MissingColumn(&'static str),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "Data file not found: {}", path),
            LoadError::Io(msg) => write!(f, "Failed to read data file: {}", msg),
            LoadError::MissingColumn(name) => write!(f, "Required column '{}' is missing from the data file", name),
        }
    }
}

impl std::error::Error for LoadError {}

/// User-facing message produced while loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Warning(String),
}

/// Result of a load: the table plus everything the user should be told about it.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub table: LogTable,
    pub notices: Vec<Notice>,
}

impl LoadOutcome {
    fn failed(error: LoadError) -> Self {
        log::error!("{}", error);
        Self {
            table: LogTable::empty(),
            notices: vec![Notice::Error(error.to_string())],
        }
    }
}

/// Load the log table from `path`.
///
/// # Parameters
///
/// * `path` - Path to the CSV file
///
/// # Returns
///
/// A `LoadOutcome` whose table is empty if the file is absent, unreadable or lacks a required
/// column. Rows with unparseable required fields are skipped and reported as a warning.
pub fn load_table(path: &Path) -> LoadOutcome {
    if !path.exists() {
        return LoadOutcome::failed(LoadError::NotFound(path.display().to_string()));
    }

    let content = match fs::read_to_string(path).with_context(|| format!("{}", path.display())) {
        Ok(content) => content,
        Err(e) => return LoadOutcome::failed(LoadError::Io(format!("{:#}", e))),
    };

    let outcome = match parse_table(&content) {
        Ok(outcome) => outcome,
        Err(e) => return LoadOutcome::failed(e),
    };

    log::info!(
        "Loaded {} records from {} (anomaly column: {}, threat_type column: {})",
        outcome.table.len(),
        path.display(),
        outcome.table.has_anomaly,
        outcome.table.has_threat_type
    );
    outcome
}

/// Build a table from CSV text.
///
/// An input without a header yields an empty table and no notices. A leading UTF-8 byte order
/// mark is ignored.
pub fn parse_table(content: &str) -> Result<LoadOutcome, LoadError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut records = split_records(content).into_iter();
    let Some(columns) = records.next() else {
        log::warn!("Data file is empty");
        return Ok(LoadOutcome::default());
    };

    let index = HeaderIndex::from_header(&columns).map_err(LoadError::MissingColumn)?;

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for fields in records {
        match parse_record(fields, &index) {
            Some(record) => rows.push(record),
            None => skipped += 1,
        }
    }

    let mut notices = Vec::new();
    if index.anomaly.is_none() {
        log::warn!("Column '{}' not present", ANOMALY_COLUMN);
        notices.push(Notice::Warning(ANOMALY_MISSING_WARNING.to_string()));
    }
    if skipped > 0 {
        log::warn!("Skipped {} unparseable rows", skipped);
        notices.push(Notice::Warning(format!("Skipped {} rows with an invalid timestamp, Bytes or elapsed time value.", skipped)));
    }

    Ok(LoadOutcome {
        table: LogTable {
            columns,
            records: rows,
            has_anomaly: index.anomaly.is_some(),
            has_threat_type: index.threat_type.is_some(),
        },
        notices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const TAGGED: &str = "timestamp,Bytes,Elapsed Time (sec),threat_type,anomaly\n\
2024-01-01 10:00:00,10,1,scan,1\n\
2024-01-01 11:00:00,50,2,ddos,-1\n\
2024-01-01 12:00:00,100,3,scan,-1\n";

    fn write_file(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_tagged_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "log.csv", TAGGED);

        let outcome = load_table(&path);
        assert!(outcome.notices.is_empty());
        assert_eq!(outcome.table.len(), 3);
        assert!(outcome.table.has_anomaly);
        assert!(outcome.table.has_threat_type);
        assert_eq!(outcome.table.columns.len(), 5);
    }

    #[test]
    fn test_missing_file_yields_empty_table_and_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.csv");

        let outcome = load_table(&path);
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.notices.len(), 1);
        match &outcome.notices[0] {
            Notice::Error(msg) => assert!(msg.contains("Data file not found")),
            other => panic!("Expected error notice, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_anomaly_column_warns() {
        let outcome = parse_table("timestamp,Bytes,Elapsed Time (sec)\n2024-01-01 10:00:00,5,1\n").unwrap();
        assert_eq!(outcome.table.len(), 1);
        assert!(!outcome.table.has_anomaly);
        assert!(!outcome.table.has_threat_type);
        assert_eq!(outcome.notices, vec![Notice::Warning(ANOMALY_MISSING_WARNING.to_string())]);
    }

    #[test]
    fn test_missing_required_column_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "log.csv", "timestamp,Bytes\n2024-01-01 10:00:00,5\n");

        let outcome = load_table(&path);
        assert!(outcome.table.is_empty());
        assert!(matches!(&outcome.notices[0], Notice::Error(msg) if msg.contains("Elapsed Time (sec)")));
    }

    #[test]
    fn test_empty_file_yields_empty_table() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "empty.csv", "");

        let outcome = load_table(&path);
        assert!(outcome.table.is_empty());
        assert!(outcome.notices.is_empty());
        assert_eq!(outcome.table.latest_timestamp(), None);
    }

    #[test]
    fn test_header_only_file() {
        let outcome = parse_table("timestamp,Bytes,Elapsed Time (sec),anomaly\n").unwrap();
        assert!(outcome.table.is_empty());
        assert!(outcome.table.has_anomaly);
        assert!(outcome.notices.is_empty());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "excel.csv", "\u{feff}timestamp,Bytes,Elapsed Time (sec),anomaly\n2024-01-01 10:00:00,5,1,-1\n");

        let outcome = load_table(&path);
        assert!(outcome.notices.is_empty());
        assert_eq!(outcome.table.len(), 1);
        assert_eq!(outcome.table.columns[0], "timestamp");
        assert!(outcome.table.records[0].is_anomaly());
    }

    #[test]
    fn test_bad_rows_are_skipped_with_warning() {
        let content = "timestamp,Bytes,Elapsed Time (sec),anomaly\n\
2024-01-01 10:00:00,5,1,1\n\
garbage,5,1,1\n\
2024-01-01 10:05:00,lots,1,-1\n";
        let outcome = parse_table(content).unwrap();
        assert_eq!(outcome.table.len(), 1);
        assert!(matches!(&outcome.notices[0], Notice::Warning(msg) if msg.starts_with("Skipped 2 rows")));
    }
}
