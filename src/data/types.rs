//! Type definitions for the firewall log table.

use chrono::NaiveDateTime;

/// Column holding the event time.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
/// Column holding the transferred byte count.
pub const BYTES_COLUMN: &str = "Bytes";
/// Column holding the session duration in seconds.
pub const ELAPSED_COLUMN: &str = "Elapsed Time (sec)";
/// Optional category label column.
pub const THREAT_TYPE_COLUMN: &str = "threat_type";
/// Optional anomaly flag column (-1 = anomalous).
pub const ANOMALY_COLUMN: &str = "anomaly";

/// Value of the anomaly column that marks a record as anomalous.
pub const ANOMALY_FLAG: i64 = -1;

/// One firewall event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub timestamp: NaiveDateTime,
    pub bytes: u64,
    pub elapsed_secs: f64,
    pub threat_type: Option<String>,
    pub anomaly: Option<i64>,
    /// Raw field values in the file's column order, used when exporting.
    pub fields: Vec<String>,
}

impl LogRecord {
    /// Whether the record carries the anomaly flag.
    pub fn is_anomaly(&self) -> bool {
        self.anomaly == Some(ANOMALY_FLAG)
    }
}

/// Ordered collection of log records together with the header they were read with.
///
/// Rows keep the file order. Filtering always builds a new table, the loaded one is never
/// modified.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogTable {
    /// Header names in file order.
    pub columns: Vec<String>,
    pub records: Vec<LogRecord>,
    /// Whether the optional `anomaly` column was present in the header.
    pub has_anomaly: bool,
    /// Whether the optional `threat_type` column was present in the header.
    pub has_threat_type: bool,
}

impl LogTable {
    /// Create an empty table without any columns.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `max_rows` records, or all of them if the table is shorter.
    pub fn head(&self, max_rows: usize) -> &[LogRecord] {
        &self.records[..self.records.len().min(max_rows)]
    }

    /// Latest timestamp in the table, `None` when it has no rows.
    pub fn latest_timestamp(&self) -> Option<NaiveDateTime> {
        self.records.iter().map(|r| r.timestamp).max()
    }

    /// Build a table with the same header and flags but a different set of rows.
    pub fn with_records(&self, records: Vec<LogRecord>) -> Self {
        Self {
            columns: self.columns.clone(),
            records,
            has_anomaly: self.has_anomaly,
            has_threat_type: self.has_threat_type,
        }
    }

    /// Position of the timestamp column in the native header, if any.
    pub fn timestamp_column_index(&self) -> Option<usize> {
        self.columns.iter().position(|c| c == TIMESTAMP_COLUMN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table_of(rows: usize) -> LogTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let records = (0..rows)
            .map(|i| LogRecord {
                timestamp: start + chrono::Duration::minutes(i as i64),
                bytes: i as u64,
                elapsed_secs: 1.0,
                threat_type: None,
                anomaly: None,
                fields: Vec::new(),
            })
            .collect();
        LogTable {
            columns: vec![TIMESTAMP_COLUMN.into(), BYTES_COLUMN.into(), ELAPSED_COLUMN.into()],
            records,
            has_anomaly: false,
            has_threat_type: false,
        }
    }

    #[test]
    fn test_head_caps_long_tables() {
        let t = table_of(250);
        let head = t.head(100);
        assert_eq!(head.len(), 100);
        assert_eq!(head[0].bytes, 0);
        assert_eq!(head[99].bytes, 99);
    }

    #[test]
    fn test_head_of_short_and_empty_tables() {
        assert_eq!(table_of(30).head(100).len(), 30);
        assert!(LogTable::empty().head(100).is_empty());
        assert!(table_of(5).head(0).is_empty());
    }
}
