//! Parse CSV text and extract structured `LogRecord` data.
//!
//! The reader understands the subset of CSV produced by spreadsheet tools and dataframe
//! libraries:
//! - comma separated fields, first record is the header
//! - optional double quotes around a field, `""` inside quotes for a literal quote
//! - quoted fields may span lines
//! - `\n` or `\r\n` record terminators

use super::types::{ANOMALY_COLUMN, BYTES_COLUMN, ELAPSED_COLUMN, LogRecord, THREAT_TYPE_COLUMN, TIMESTAMP_COLUMN};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Timestamp layouts tried in order after RFC 3339.
const TIMESTAMP_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Split CSV text into records of raw field values.
///
/// Blank lines are skipped. Unquoted fields are trimmed, quoted fields are kept verbatim.
///
/// # Example
///
/// ```text
/// timestamp,Bytes,note           -> ["timestamp", "Bytes", "note"]
/// 2024-01-01 10:00:00,5,"a, b"   -> ["2024-01-01 10:00:00", "5", "a, b"]
/// ```
pub fn split_records(content: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut was_quoted = false;
    let mut chars = content.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
                was_quoted = true;
            }
            ',' => {
                record.push(finish_field(&mut field, &mut was_quoted));
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                record.push(finish_field(&mut field, &mut was_quoted));
                push_record(&mut records, &mut record);
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || was_quoted || !record.is_empty() {
        record.push(finish_field(&mut field, &mut was_quoted));
        push_record(&mut records, &mut record);
    }

    records
}

fn finish_field(field: &mut String, was_quoted: &mut bool) -> String {
    let value = if *was_quoted { field.clone() } else { field.trim().to_string() };
    field.clear();
    *was_quoted = false;
    value
}

fn push_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>) {
    let blank = record.len() == 1 && record[0].is_empty();
    if !blank {
        records.push(std::mem::take(record));
    } else {
        record.clear();
    }
}

/// Quote a field for CSV output when it contains a separator, quote or line break.
pub fn quote_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Parse a timestamp string into a naive date-time.
///
/// RFC 3339 values with an offset are converted to UTC before the zone is dropped.
/// A bare date is interpreted as midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Positions of the known columns inside a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    pub timestamp: usize,
    pub bytes: usize,
    pub elapsed: usize,
    pub threat_type: Option<usize>,
    pub anomaly: Option<usize>,
}

impl HeaderIndex {
    /// Locate the known columns in `header`.
    ///
    /// # Returns
    ///
    /// `Ok(HeaderIndex)` when all required columns exist, `Err(name)` with the first missing
    /// required column otherwise.
    pub fn from_header(header: &[String]) -> Result<Self, &'static str> {
        let find = |name: &str| header.iter().position(|h| h == name);

        Ok(Self {
            timestamp: find(TIMESTAMP_COLUMN).ok_or(TIMESTAMP_COLUMN)?,
            bytes: find(BYTES_COLUMN).ok_or(BYTES_COLUMN)?,
            elapsed: find(ELAPSED_COLUMN).ok_or(ELAPSED_COLUMN)?,
            threat_type: find(THREAT_TYPE_COLUMN),
            anomaly: find(ANOMALY_COLUMN),
        })
    }
}

/// Convert one CSV record into a `LogRecord`.
///
/// # Returns
///
/// `None` if a required field is missing or does not parse. Empty optional cells become `None`.
pub fn parse_record(fields: Vec<String>, index: &HeaderIndex) -> Option<LogRecord> {
    let timestamp = parse_timestamp(fields.get(index.timestamp)?)?;
    let bytes = parse_bytes(fields.get(index.bytes)?)?;
    let elapsed_secs = fields.get(index.elapsed)?.parse::<f64>().ok().filter(|v| v.is_finite())?;

    let threat_type = index
        .threat_type
        .and_then(|i| fields.get(i))
        .filter(|v| !v.is_empty())
        .cloned();
    let anomaly = index.anomaly.and_then(|i| fields.get(i)).and_then(|v| parse_flag(v));

    Some(LogRecord {
        timestamp,
        bytes,
        elapsed_secs,
        threat_type,
        anomaly,
        fields,
    })
}

/// Byte counts are integers, but float renderings such as `512.0` are accepted.
fn parse_bytes(value: &str) -> Option<u64> {
    if let Ok(v) = value.parse::<u64>() {
        return Some(v);
    }
    let v = value.parse::<f64>().ok()?;
    (v.is_finite() && v >= 0.0 && v.fract() == 0.0).then_some(v as u64)
}

fn parse_flag(value: &str) -> Option<i64> {
    if let Ok(v) = value.parse::<i64>() {
        return Some(v);
    }
    let v = value.parse::<f64>().ok()?;
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_simple_records() {
        let records = split_records("a,b,c\n1,2,3\n");
        assert_eq!(records, vec![header(&["a", "b", "c"]), header(&["1", "2", "3"])]);
    }

    #[test]
    fn test_split_quoted_fields() {
        let records = split_records("name,note\r\nx,\"hello, \"\"world\"\"\"\r\ny,\"two\nlines\"");
        assert_eq!(records.len(), 3);
        assert_eq!(records[1][1], "hello, \"world\"");
        assert_eq!(records[2][1], "two\nlines");
    }

    #[test]
    fn test_split_skips_blank_lines_and_keeps_empty_fields() {
        let records = split_records("a,b\n\n1,\n\n");
        assert_eq!(records, vec![header(&["a", "b"]), header(&["1", ""])]);
    }

    #[test]
    fn test_split_empty_input() {
        assert!(split_records("").is_empty());
        assert!(split_records("\n\n").is_empty());
    }

    #[test]
    fn test_quote_field() {
        assert_eq!(quote_field("plain"), "plain");
        assert_eq!(quote_field("a,b"), "\"a,b\"");
        assert_eq!(quote_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let dt = parse_timestamp("2024-03-05 14:30:15").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 5));
        assert_eq!((dt.hour(), dt.minute(), dt.second()), (14, 30, 15));

        assert_eq!(parse_timestamp("2024-03-05T14:30:15"), Some(dt));
        assert_eq!(parse_timestamp("2024-03-05 14:30:15.250").unwrap().nanosecond(), 250_000_000);
        assert_eq!(parse_timestamp("2024-03-05T16:30:15+02:00"), Some(dt));
        assert_eq!(parse_timestamp("03/05/2024 14:30:15"), Some(dt));
        assert_eq!(parse_timestamp("2024-03-05").unwrap().hour(), 0);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_header_index_requires_columns() {
        let full = header(&["timestamp", "Bytes", "Elapsed Time (sec)", "threat_type", "anomaly"]);
        let index = HeaderIndex::from_header(&full).unwrap();
        assert_eq!(index.anomaly, Some(4));
        assert_eq!(index.threat_type, Some(3));

        let missing = header(&["timestamp", "Elapsed Time (sec)"]);
        assert_eq!(HeaderIndex::from_header(&missing), Err("Bytes"));
    }

    #[test]
    fn test_parse_record() {
        let cols = header(&["timestamp", "Bytes", "Elapsed Time (sec)", "threat_type", "anomaly"]);
        let index = HeaderIndex::from_header(&cols).unwrap();

        let record = parse_record(header(&["2024-01-01 00:00:00", "1500", "3.5", "scan", "-1"]), &index).unwrap();
        assert_eq!(record.bytes, 1500);
        assert_eq!(record.elapsed_secs, 3.5);
        assert_eq!(record.threat_type.as_deref(), Some("scan"));
        assert!(record.is_anomaly());

        let record = parse_record(header(&["2024-01-01 00:00:00", "512.0", "0", "", "1.0"]), &index).unwrap();
        assert_eq!(record.bytes, 512);
        assert_eq!(record.threat_type, None);
        assert_eq!(record.anomaly, Some(1));
        assert!(!record.is_anomaly());
    }

    #[test]
    fn test_parse_record_rejects_bad_required_fields() {
        let cols = header(&["timestamp", "Bytes", "Elapsed Time (sec)"]);
        let index = HeaderIndex::from_header(&cols).unwrap();

        assert!(parse_record(header(&["not a time", "1", "1"]), &index).is_none());
        assert!(parse_record(header(&["2024-01-01", "-5", "1"]), &index).is_none());
        assert!(parse_record(header(&["2024-01-01", "5", "NaN"]), &index).is_none());
        assert!(parse_record(header(&["2024-01-01", "5"]), &index).is_none());
    }
}
