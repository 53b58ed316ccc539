//! Summary metrics and chart series computed from filtered tables.

use std::collections::BTreeMap;

use super::types::LogTable;

/// Text shown for metrics that depend on a missing column.
pub const NOT_AVAILABLE: &str = "N/A";

/// Headline numbers for the windowed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total_records: usize,
    /// Rows flagged -1, `None` when the table has no anomaly column.
    pub anomaly_count: Option<usize>,
}

impl Summary {
    pub fn compute(table: &LogTable) -> Self {
        let anomaly_count = table.has_anomaly.then(|| table.records.iter().filter(|r| r.is_anomaly()).count());
        Self {
            total_records: table.len(),
            anomaly_count,
        }
    }

    /// Anomaly count as displayed in the metric, "N/A" when unavailable.
    pub fn anomaly_display(&self) -> String {
        match self.anomaly_count {
            Some(count) => count.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Frequency of each `threat_type` value.
///
/// Sorted by count descending; equal counts keep the order of first appearance. Missing values
/// are not counted.
///
/// # Returns
///
/// `None` when the table has no `threat_type` column.
pub fn threat_type_counts(table: &LogTable) -> Option<Vec<(String, usize)>> {
    if !table.has_threat_type {
        return None;
    }

    let mut counts: Vec<(String, usize)> = Vec::new();
    for threat in table.records.iter().filter_map(|r| r.threat_type.as_deref()) {
        match counts.iter_mut().find(|(name, _)| name == threat) {
            Some((_, count)) => *count += 1,
            None => counts.push((threat.to_string(), 1)),
        }
    }
    // sort_by is stable, so ties stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Some(counts)
}

/// One group of points in the bytes-vs-elapsed scatter plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    /// Anomaly value shared by the points, `None` for ungrouped or untagged rows.
    pub anomaly: Option<i64>,
    /// (elapsed seconds, bytes) pairs.
    pub points: Vec<[f64; 2]>,
}

impl ScatterSeries {
    pub fn label(&self) -> String {
        match self.anomaly {
            Some(value) => value.to_string(),
            None => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Split the table into scatter series.
///
/// With an anomaly column, one series per distinct anomaly value in ascending order, followed
/// by a series for rows with an empty flag. Without it, a single series holding every row.
pub fn scatter_series(table: &LogTable) -> Vec<ScatterSeries> {
    if !table.has_anomaly {
        if table.is_empty() {
            return Vec::new();
        }
        return vec![ScatterSeries {
            anomaly: None,
            points: table.records.iter().map(|r| [r.elapsed_secs, r.bytes as f64]).collect(),
        }];
    }

    let mut tagged: BTreeMap<i64, Vec<[f64; 2]>> = BTreeMap::new();
    let mut untagged = Vec::new();
    for r in &table.records {
        let point = [r.elapsed_secs, r.bytes as f64];
        match r.anomaly {
            Some(value) => tagged.entry(value).or_default().push(point),
            None => untagged.push(point),
        }
    }

    let mut series: Vec<ScatterSeries> = tagged
        .into_iter()
        .map(|(value, points)| ScatterSeries {
            anomaly: Some(value),
            points,
        })
        .collect();
    if !untagged.is_empty() {
        series.push(ScatterSeries {
            anomaly: None,
            points: untagged,
        });
    }
    series
}
