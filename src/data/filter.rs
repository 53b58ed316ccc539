//! Time-window and byte-threshold filtering.
//!
//! Both filters return new tables; the input table is left untouched.

use chrono::Duration;

use super::types::LogTable;

/// Trailing time window, measured back from the latest timestamp in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeWindow {
    #[default]
    All,
    LastHour,
    Last12Hours,
    Last24Hours,
}

impl TimeWindow {
    /// All windows in the order they are offered in the sidebar.
    pub const OPTIONS: [TimeWindow; 4] = [TimeWindow::All, TimeWindow::LastHour, TimeWindow::Last12Hours, TimeWindow::Last24Hours];

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::All => "All",
            TimeWindow::LastHour => "Last 1 Hour",
            TimeWindow::Last12Hours => "Last 12 Hours",
            TimeWindow::Last24Hours => "Last 24 Hours",
        }
    }

    /// Length of the window, `None` for `All`.
    pub fn duration(self) -> Option<Duration> {
        match self {
            TimeWindow::All => None,
            TimeWindow::LastHour => Some(Duration::hours(1)),
            TimeWindow::Last12Hours => Some(Duration::hours(12)),
            TimeWindow::Last24Hours => Some(Duration::hours(24)),
        }
    }
}

/// Keep the records inside the trailing `window` that ends at the latest timestamp.
///
/// A record is kept when `latest - window < timestamp <= latest`. The window is anchored to
/// the data, not to the wall clock, so old log files still show their last hour. If the window
/// start falls before the earliest representable date every record is kept.
pub fn filter_by_window(table: &LogTable, window: TimeWindow) -> LogTable {
    let (Some(duration), Some(latest)) = (window.duration(), table.latest_timestamp()) else {
        return table.clone();
    };
    let Some(start) = latest.checked_sub_signed(duration) else {
        return table.clone();
    };

    let records = table.records.iter().filter(|r| r.timestamp > start).cloned().collect();
    table.with_records(records)
}

/// Keep the records with at least `min_bytes` bytes.
pub fn filter_by_min_bytes(table: &LogTable, min_bytes: u64) -> LogTable {
    let records = table.records.iter().filter(|r| r.bytes >= min_bytes).cloned().collect();
    table.with_records(records)
}

/// Largest byte count in the table, 0 when empty.
pub fn max_bytes(table: &LogTable) -> u64 {
    table.records.iter().map(|r| r.bytes).max().unwrap_or(0)
}

/// Current sidebar selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterSettings {
    pub window: TimeWindow,
    pub min_bytes: u64,
}

/// Tables derived from one set of filter settings.
#[derive(Debug, Clone, Default)]
pub struct FilteredView {
    /// Table restricted to the time window only. Metrics, the threat breakdown and the export
    /// are computed from this one.
    pub windowed: LogTable,
    /// Windowed table further restricted by the byte threshold. Feeds the scatter plot and the
    /// raw data preview.
    pub filtered: LogTable,
    /// Upper bound for the byte slider.
    pub max_bytes: u64,
    /// Threshold actually applied, after clamping to `max_bytes`.
    pub min_bytes: u64,
}

/// Run both filter stages.
pub fn apply_filters(table: &LogTable, settings: FilterSettings) -> FilteredView {
    let windowed = filter_by_window(table, settings.window);
    let max_bytes = max_bytes(&windowed);
    let min_bytes = settings.min_bytes.min(max_bytes);
    let filtered = filter_by_min_bytes(&windowed, min_bytes);

    log::debug!(
        "Filter {} / >= {} bytes: {} of {} records in window, {} after threshold",
        settings.window.label(),
        min_bytes,
        windowed.len(),
        table.len(),
        filtered.len()
    );

    FilteredView {
        windowed,
        filtered,
        max_bytes,
        min_bytes,
    }
}
