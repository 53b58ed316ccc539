//! Data module for firewall log loading, filtering and export.
//!
//! Provides functionality for:
//! - Reading the tagged firewall log CSV into a `LogTable`
//! - Memoizing load results for the session
//! - Time-window and byte-threshold filtering
//! - Summary metrics and the anomaly CSV export
//!
//! Nothing in here touches the UI; the `ui` module renders what these functions compute.

pub mod cache;
pub mod export;
pub mod filter;
pub mod loader;
pub mod parser;
pub mod summary;
pub mod types;

pub use cache::TableCache;
pub use filter::{FilterSettings, FilteredView, TimeWindow};
pub use loader::{LoadOutcome, Notice};
pub use summary::Summary;
