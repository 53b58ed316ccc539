// UI module for the Firewall Anomaly Dashboard
//
// This module organizes the UI into separate components:
// - `sidebar`: Time window and byte threshold controls
// - `top_panel`: Title, load notices and summary metrics
// - `main_panel`: Charts, raw data preview and anomaly export
// - `charts`: Painter-based scatter plot and bar chart
// - `raw_table`: Virtualized table of filtered records
// - `app_state`: Application state management and main update loop

pub mod app_state;
pub mod charts;
pub mod main_panel;
pub mod raw_table;
pub mod sidebar;
pub mod top_panel;

pub use app_state::AppState;

use egui::Color32;

/// Map an anomaly flag value to a point color.
///
/// Follows a cool/warm split: anomalous (negative) values are red, normal (positive) values are
/// blue, zero is a neutral grey and untagged rows are a dim grey.
///
/// # Parameters
///
/// * `anomaly` - Flag value of the row, `None` if untagged or the column is absent
/// * `alpha` - Opacity multiplier (0.0 = transparent, 1.0 = fully opaque)
pub fn color_for_anomaly(anomaly: Option<i64>, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
    match anomaly {
        Some(v) if v < 0 => Color32::from_rgba_unmultiplied(180, 4, 38, a), // Warm red
        Some(v) if v > 0 => Color32::from_rgba_unmultiplied(59, 76, 192, a), // Cool blue
        Some(_) => Color32::from_rgba_unmultiplied(221, 221, 221, a),
        None => Color32::from_rgba_unmultiplied(140, 140, 140, a),
    }
}
