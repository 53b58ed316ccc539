//! # Main Panel - Charts, Raw Data and Export
//!
//! Fills the space left by the sidebar and the top panel with, from top to bottom:
//! - Bytes vs Elapsed Time scatter plot of the byte-filtered records
//! - Threat type breakdown of the windowed records (skipped without a `threat_type` column)
//! - "Show Raw Data" preview
//! - Anomaly CSV export

use crate::ui::{AppState, charts, raw_table};
use eframe::egui;

const SCATTER_HEIGHT: f32 = 380.0;
const BAR_CHART_HEIGHT: f32 = 260.0;

/// Render the central dashboard panel.
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().id_salt("dashboard_scroll").show(ui, |ui| {
            ui.heading("📈 Bytes vs Elapsed Time (Anomalies Highlighted)");
            ui.separator();
            charts::render_scatter(ui, &state.scatter, state.view.filtered.has_anomaly, SCATTER_HEIGHT);

            ui.add_space(16.0);
            ui.heading("⚠ Threat Type Breakdown");
            ui.separator();
            if let Some(counts) = &state.threat_counts {
                charts::render_bar_chart(ui, counts, BAR_CHART_HEIGHT);
            }

            ui.add_space(16.0);
            ui.checkbox(&mut state.show_raw_data, "📄 Show Raw Data");
            if state.show_raw_data {
                raw_table::render(ui, &state.view.filtered, state.config.raw_preview_rows);
            }

            ui.add_space(16.0);
            render_export(ui, state);
            ui.add_space(20.0);
        });
    });
}

/// Export button and the result of the last export.
fn render_export(ui: &mut egui::Ui, state: &mut AppState) {
    let available = state.view.windowed.has_anomaly;
    let clicked = ui
        .add_enabled(available, egui::Button::new("💾 Download Anomalies as CSV"))
        .on_disabled_hover_text("The data file has no anomaly column. Run the anomaly detection notebook first.")
        .on_hover_text("Save every anomaly in the selected time window to a CSV file")
        .clicked();
    if clicked {
        state.export_anomalies();
    }

    if let Some(result) = &state.last_export {
        ui.label(egui::RichText::new(result).color(egui::Color32::GREEN));
    }
}
