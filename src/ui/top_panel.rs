//! # Top Panel - Title, Notices and Metrics
//!
//! Renders the dashboard title, the errors and warnings produced while loading the data file,
//! and the two headline metrics:
//! - Total Records: rows in the selected time window
//! - Anomalies Detected: rows flagged -1, or "N/A" without an anomaly column

use crate::data::Notice;
use crate::ui::AppState;
use eframe::egui;
use egui::Color32;

/// Render the top panel.
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("title_metrics").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.heading(egui::RichText::new("🔥 Firewall Log Anomaly Dashboard").size(26.0));
        ui.add_space(4.0);

        for notice in &state.outcome.notices {
            match notice {
                Notice::Error(msg) => {
                    ui.label(egui::RichText::new(format!("❌ {}", msg)).color(Color32::from_rgb(255, 80, 80)));
                }
                Notice::Warning(msg) => {
                    ui.label(egui::RichText::new(format!("⚠ {}", msg)).color(Color32::YELLOW));
                }
            }
        }

        ui.separator();
        ui.columns(2, |cols| {
            render_metric(&mut cols[0], "Total Records", state.summary.total_records.to_string());
            render_metric(&mut cols[1], "Anomalies Detected", state.summary.anomaly_display());
        });
        ui.add_space(6.0);
    });
}

fn render_metric(ui: &mut egui::Ui, title: &str, value: String) {
    ui.vertical(|ui| {
        ui.label(title);
        ui.label(egui::RichText::new(value).size(30.0).strong().monospace());
    });
}
