//! # Sidebar - Filters
//!
//! Fixed-width left panel with the time window selector, the minimum byte slider and a
//! button that drops the session cache. Changing a control only updates
//! `AppState::settings`; the views are rebuilt by `AppState::refresh` on the next frame.

use crate::data::TimeWindow;
use crate::ui::AppState;
use eframe::egui;

/// Render the filter sidebar.
pub fn render(ctx: &egui::Context, state: &mut AppState) {
    egui::SidePanel::left("filters_left").exact_width(260.0).show(ctx, |ui| {
        ui.add_space(8.0);
        ui.label(egui::RichText::new("🕒 Time Range").strong());
        ui.label("Select Time Window");
        egui::ComboBox::from_id_salt("time_window_selector")
            .selected_text(state.settings.window.label())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for window in TimeWindow::OPTIONS {
                    ui.selectable_value(&mut state.settings.window, window, window.label());
                }
            });

        ui.add_space(12.0);
        ui.heading("📊 Filters");
        ui.separator();
        ui.label("Minimum Bytes");
        let max_bytes = state.view.max_bytes;
        ui.add_enabled_ui(max_bytes > 0, |ui| {
            ui.add(egui::Slider::new(&mut state.settings.min_bytes, 0..=max_bytes));
        });

        ui.add_space(12.0);
        ui.separator();
        ui.horizontal(|ui| {
            ui.label("Data file:");
            ui.label(egui::RichText::new(state.config.data_path.display().to_string()).monospace());
        });
        if ui
            .button("Reload data")
            .on_hover_text("Discard the cached table and read the data file again")
            .clicked()
        {
            state.reload_data();
        }
    });
}
