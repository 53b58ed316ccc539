//! # Raw Data Table
//!
//! Virtualized preview of the filtered records using `egui_extras::TableBuilder`. Only visible
//! rows are built, so the preview stays smooth for large limits. The timestamp comes first,
//! followed by the remaining columns in file order; anomaly-flagged rows are tinted red.

use eframe::egui;
use egui_extras::{Column, TableBuilder};

use crate::data::types::{LogTable, TIMESTAMP_COLUMN};
use crate::ui::color_for_anomaly;

/// Maximum height of the table body before it scrolls.
const MAX_TABLE_HEIGHT: f32 = 320.0;

/// Render the first `max_rows` records of `table`.
pub fn render(ui: &mut egui::Ui, table: &LogTable, max_rows: usize) {
    let ts_index = table.timestamp_column_index();
    let columns: Vec<usize> = (0..table.columns.len()).filter(|i| Some(*i) != ts_index).collect();
    let rows = table.head(max_rows);
    let row_count = rows.len();

    ui.label(format!("Showing {} of {} filtered records", row_count, table.len()));

    let row_height = ui.text_style_height(&egui::TextStyle::Body) * 1.3;
    egui::ScrollArea::horizontal().id_salt("raw_data_scroll").show(ui, |ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
            .column(Column::initial(170.0).at_least(120.0)) // Timestamp
            .columns(Column::auto().at_least(60.0), columns.len())
            .header(row_height, |mut header| {
                header.col(|ui| {
                    ui.strong(TIMESTAMP_COLUMN);
                });
                for &i in &columns {
                    header.col(|ui| {
                        ui.strong(&table.columns[i]);
                    });
                }
            })
            .body(|body| {
                body.rows(row_height, row_count, |mut row| {
                    let record = &rows[row.index()];
                    let text_color = if record.is_anomaly() { Some(color_for_anomaly(record.anomaly, 1.0)) } else { None };

                    row.col(|ui| {
                        let ts = record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();
                        match text_color {
                            Some(color) => ui.colored_label(color, ts),
                            None => ui.label(ts),
                        };
                    });
                    for &i in &columns {
                        let value = record.fields.get(i).map(String::as_str).unwrap_or("");
                        row.col(|ui| {
                            match text_color {
                                Some(color) => ui.colored_label(color, value),
                                None => ui.label(value),
                            };
                        });
                    }
                });
            });
    });
}
