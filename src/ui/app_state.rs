//! # Application State Management
//!
//! This module implements the central `AppState` struct which owns the table cache, the
//! sidebar selections and the views derived from them. It implements the `eframe::App` trait
//! to integrate with the egui application framework.
//!
//! ## Recomputation
//!
//! egui rebuilds the whole interface every frame, which matches the dashboard's
//! "rerun everything on interaction" model. Loading goes through the session cache and the
//! filtered views are rebuilt only when the loaded table or the filter settings change, so a
//! frame without input is cheap.

use eframe::egui;
use std::sync::Arc;
use std::time::Duration;

use crate::config::DashboardConfig;
use crate::data::export::export_anomalies;
use crate::data::summary::{ScatterSeries, scatter_series, threat_type_counts};
use crate::data::{FilterSettings, FilteredView, LoadOutcome, Summary, TableCache, filter};

/// Interval at which the data file is checked for changes while the window is idle.
const FILE_CHECK_INTERVAL: Duration = Duration::from_secs(2);

/// Central application state.
pub struct AppState {
    pub config: DashboardConfig,
    /// Optional alert message to display in a modal dialog.
    pub alert: Option<String>,
    /// Session cache of load results.
    pub cache: TableCache,
    /// Load result the current views were derived from.
    pub outcome: Arc<LoadOutcome>,
    /// Selections made in the sidebar.
    pub settings: FilterSettings,
    /// Settings the current views were computed with, `None` before the first computation.
    applied_settings: Option<FilterSettings>,

    // Derived views
    pub view: FilteredView,
    pub summary: Summary,
    pub scatter: Vec<ScatterSeries>,
    pub threat_counts: Option<Vec<(String, usize)>>,

    // Main panel toggles
    /// Whether the raw data preview is expanded.
    pub show_raw_data: bool,
    /// Result line of the most recent export.
    pub last_export: Option<String>,
}

impl AppState {
    /// Create the application state and perform the initial load.
    pub fn new(config: DashboardConfig) -> Self {
        let mut cache = TableCache::new();
        let outcome = cache.get_or_load(&config.data_path);

        let mut state = Self {
            config,
            alert: None,
            cache,
            outcome,
            settings: FilterSettings::default(),
            applied_settings: None,
            view: FilteredView::default(),
            summary: Summary::compute(&Default::default()),
            scatter: Vec::new(),
            threat_counts: None,
            show_raw_data: false,
            last_export: None,
        };
        state.refresh_views();
        state
    }

    /// Reload from the cache and rebuild the derived views if their inputs changed.
    pub fn refresh(&mut self) {
        let outcome = self.cache.get_or_load(&self.config.data_path);
        if !Arc::ptr_eq(&outcome, &self.outcome) {
            self.outcome = outcome;
            self.applied_settings = None;
        }
        if self.applied_settings != Some(self.settings) {
            self.refresh_views();
        }
    }

    fn refresh_views(&mut self) {
        let view = filter::apply_filters(&self.outcome.table, self.settings);
        // Keep the slider inside the new bounds, as a rerun with a smaller maximum would
        self.settings.min_bytes = view.min_bytes;
        self.summary = Summary::compute(&view.windowed);
        self.scatter = scatter_series(&view.filtered);
        self.threat_counts = threat_type_counts(&view.windowed);
        self.view = view;
        self.applied_settings = Some(self.settings);
    }

    /// Drop the cached table so the next refresh reads the file again.
    pub fn reload_data(&mut self) {
        log::info!("Reloading {}", self.config.data_path.display());
        self.cache.clear();
        self.refresh();
    }

    /// Ask for a destination and write the anomaly rows of the windowed table there.
    pub fn export_anomalies(&mut self) {
        let dialog = rfd::FileDialog::new()
            .add_filter("CSV files", &["csv"])
            .set_file_name(&self.config.export_file_name);
        let Some(destination) = dialog.save_file() else {
            log::debug!("Export cancelled");
            return;
        };

        match export_anomalies(&self.view.windowed, &destination) {
            Ok(count) => {
                self.last_export = Some(format!("Saved {} anomalies to {}", count, destination.display()));
            }
            Err(e) => {
                log::error!("Export failed: {:#}", e);
                self.alert = Some(format!("Export failed: {:#}", e));
            }
        }
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };
        egui::Window::new("Alert")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(message);
                    ui.add_space(20.0);

                    if ui.button("OK").clicked() {
                        self.alert = None;
                    }
                    ui.add_space(10.0);
                });
            });
    }
}

impl eframe::App for AppState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.refresh();

        // Wake up now and then so changes to the data file show without input
        ctx.request_repaint_after(FILE_CHECK_INTERVAL);

        self.render_alert(ctx);

        // Panels layout: sidebar (left), title and metrics (top), charts fill the remaining space
        super::sidebar::render(ctx, self);
        super::top_panel::render(ctx, self);
        super::main_panel::render(ctx, self);

        // A control changed during this frame; show its effect without waiting for more input
        if self.applied_settings != Some(self.settings) {
            ctx.request_repaint();
        }
    }
}
