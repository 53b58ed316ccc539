use eframe::egui;
use env_logger::Builder;
use log::{LevelFilter, info};
use std::path::Path;

mod config;
mod data;
mod ui;

use config::{CONFIG_FILE_NAME, DashboardConfig};

fn main() -> eframe::Result {
    // Logging setup; RUST_LOG overrides the defaults
    Builder::new()
        .filter_level(LevelFilter::Info)
        .filter(Some("firewall_anomaly_dashboard"), LevelFilter::Debug)
        .parse_default_env()
        .init();

    info!("Starting up");

    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE_NAME));
    info!("Reading firewall log from {}", config.data_path.display());

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Firewall Anomaly Dashboard")
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Firewall Anomaly Dashboard",
        native_options,
        Box::new(move |_cc| Ok(Box::new(ui::AppState::new(config)))),
    )
}
