//! Configuration loading for the dashboard.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the optional configuration file, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "dashboard.toml";

/// Dashboard settings read from `dashboard.toml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct DashboardConfig {
    /// Relative or absolute path of the tagged firewall log.
    pub data_path: PathBuf,
    /// Number of rows shown by "Show Raw Data".
    pub raw_preview_rows: usize,
    /// File name suggested by the export dialog.
    pub export_file_name: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data").join("log2.csv"),
            raw_preview_rows: 100,
            export_file_name: "anomalies.csv".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the config file
    ///
    /// # Returns
    /// * `Ok(DashboardConfig)` if the file was successfully loaded and parsed
    /// * `Err(String)` with a descriptive error message otherwise
    pub fn load(config_path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(config_path).map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Load `config_path` if it exists, falling back to defaults otherwise.
    ///
    /// A file that exists but cannot be parsed is logged and ignored.
    pub fn load_or_default(config_path: &Path) -> Self {
        if !config_path.exists() {
            log::debug!("No {} found, using defaults", config_path.display());
            return Self::default();
        }

        match Self::load(config_path) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", config_path.display());
                config
            }
            Err(e) => {
                log::warn!("{} ({}), using defaults", e, config_path.display());
                Self::default()
            }
        }
    }
}
