//! Configuration schema definitions using serde.

use bikeshare_common::{DashboardError, LogFormat, LoggingConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input data configuration.
    pub data: DataConfig,
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Chart styling configuration.
    pub charts: ChartsConfig,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

/// Input data configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path of the hourly rental CSV file.
    pub path: PathBuf,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// The `host:port` pair to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Chart styling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartsConfig {
    /// Chart width in pixels.
    pub width: u32,
    /// Chart height in pixels.
    pub height: u32,
    /// First series color (casual riders, weekday curve, month line).
    pub primary_color: String,
    /// Second series color (registered riders, weekend curve).
    pub secondary_color: String,
    /// Chart background color.
    pub background_color: String,
    /// Line stroke width.
    pub line_width: u32,
    /// Marker radius.
    pub marker_size: u32,
    /// Whether to draw the mesh grid.
    pub enable_grid: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Level filter, overridden by `RUST_LOG`.
    pub level: String,
    /// Output layout.
    pub format: LogFormat,
    /// Optional log file.
    pub file_path: Option<PathBuf>,
}

impl LoggingSettings {
    /// Converts to the runtime logging configuration.
    pub fn to_logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            level: self.level.clone(),
            format: self.format,
            file_path: self.file_path.clone(),
            ..LoggingConfig::default()
        }
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), DashboardError> {
        crate::ConfigValidator::validate(self).map_err(Into::into)
    }
}
