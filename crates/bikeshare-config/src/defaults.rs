//! Default values for every configuration section.

use crate::schema::*;
use bikeshare_common::LogFormat;
use std::path::PathBuf;

/// Relative path of the hourly rental file.
pub const DEFAULT_DATA_PATH: &str = "df_hour.csv";

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8501;

/// Casual riders / weekday curve.
pub const DEFAULT_PRIMARY_COLOR: &str = "#E66F4E";

/// Registered riders / weekend curve.
pub const DEFAULT_SECONDARY_COLOR: &str = "#E8C567";

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            server: ServerConfig::default(),
            charts: ChartsConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for ChartsConfig {
    fn default() -> Self {
        // 12x5 inch figures at 100 dpi
        Self {
            width: 1200,
            height: 500,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary_color: DEFAULT_SECONDARY_COLOR.to_string(),
            background_color: "#FFFFFF".to_string(),
            line_width: 3,
            marker_size: 7,
            enable_grid: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file_path: None,
        }
    }
}
