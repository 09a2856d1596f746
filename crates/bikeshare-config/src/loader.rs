//! Configuration loading utilities

use crate::Config;
use bikeshare_common::{DashboardError, LogFormat};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "BIKESHARE_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Invalid(String),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Variable name
        var: String,
        /// Underlying parse failure
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for DashboardError {
    fn from(err: ConfigError) -> Self {
        DashboardError::config_with_source("Configuration loading error", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config = Self::parse(&content)?;

        Self::apply_env_overrides(&mut config)?;
        crate::ConfigValidator::validate(&config)?;

        info!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse configuration from YAML text; missing sections take their defaults.
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from the environment and the working directory.
    ///
    /// Looks at `BIKESHARE_CONFIG_PATH`, then `config.yaml`, then `config.yml`,
    /// and falls back to defaults when none exists.
    pub fn load() -> bikeshare_common::Result<Config> {
        if let Some(path) = Self::discover(env::var(CONFIG_PATH_VAR).ok()) {
            return Ok(Self::load_config(path)?);
        }

        debug!("No configuration file found, using defaults");
        let mut config = Config::default();
        Self::apply_env_overrides(&mut config)?;
        crate::ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> bikeshare_common::Result<Config> {
        Ok(Self::load_config(path)?)
    }

    fn discover(explicit: Option<String>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        ["config.yaml", "config.yml"]
            .into_iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists())
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides(config, |var| env::var(var).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("BIKESHARE_DATA_PATH") {
            config.data.path = PathBuf::from(path);
        }

        if let Some(host) = lookup("BIKESHARE_HOST") {
            config.server.host = host;
        }

        if let Some(port) = lookup("BIKESHARE_PORT") {
            config.server.port = parse_var("BIKESHARE_PORT", &port)?;
        }

        if let Some(level) = lookup("BIKESHARE_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(format) = lookup("BIKESHARE_LOG_FORMAT") {
            config.logging.format = match format.to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "compact" => LogFormat::Compact,
                "json" => LogFormat::Json,
                other => {
                    return Err(ConfigError::EnvParseError {
                        var: "BIKESHARE_LOG_FORMAT".to_string(),
                        source: format!("unknown log format '{other}'").into(),
                    })
                }
            };
        }

        if let Some(width) = lookup("BIKESHARE_CHART_WIDTH") {
            config.charts.width = parse_var("BIKESHARE_CHART_WIDTH", &width)?;
        }

        if let Some(height) = lookup("BIKESHARE_CHART_HEIGHT") {
            config.charts.height = parse_var("BIKESHARE_CHART_HEIGHT", &height)?;
        }

        Ok(())
    }

    /// Apply command-line overrides, then validate the result again.
    pub fn apply_cli_overrides(
        config: &mut Config,
        data: Option<&Path>,
        log_level: Option<&str>,
    ) -> Result<(), ConfigError> {
        if let Some(path) = data {
            config.data.path = path.to_path_buf();
        }
        if let Some(level) = log_level {
            config.logging.level = level.to_string();
        }
        crate::ConfigValidator::validate(config)
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(ConfigLoader::parse("").unwrap(), Config::default());
        assert_eq!(ConfigLoader::parse("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_partial_sections() {
        let config = ConfigLoader::parse("server:\n  port: 9999\n").unwrap();
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.charts.width, 1200);
    }

    #[test]
    fn test_parse_rejects_wrong_types() {
        let result = ConfigLoader::parse("server:\n  port: lots\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_overrides_applied() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("BIKESHARE_DATA_PATH", "/srv/data/hour.csv"),
            ("BIKESHARE_PORT", "8080"),
            ("BIKESHARE_LOG_FORMAT", "JSON"),
            ("BIKESHARE_CHART_WIDTH", " 900 "),
        ]);

        ConfigLoader::apply_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.data.path, PathBuf::from("/srv/data/hour.csv"));
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.charts.width, 900);
        assert_eq!(config.charts.height, 500);
    }

    #[test]
    fn test_bad_override_names_variable() {
        let mut config = Config::default();
        let error = ConfigLoader::apply_overrides(&mut config, lookup_from(&[("BIKESHARE_PORT", "http")]))
            .unwrap_err();
        assert!(error.to_string().contains("BIKESHARE_PORT"));

        let error = ConfigLoader::apply_overrides(&mut config, lookup_from(&[("BIKESHARE_LOG_FORMAT", "xml")]))
            .unwrap_err();
        assert!(error.to_string().contains("BIKESHARE_LOG_FORMAT"));
    }

    #[test]
    fn test_cli_overrides_are_validated() {
        let mut config = Config::default();
        ConfigLoader::apply_cli_overrides(&mut config, Some(Path::new("/srv/hour.csv")), Some("debug"))
            .unwrap();
        assert_eq!(config.data.path, PathBuf::from("/srv/hour.csv"));
        assert_eq!(config.logging.level, "debug");

        let error = ConfigLoader::apply_cli_overrides(&mut config, None, Some("bogus")).unwrap_err();
        assert!(matches!(error, ConfigError::Invalid(_)));
        assert!(error.to_string().contains("bogus"));

        let error = ConfigLoader::apply_cli_overrides(&mut Config::default(), Some(Path::new("")), None)
            .unwrap_err();
        assert!(error.to_string().contains("data.path"));
    }

    #[test]
    fn test_discover_prefers_explicit_path() {
        let path = ConfigLoader::discover(Some("/etc/bikeshare.yaml".to_string()));
        assert_eq!(path, Some(PathBuf::from("/etc/bikeshare.yaml")));
    }
}
