//! Runtime validation of a loaded configuration.

use crate::loader::ConfigError;
use crate::schema::Config;
use bikeshare_common::parse_hex_color;

const DIMENSION_RANGE: std::ops::RangeInclusive<u32> = 200..=4000;
const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration, reporting every problem at once.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let problems = Self::problems(config);
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(problems.join("; ")))
        }
    }

    /// Lists every validation problem in the configuration.
    pub fn problems(config: &Config) -> Vec<String> {
        let mut problems = Vec::new();

        if config.data.path.as_os_str().is_empty() {
            problems.push("data.path cannot be empty".to_string());
        }

        if config.server.host.trim().is_empty() {
            problems.push("server.host cannot be empty".to_string());
        }
        if config.server.port == 0 {
            problems.push("server.port must be non-zero".to_string());
        }

        let charts = &config.charts;
        for (name, value) in [("charts.width", charts.width), ("charts.height", charts.height)] {
            if !DIMENSION_RANGE.contains(&value) {
                problems.push(format!(
                    "{name} must be between {} and {}, got {value}",
                    DIMENSION_RANGE.start(),
                    DIMENSION_RANGE.end()
                ));
            }
        }
        for (name, value) in [
            ("charts.primary_color", &charts.primary_color),
            ("charts.secondary_color", &charts.secondary_color),
            ("charts.background_color", &charts.background_color),
        ] {
            if parse_hex_color(value).is_none() {
                problems.push(format!("{name} must be a #RRGGBB color, got '{value}'"));
            }
        }
        if charts.line_width == 0 {
            problems.push("charts.line_width must be non-zero".to_string());
        }

        let level = config.logging.level.trim();
        if level.is_empty() {
            problems.push("logging.level cannot be empty".to_string());
        } else if !level.contains(['=', ',']) && !LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            // Directive strings such as `bikeshare_graphs=debug` are left to the filter parser
            problems.push(format!("logging.level '{level}' is not a known level"));
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConfigValidator::validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_reports_all_problems() {
        let mut config = Config::default();
        config.server.port = 0;
        config.charts.width = 50;
        config.charts.primary_color = "orange".to_string();

        let problems = ConfigValidator::problems(&config);
        assert_eq!(problems.len(), 3);

        let error = ConfigValidator::validate(&config).unwrap_err();
        let message = error.to_string();
        assert!(message.contains("server.port"));
        assert!(message.contains("charts.width"));
        assert!(message.contains("charts.primary_color"));
    }

    #[test]
    fn test_log_level_directives() {
        let mut config = Config::default();
        config.logging.level = "bikeshare_graphs=debug,info".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "DEBUG".to_string();
        assert!(ConfigValidator::validate(&config).is_ok());

        config.logging.level = "loud".to_string();
        assert!(ConfigValidator::validate(&config).is_err());
    }
}
