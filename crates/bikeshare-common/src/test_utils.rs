//! Test utilities and shared test helpers for the dashboard workspace.
//!
//! This module provides logging setup, float assertions and fixture builders
//! for the hourly rental CSV and the YAML configuration, usable from unit and
//! integration tests in every crate.

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Assert that two floating point numbers are approximately equal within a tolerance.
pub fn assert_approx_eq(left: f64, right: f64, tolerance: f64) {
    let diff = (left - right).abs();
    assert!(
        diff <= tolerance,
        "assertion failed: `{left}` is not approximately equal to `{right}` (tolerance: {tolerance}, diff: {diff})"
    );
}

/// Builders for the hourly rental CSV file.
pub mod csv_fixtures {
    /// Header of the hourly rental file, including the columns the dashboard ignores.
    pub const HEADER: &str = "instant,dteday,season,yr,mnth,hr,holiday,weekday,workingday,weathersit,temp,atemp,hum,windspeed,casual,registered,cnt";

    /// One hourly observation; `cnt` is derived as `casual + registered`.
    #[derive(Debug, Clone)]
    pub struct FixtureRow {
        /// ISO date of the observation
        pub date: String,
        /// Hour of day, 0-23
        pub hour: u8,
        /// Weekday code, 0-6
        pub weekday: u8,
        /// Month number, 1-12
        pub month: u8,
        /// Casual riders
        pub casual: u64,
        /// Registered riders
        pub registered: u64,
    }

    impl FixtureRow {
        /// Creates a row.
        pub fn new(date: &str, hour: u8, weekday: u8, month: u8, casual: u64, registered: u64) -> Self {
            Self {
                date: date.to_string(),
                hour,
                weekday,
                month,
                casual,
                registered,
            }
        }
    }

    /// Renders rows as CSV text with the full header.
    pub fn to_csv(rows: &[FixtureRow]) -> String {
        let mut out = String::from(HEADER);
        out.push('\n');
        for (i, row) in rows.iter().enumerate() {
            out.push_str(&format!(
                "{},{},1,0,{},{},0,{},1,1,0.24,0.2879,0.81,0.0,{},{},{}\n",
                i + 1,
                row.date,
                row.month,
                row.hour,
                row.weekday,
                row.casual,
                row.registered,
                row.casual + row.registered,
            ));
        }
        out
    }

    /// A small two-week sample spanning January and February 2011, deliberately out of date order.
    pub fn sample_rows() -> Vec<FixtureRow> {
        vec![
            FixtureRow::new("2011-02-01", 8, 1, 2, 4, 40),
            FixtureRow::new("2011-01-01", 0, 5, 1, 3, 13),
            FixtureRow::new("2011-01-01", 1, 5, 1, 8, 32),
            FixtureRow::new("2011-01-02", 0, 6, 1, 2, 15),
            FixtureRow::new("2011-01-02", 13, 6, 1, 10, 20),
            FixtureRow::new("2011-01-03", 8, 0, 1, 1, 50),
            FixtureRow::new("2011-01-03", 17, 0, 1, 5, 70),
            FixtureRow::new("2011-01-10", 17, 0, 1, 6, 80),
            FixtureRow::new("2011-02-01", 17, 1, 2, 9, 90),
        ]
    }

    /// Writes rows to a temporary CSV file.
    #[cfg(feature = "tempfile")]
    pub fn write_csv(rows: &[FixtureRow]) -> tempfile::NamedTempFile {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .expect("Failed to create temporary file");
        file.write_all(to_csv(rows).as_bytes())
            .expect("Failed to write CSV fixture");
        file.flush().expect("Failed to flush CSV fixture");
        file
    }
}

/// Configuration-related test utilities.
pub mod config_fixtures {
    /// Create a minimal valid test configuration as YAML string.
    pub const fn minimal_config_yaml() -> &'static str {
        r#"
data:
  path: "df_hour.csv"
"#
    }

    /// Create a full test configuration as YAML string.
    pub const fn full_config_yaml() -> &'static str {
        concat!(
            "data:\n",
            "  path: \"data/df_hour.csv\"\n",
            "\n",
            "server:\n",
            "  host: \"0.0.0.0\"\n",
            "  port: 9000\n",
            "\n",
            "charts:\n",
            "  width: 1000\n",
            "  height: 400\n",
            "  primary_color: \"#E66F4E\"\n",
            "  secondary_color: \"#E8C567\"\n",
            "  background_color: \"#FFFFFF\"\n",
            "  line_width: 2\n",
            "  marker_size: 5\n",
            "  enable_grid: true\n",
            "\n",
            "logging:\n",
            "  level: \"debug\"\n",
            "  format: \"compact\"\n",
        )
    }
}
