//! Graph configuration and styling types

use bikeshare_config::ChartsConfig;
use serde::{Deserialize, Serialize};

/// Per-chart configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Caption drawn above the plot
    pub title: String,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// X axis description
    pub x_label: Option<String>,
    /// Y axis description
    pub y_label: Option<String>,
    /// Shared styling
    pub style: StyleConfig,
}

impl GraphConfig {
    /// Creates a configuration for one chart with the shared style.
    pub fn new(title: &str, x_label: &str, y_label: &str, style: &StyleConfig) -> Self {
        Self {
            title: title.to_string(),
            width: style.width,
            height: style.height,
            x_label: Some(x_label.to_string()),
            y_label: Some(y_label.to_string()),
            style: style.clone(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        let style = StyleConfig::default();
        Self {
            title: "Graph".to_string(),
            width: style.width,
            height: style.height,
            x_label: None,
            y_label: None,
            style,
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name
    pub family: String,
    /// Size in points
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Outer margin around the chart
    pub outer: u32,
    /// Space below the plot for x labels
    pub bottom: u32,
    /// Space left of the plot for y labels
    pub left: u32,
    /// Height of the legend strip under the chart
    pub legend: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            outer: 20,
            bottom: 60,
            left: 90,
            legend: 40,
        }
    }
}

/// Styling shared by all dashboard charts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Default image width
    pub width: u32,
    /// Default image height
    pub height: u32,
    /// Series palette, `#RRGGBB`
    pub colors: Vec<String>,
    /// Background, `#RRGGBB`
    pub background_color: String,
    /// Caption font
    pub title_font: FontConfig,
    /// Axis tick and description font
    pub label_font: FontConfig,
    /// Margins
    pub margins: MarginConfig,
    /// Line stroke width
    pub line_width: u32,
    /// Marker radius
    pub marker_size: u32,
    /// Whether to draw grid lines
    pub show_grid: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::from(&ChartsConfig::default())
    }
}

impl From<&ChartsConfig> for StyleConfig {
    fn from(charts: &ChartsConfig) -> Self {
        Self {
            width: charts.width,
            height: charts.height,
            colors: vec![charts.primary_color.clone(), charts.secondary_color.clone()],
            background_color: charts.background_color.clone(),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 22,
            },
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
            line_width: charts.line_width,
            marker_size: charts.marker_size,
            show_grid: charts.enable_grid,
        }
    }
}
