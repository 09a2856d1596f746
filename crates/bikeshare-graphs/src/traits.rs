//! Aggregator and renderer trait definitions shared by the three charts.

use crate::observation::Observation;
use crate::types::GraphConfig;
use crate::utils::GraphUtils;
use bikeshare_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;

/// Turns a filtered set of observations into one chart-ready summary.
///
/// Implementations never mutate their input; every call recomputes from scratch.
pub trait DataAggregator {
    /// Summary produced by this aggregator.
    type Output;

    /// Aggregates `rows`.
    fn aggregate(&self, rows: &[Observation]) -> Self::Output;
}

/// Renders one summary type into an SVG chart.
pub trait GraphRenderer: Send + Sync {
    /// The type of data this renderer expects.
    type Data;

    /// Gets the name of this graph type.
    fn name(&self) -> &'static str;

    /// Gets the description of this graph type.
    fn description(&self) -> &'static str;

    /// Draws the chart onto an already-filled drawing area.
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, data: &Self::Data, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static;

    /// Renders the chart to an SVG document.
    fn render(&self, data: &Self::Data, config: &GraphConfig) -> Result<Vec<u8>> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (config.width, config.height)).into_drawing_area();
            root.fill(&self.background_color(config))?;
            self.draw(&root, data, config)?;
            root.present()?;
        }
        tracing::debug!(graph = self.name(), bytes = svg.len(), "Rendered chart");
        Ok(svg.into_bytes())
    }

    /// Get colors from the configured palette
    fn series_colors(&self, config: &GraphConfig) -> Vec<RGBColor> {
        config
            .style
            .colors
            .iter()
            .map(|color| GraphUtils::parse_color(color))
            .collect()
    }

    /// Get background color from style config
    fn background_color(&self, config: &GraphConfig) -> RGBColor {
        GraphUtils::parse_color_or(&config.style.background_color, WHITE)
    }
}
