//! Rentals by month: total riders as a line with point markers.

use crate::observation::Observation;
use crate::traits::{DataAggregator, GraphRenderer};
use crate::types::{GraphConfig, StyleConfig};
use crate::utils::GraphUtils;
use bikeshare_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Month names indexed by month number minus one.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a month number, or `None` outside 1-12.
pub fn month_name(month: u8) -> Option<&'static str> {
    usize::from(month)
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index))
        .copied()
}

/// Total rentals for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthRent {
    /// Month number
    pub month: u8,
    /// Month name
    pub name: &'static str,
    /// Sum of total riders
    pub total_rent: u64,
}

/// Rentals per month, ascending by month number; absent months are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    /// One entry per month present
    pub rows: Vec<MonthRent>,
}

impl MonthSummary {
    /// `(name, total_rent)` pairs in output order.
    pub fn pairs(&self) -> Vec<(&'static str, u64)> {
        self.rows.iter().map(|row| (row.name, row.total_rent)).collect()
    }

    /// Number of months present.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no month is present.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of every month's total.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|row| row.total_rent).sum()
    }
}

/// Groups observations by month number and sums total riders.
#[derive(Debug, Default)]
pub struct MonthAggregator;

impl DataAggregator for MonthAggregator {
    type Output = MonthSummary;

    fn aggregate(&self, rows: &[Observation]) -> MonthSummary {
        let mut groups: BTreeMap<u8, u64> = BTreeMap::new();
        for row in rows {
            *groups.entry(row.month).or_default() += row.count;
        }

        let rows: Vec<MonthRent> = groups
            .into_iter()
            .filter_map(|(month, total_rent)| match month_name(month) {
                Some(name) => Some(MonthRent {
                    month,
                    name,
                    total_rent,
                }),
                None => {
                    warn!(month, "Skipping observations with unknown month number");
                    None
                }
            })
            .collect();

        debug!(months = rows.len(), "Aggregated rentals by month");
        MonthSummary { rows }
    }
}

/// Line chart of total rentals per month present.
#[derive(Debug, Default)]
pub struct RentByMonthGraph;

impl RentByMonthGraph {
    /// Chart caption.
    pub const TITLE: &'static str = "Jumlah Sewa Berdasarkan Bulan";

    /// Create the graph with its fixed title and axis labels
    pub fn with_config(style: &StyleConfig) -> (Self, GraphConfig) {
        (Self, GraphConfig::new(Self::TITLE, "Bulan", "Jumlah Sewa", style))
    }
}

impl GraphRenderer for RentByMonthGraph {
    type Data = MonthSummary;

    fn name(&self) -> &'static str {
        "rent_by_month"
    }

    fn description(&self) -> &'static str {
        "Total rentals by month"
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, data: &MonthSummary, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let style = &config.style;
        let max_total = data.rows.iter().map(|row| row.total_rent).max().unwrap_or(0);
        let y_max = GraphUtils::y_upper_bound(max_total as f64);
        let x_end = GraphUtils::category_axis_end(data.len());

        let title_font = (style.title_font.family.as_str(), style.title_font.size);
        let label_font = (style.label_font.family.as_str(), style.label_font.size);
        let mut chart = ChartBuilder::on(root)
            .caption(&config.title, title_font)
            .margin(style.margins.outer as i32)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d((0usize..x_end).into_segmented(), 0f64..y_max)?;

        let names: Vec<&str> = data.rows.iter().map(|row| row.name).collect();
        let x_formatter = |value: &SegmentValue<usize>| match value {
            SegmentValue::CenterOf(index) => names.get(*index).map(ToString::to_string).unwrap_or_default(),
            _ => String::new(),
        };
        let y_formatter = |value: &f64| format!("{value:.0}");

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_deref().unwrap_or("Bulan"))
            .y_desc(config.y_label.as_deref().unwrap_or("Jumlah Sewa"))
            .x_labels(x_end + 1)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(label_font);
        if !style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let color = self.series_colors(config).first().copied().unwrap_or(BLUE);
        let points: Vec<(SegmentValue<usize>, f64)> = data
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (SegmentValue::CenterOf(i), row.total_rent as f64))
            .collect();

        chart.draw_series(LineSeries::new(
            points.iter().cloned(),
            color.stroke_width(style.line_width),
        ))?;
        chart.draw_series(
            points
                .iter()
                .cloned()
                .map(|point| Circle::new(point, style.marker_size, color.filled())),
        )?;

        Ok(())
    }
}
