//! Rentals by hour of day, as each day group's share of its own total.

use crate::observation::Observation;
use crate::traits::{DataAggregator, GraphRenderer};
use crate::types::{GraphConfig, StyleConfig};
use crate::utils::{GraphUtils, LegendMark};
use bikeshare_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Highest weekday code classified as [`DayGroup::Weekday`].
///
/// With Monday = 0 this classifies Saturday as a weekday.
pub const LAST_WEEKDAY_CODE: u8 = 5;

/// Caption under the hour chart.
pub const HOUR_CHART_CAPTION: &str = "Persentase Terhadap Total Masing - Masing Kelompok";

/// Day classification used only by the hour chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum DayGroup {
    /// Weekday codes 0 through 5
    Weekday,
    /// Weekday code 6
    Weekend,
}

impl DayGroup {
    /// Classifies a weekday code.
    pub const fn classify(weekday: u8) -> Self {
        if weekday <= LAST_WEEKDAY_CODE {
            Self::Weekday
        } else {
            Self::Weekend
        }
    }

    /// Legend label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weekday => "Weekday",
            Self::Weekend => "Weekend",
        }
    }
}

impl fmt::Display for DayGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Percentages for one hour. `None` means the group had no rows at that hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourShare {
    /// Hour of day
    pub hour: u8,
    /// Weekday-group share, percent
    pub weekday: Option<f64>,
    /// Weekend-group share, percent
    pub weekend: Option<f64>,
}

impl HourShare {
    /// Share of one group.
    pub const fn get(&self, group: DayGroup) -> Option<f64> {
        match group {
            DayGroup::Weekday => self.weekday,
            DayGroup::Weekend => self.weekend,
        }
    }
}

/// Per-hour percentage of each group's grand total, ascending by hour.
///
/// A group whose grand total is zero yields `NaN` shares.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HourPercentSummary {
    /// One entry per hour present in the input
    pub rows: Vec<HourShare>,
    /// Sum of counts over weekday-group rows
    pub weekday_total: u64,
    /// Sum of counts over weekend-group rows
    pub weekend_total: u64,
}

impl HourPercentSummary {
    /// Entry for an hour, if present.
    pub fn get(&self, hour: u8) -> Option<&HourShare> {
        self.rows.iter().find(|row| row.hour == hour)
    }

    /// Number of hours present.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no hour is present.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of the defined shares of one group.
    pub fn share_sum(&self, group: DayGroup) -> f64 {
        self.rows.iter().filter_map(|row| row.get(group)).sum()
    }
}

/// An observation tagged with its day group.
#[derive(Debug, Clone, Copy)]
struct ClassifiedRow {
    hour: u8,
    group: DayGroup,
    count: u64,
}

/// Classifies rows into day groups and normalizes hourly counts per group.
#[derive(Debug, Default)]
pub struct HourAggregator;

impl HourAggregator {
    /// Tags every row with its day group; the caller's rows are left untouched.
    fn classify(rows: &[Observation]) -> Vec<ClassifiedRow> {
        rows.iter()
            .map(|row| ClassifiedRow {
                hour: row.hour,
                group: DayGroup::classify(row.weekday),
                count: row.count,
            })
            .collect()
    }
}

impl DataAggregator for HourAggregator {
    type Output = HourPercentSummary;

    #[allow(clippy::cast_precision_loss)]
    fn aggregate(&self, rows: &[Observation]) -> HourPercentSummary {
        let classified = Self::classify(rows);

        let mut subtotals: BTreeMap<u8, BTreeMap<DayGroup, u64>> = BTreeMap::new();
        let (mut weekday_total, mut weekend_total) = (0u64, 0u64);
        for row in &classified {
            *subtotals.entry(row.hour).or_default().entry(row.group).or_default() += row.count;
            match row.group {
                DayGroup::Weekday => weekday_total += row.count,
                DayGroup::Weekend => weekend_total += row.count,
            }
        }

        // 0 / 0 stays NaN
        let share = |subtotal: u64, total: u64| 100.0 * subtotal as f64 / total as f64;
        let rows: Vec<HourShare> = subtotals
            .into_iter()
            .map(|(hour, groups)| HourShare {
                hour,
                weekday: groups
                    .get(&DayGroup::Weekday)
                    .map(|&subtotal| share(subtotal, weekday_total)),
                weekend: groups
                    .get(&DayGroup::Weekend)
                    .map(|&subtotal| share(subtotal, weekend_total)),
            })
            .collect();

        debug!(
            hours = rows.len(),
            weekday_total, weekend_total, "Aggregated rental shares by hour"
        );
        HourPercentSummary {
            rows,
            weekday_total,
            weekend_total,
        }
    }
}

/// Two lines over hours 0-23: weekday and weekend share of their own totals.
#[derive(Debug, Default)]
pub struct RentByHourOfDayGraph;

impl RentByHourOfDayGraph {
    /// Chart caption.
    pub const TITLE: &'static str = "Jumlah Sewa Berdasarkan Jam dan Jenis Hari";

    /// Create the graph with its fixed title and axis labels
    pub fn with_config(style: &StyleConfig) -> (Self, GraphConfig) {
        (Self, GraphConfig::new(Self::TITLE, "Jam", "Jumlah", style))
    }
}

impl GraphRenderer for RentByHourOfDayGraph {
    type Data = HourPercentSummary;

    fn name(&self) -> &'static str {
        "rent_by_hourofday"
    }

    fn description(&self) -> &'static str {
        "Weekday and weekend rental share by hour of day"
    }

    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, data: &HourPercentSummary, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let style = &config.style;
        let max_share = data
            .rows
            .iter()
            .flat_map(|row| [row.weekday, row.weekend])
            .flatten()
            .filter(|value| value.is_finite())
            .fold(f64::NEG_INFINITY, f64::max);
        let y_max = GraphUtils::y_upper_bound(max_share);

        let title_font = (style.title_font.family.as_str(), style.title_font.size);
        let label_font = (style.label_font.family.as_str(), style.label_font.size);
        let (plot_area, legend_strip) = GraphUtils::split_legend_strip(root, style.margins.legend);
        let mut chart = ChartBuilder::on(&plot_area)
            .caption(&config.title, title_font)
            .margin(style.margins.outer as i32)
            .x_label_area_size(style.margins.bottom)
            .y_label_area_size(style.margins.left)
            .build_cartesian_2d(0i32..23i32, 0f64..y_max)?;

        let y_formatter = |value: &f64| format!("{value:.1}");
        let mut mesh = chart.configure_mesh();
        mesh.x_desc(config.x_label.as_deref().unwrap_or("Jam"))
            .y_desc(config.y_label.as_deref().unwrap_or("Jumlah"))
            .x_labels(24)
            .y_label_formatter(&y_formatter)
            .label_style(label_font);
        if !style.show_grid {
            mesh.disable_mesh();
        }
        mesh.draw()?;

        let colors = self.series_colors(config);
        let first = colors.first().copied().unwrap_or(BLUE);
        let second = colors.get(1).copied().unwrap_or(RED);

        for (group, color) in [(DayGroup::Weekday, first), (DayGroup::Weekend, second)] {
            let points: Vec<(i32, f64)> = data
                .rows
                .iter()
                .filter_map(|row| row.get(group).map(|share| (i32::from(row.hour), share)))
                .filter(|(_, share)| share.is_finite())
                .collect();

            chart.draw_series(LineSeries::new(
                points.iter().copied(),
                color.stroke_width(style.line_width),
            ))?;
            chart.draw_series(
                points
                    .iter()
                    .map(|&point| Circle::new(point, style.marker_size, color.filled())),
            )?;
        }

        GraphUtils::draw_legend(
            &legend_strip,
            &[
                (DayGroup::Weekday.label(), first),
                (DayGroup::Weekend.label(), second),
            ],
            LegendMark::Line,
            label_font,
        )
    }
}
