//! Rentals by day of week: casual and registered riders as stacked bars.

use crate::observation::Observation;
use crate::traits::{DataAggregator, GraphRenderer};
use crate::types::{GraphConfig, StyleConfig};
use crate::utils::{GraphUtils, LegendMark};
use bikeshare_common::Result;
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Day names indexed by weekday code (Monday = 0).
pub const DAY_NAMES: [&str; 7] = ["Senin", "Selasa", "Rabu", "Kamis", "Jumat", "Sabtu", "Minggu"];

/// Pixels trimmed from each side of a bar inside its slot.
const BAR_MARGIN: u32 = 12;

/// Name of a weekday code, or `None` outside 0-6.
pub fn day_name(weekday: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(weekday)).copied()
}

/// Totals for one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekdayRent {
    /// Weekday code
    pub weekday: u8,
    /// Day name
    pub name: &'static str,
    /// Sum of casual riders
    pub casual: u64,
    /// Sum of registered riders
    pub registered: u64,
}

impl WeekdayRent {
    /// Height of the stacked bar.
    pub const fn total(&self) -> u64 {
        self.casual + self.registered
    }
}

/// Rentals per weekday, ascending by weekday code.
///
/// Weekdays without observations are absent, not zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WeekdaySummary {
    /// One entry per weekday present
    pub rows: Vec<WeekdayRent>,
}

impl WeekdaySummary {
    /// `(casual, registered)` for a day name.
    pub fn get(&self, name: &str) -> Option<(u64, u64)> {
        self.rows
            .iter()
            .find(|row| row.name == name)
            .map(|row| (row.casual, row.registered))
    }

    /// Number of weekdays present.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no weekday is present.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(casual, registered)` summed over all weekdays.
    pub fn totals(&self) -> (u64, u64) {
        self.rows
            .iter()
            .fold((0, 0), |(c, r), row| (c + row.casual, r + row.registered))
    }
}

/// Groups observations by weekday and sums casual and registered riders.
#[derive(Debug, Default)]
pub struct WeekdayAggregator;

impl DataAggregator for WeekdayAggregator {
    type Output = WeekdaySummary;

    fn aggregate(&self, rows: &[Observation]) -> WeekdaySummary {
        let mut groups: BTreeMap<u8, (u64, u64)> = BTreeMap::new();
        for row in rows {
            let entry = groups.entry(row.weekday).or_default();
            entry.0 += row.casual;
            entry.1 += row.registered;
        }

        let rows: Vec<WeekdayRent> = groups
            .into_iter()
            .filter_map(|(weekday, (casual, registered))| {
                let Some(name) = day_name(weekday) else {
                    warn!(weekday, "Skipping observations with unknown weekday code");
                    return None;
                };
                Some(WeekdayRent {
                    weekday,
                    name,
                    casual,
                    registered,
                })
            })
            .collect();

        debug!(weekdays = rows.len(), "Aggregated rentals by weekday");
        WeekdaySummary { rows }
    }
}

/// Stacked bar chart of casual (base) and registered (top) riders per weekday.
#[derive(Debug, Default)]
pub struct RentByDayOfWeekGraph;

impl RentByDayOfWeekGraph {
    /// Chart caption.
    pub const TITLE: &'static str = "Jumlah Sewa Berdasarkan Hari";

    /// Create the graph with its fixed title and axis labels
    pub fn with_config(style: &StyleConfig) -> (Self, GraphConfig) {
        (Self, GraphConfig::new(Self::TITLE, "Hari", "Jumlah Sewa", style))
    }
}

impl GraphRenderer for RentByDayOfWeekGraph {
    type Data = WeekdaySummary;

    fn name(&self) -> &'static str {
        "rent_by_dayofweek"
    }

    fn description(&self) -> &'static str {
        "Casual and registered rentals by day of week"
    }

    #[allow(clippy::cast_precision_loss)]
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>, data: &WeekdaySummary, config: &GraphConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: std::error::Error + Send + Sync + 'static,
    {
        let style = &config.style;
        let max_total = data.rows.iter().map(WeekdayRent::total).max().unwrap_or(0);
        let y_max = GraphUtils::y_upper_bound(max_total as f64);
        let x_end = GraphUtils::category_axis_end(data.len());

        let title_font = (style.title_font.family.as_str(), style.title_font.size);
        let label_font = (style.label_font.family.as_str(), style.label_font.size);
        let (plot_area, legend_strip) = GraphUtils::split_legend_strip(root, style.margins.legend);
        let mut chart = ChartBuilder::on(&plot_area)
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
        mesh.x_desc(config.x_label.as_deref().unwrap_or("Hari"))
            .y_desc(config.y_label.as_deref().unwrap_or("Jumlah Sewa"))
            .x_labels(x_end + 1)
            .x_label_formatter(&x_formatter)
            .y_label_formatter(&y_formatter)
            .label_style(label_font)
            .disable_x_mesh();
        if !style.show_grid {
            mesh.disable_y_mesh();
        }
        mesh.draw()?;

        let colors = self.series_colors(config);
        let casual_color = colors.first().copied().unwrap_or(BLUE);
        let registered_color = colors.get(1).copied().unwrap_or(casual_color);

        let bar = |index: usize, bottom: u64, top: u64, color: RGBColor| {
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(index), bottom as f64),
                    (SegmentValue::Exact(index + 1), top as f64),
                ],
                color.filled(),
            );
            rect.set_margin(0, 0, BAR_MARGIN, BAR_MARGIN);
            rect
        };

        chart.draw_series(
            data.rows
                .iter()
                .enumerate()
                .map(|(i, row)| bar(i, 0, row.casual, casual_color)),
        )?;
        chart.draw_series(
            data.rows
                .iter()
                .enumerate()
                .map(|(i, row)| bar(i, row.casual, row.total(), registered_color)),
        )?;

        GraphUtils::draw_legend(
            &legend_strip,
            &[("Casual", casual_color), ("Registered", registered_color)],
            LegendMark::Swatch,
            label_font,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::utils::tests::text_y;
    use proptest::prelude::*;

    fn obs(weekday: u8, casual: u64, registered: u64) -> Observation {
        Observation {
            date: NaiveDate::from_ymd_opt(2011, 1, 3).unwrap(),
            hour: 0,
            weekday,
            month: 1,
            casual,
            registered,
            count: casual + registered,
        }
    }

    #[test]
    fn test_two_mondays_merge() {
        let summary = WeekdayAggregator.aggregate(&[obs(0, 10, 5), obs(0, 2, 3)]);

        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get("Senin"), Some((12, 8)));
        assert_eq!(summary.rows[0].total(), 20);
    }

    #[test]
    fn test_absent_weekdays_are_omitted_and_order_is_by_code() {
        let summary = WeekdayAggregator.aggregate(&[obs(6, 1, 1), obs(2, 4, 4), obs(4, 3, 3), obs(2, 1, 0)]);

        let names: Vec<&str> = summary.rows.iter().map(|row| row.name).collect();
        assert_eq!(names, vec!["Rabu", "Jumat", "Minggu"]);
        assert_eq!(summary.get("Rabu"), Some((5, 4)));
        assert_eq!(summary.get("Senin"), None);
    }

    #[test]
    fn test_unknown_weekday_code_is_skipped() {
        let summary = WeekdayAggregator.aggregate(&[obs(9, 100, 100), obs(1, 1, 2)]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get("Selasa"), Some((1, 2)));
    }

    #[test]
    fn test_empty_input() {
        let summary = WeekdayAggregator.aggregate(&[]);
        assert!(summary.is_empty());
        assert_eq!(summary.totals(), (0, 0));
    }

    #[test]
    fn test_day_names() {
        assert_eq!(day_name(0), Some("Senin"));
        assert_eq!(day_name(5), Some("Sabtu"));
        assert_eq!(day_name(6), Some("Minggu"));
        assert_eq!(day_name(7), None);
    }

    #[test]
    fn test_with_config() {
        let (graph, config) = RentByDayOfWeekGraph::with_config(&StyleConfig::default());
        assert_eq!(config.title, "Jumlah Sewa Berdasarkan Hari");
        assert_eq!(config.x_label.as_deref(), Some("Hari"));
        assert_eq!(config.y_label.as_deref(), Some("Jumlah Sewa"));
        assert_eq!(graph.name(), "rent_by_dayofweek");
    }

    #[test]
    fn test_render_contains_labels() {
        let summary = WeekdayAggregator.aggregate(&[obs(0, 10, 5), obs(3, 7, 9), obs(6, 2, 30)]);
        let (graph, config) = RentByDayOfWeekGraph::with_config(&StyleConfig::default());

        let svg = String::from_utf8(graph.render(&summary, &config).unwrap()).unwrap();
        assert!(svg.contains("Jumlah Sewa Berdasarkan Hari"));
        assert!(svg.contains("Senin"));
        assert!(svg.contains("Kamis"));
        assert!(svg.contains("Minggu"));
        assert!(svg.contains("Casual"));
        assert!(svg.contains("Registered"));
    }

    #[test]
    fn test_legend_is_drawn_below_the_plot() {
        let summary = WeekdayAggregator.aggregate(&[obs(0, 10, 5), obs(6, 2, 30)]);
        let (graph, config) = RentByDayOfWeekGraph::with_config(&StyleConfig::default());
        let svg = String::from_utf8(graph.render(&summary, &config).unwrap()).unwrap();

        let strip_top = (config.height - config.style.margins.legend) as i32;
        let day_label = text_y(&svg, "Senin").unwrap();
        assert!(day_label < strip_top);
        assert!(text_y(&svg, "Casual").unwrap() >= strip_top);
        assert!(text_y(&svg, "Registered").unwrap() >= strip_top);
    }

    #[test]
    fn test_render_empty_summary() {
        let (graph, config) = RentByDayOfWeekGraph::with_config(&StyleConfig::default());
        let svg = graph.render(&WeekdaySummary::default(), &config).unwrap();
        assert!(!svg.is_empty());
    }

    proptest! {
        #[test]
        fn test_totals_are_conserved(
            rows in prop::collection::vec((0u8..7, 0u64..1_000, 0u64..1_000), 0..200)
        ) {
            let input: Vec<Observation> = rows.iter().map(|&(w, c, r)| obs(w, c, r)).collect();
            let summary = WeekdayAggregator.aggregate(&input);

            let casual: u64 = input.iter().map(|o| o.casual).sum();
            let registered: u64 = input.iter().map(|o| o.registered).sum();
            prop_assert_eq!(summary.totals(), (casual, registered));
            prop_assert!(summary.rows.windows(2).all(|w| w[0].weekday < w[1].weekday));
        }
    }
}
