//! Graph manager running the filter, aggregate and render pipeline per request.

use crate::observation::{DateRange, ObservationTable};
use crate::rent_by_dayofweek::{RentByDayOfWeekGraph, WeekdayAggregator, WeekdaySummary};
use crate::rent_by_hourofday::{HourAggregator, HourPercentSummary, RentByHourOfDayGraph};
use crate::rent_by_month::{MonthAggregator, MonthSummary, RentByMonthGraph};
use crate::traits::{DataAggregator, GraphRenderer};
use crate::types::StyleConfig;
use bikeshare_common::{DashboardError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// The three dashboard charts, in page order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Stacked bars by day of week
    Weekday,
    /// Line by month
    Month,
    /// Weekday and weekend lines by hour
    Hour,
}

impl ChartKind {
    /// All charts in page order.
    pub const ALL: [Self; 3] = [Self::Weekday, Self::Month, Self::Hour];

    /// Chart caption.
    pub const fn title(self) -> &'static str {
        match self {
            Self::Weekday => RentByDayOfWeekGraph::TITLE,
            Self::Month => RentByMonthGraph::TITLE,
            Self::Hour => RentByHourOfDayGraph::TITLE,
        }
    }

    /// URL-safe identifier.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Weekday => "weekday",
            Self::Month => "month",
            Self::Hour => "hour",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ChartKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == s)
            .ok_or_else(|| DashboardError::validation_field(format!("Unknown chart: {s}"), "chart"))
    }
}

/// Every summary for one date range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Range the summaries were computed for
    pub range: DateRange,
    /// Number of observations in range
    pub observations: usize,
    /// Rentals by weekday
    pub weekday: WeekdaySummary,
    /// Rentals by month
    pub month: MonthSummary,
    /// Hourly shares per day group
    pub hour: HourPercentSummary,
}

/// Owns the loaded table and renders charts for any date range.
///
/// The table is shared read-only; each call filters and aggregates afresh.
#[derive(Debug, Clone)]
pub struct GraphManager {
    table: Arc<ObservationTable>,
    style: StyleConfig,
}

impl GraphManager {
    /// Creates a manager over a loaded table.
    pub fn new(table: Arc<ObservationTable>, style: StyleConfig) -> Self {
        Self { table, style }
    }

    /// The loaded table.
    pub fn table(&self) -> &ObservationTable {
        &self.table
    }

    /// Chart styling in use.
    pub const fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Full date span of the data, the default selection.
    pub fn default_range(&self) -> Option<DateRange> {
        self.table.date_span()
    }

    /// Aggregates all three summaries for `range`.
    #[instrument(skip(self, range), fields(range = %range))]
    pub fn summarize(&self, range: &DateRange) -> DashboardSummary {
        let rows = self.table.select(range);
        debug!(rows = rows.len(), "Selected observations");

        DashboardSummary {
            range: *range,
            observations: rows.len(),
            weekday: WeekdayAggregator.aggregate(rows),
            month: MonthAggregator.aggregate(rows),
            hour: HourAggregator.aggregate(rows),
        }
    }

    /// Renders one chart for `range` as SVG.
    #[instrument(skip(self, range), fields(range = %range))]
    pub fn render_chart(&self, kind: ChartKind, range: &DateRange) -> Result<Vec<u8>> {
        let rows = self.table.select(range);
        let rendered = match kind {
            ChartKind::Weekday => {
                let (graph, config) = RentByDayOfWeekGraph::with_config(&self.style);
                graph.render(&WeekdayAggregator.aggregate(rows), &config)
            }
            ChartKind::Month => {
                let (graph, config) = RentByMonthGraph::with_config(&self.style);
                graph.render(&MonthAggregator.aggregate(rows), &config)
            }
            ChartKind::Hour => {
                let (graph, config) = RentByHourOfDayGraph::with_config(&self.style);
                graph.render(&HourAggregator.aggregate(rows), &config)
            }
        };
        rendered.map_err(|e| DashboardError::graph_with_source(format!("Failed to render {kind} chart"), e))
    }

    /// Renders all three charts in page order.
    #[instrument(skip(self, range), fields(range = %range))]
    pub fn render_all(&self, range: &DateRange) -> Result<Vec<(ChartKind, Vec<u8>)>> {
        let charts = ChartKind::ALL
            .into_iter()
            .map(|kind| self.render_chart(kind, range).map(|svg| (kind, svg)))
            .collect::<Result<Vec<_>>>()?;
        info!(charts = charts.len(), "Rendered dashboard charts");
        Ok(charts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_loader::TableLoader;
    use bikeshare_common::test_utils::csv_fixtures::{sample_rows, to_csv};
    use chrono::NaiveDate;

    fn manager() -> GraphManager {
        let table = TableLoader::from_reader(to_csv(&sample_rows()).as_bytes()).unwrap();
        GraphManager::new(Arc::new(table), StyleConfig::default())
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, month, day).unwrap()
    }

    #[test]
    fn test_chart_kind_parsing() {
        assert_eq!("weekday".parse::<ChartKind>().unwrap(), ChartKind::Weekday);
        assert_eq!("hour".parse::<ChartKind>().unwrap(), ChartKind::Hour);
        let err = "pie".parse::<ChartKind>().unwrap_err();
        assert!(err.is_user_error());
        assert_eq!(ChartKind::Month.to_string(), "month");
        assert_eq!(ChartKind::Month.title(), "Jumlah Sewa Berdasarkan Bulan");
    }

    #[test]
    fn test_default_range_is_full_span() {
        let manager = manager();
        assert_eq!(manager.default_range(), Some(DateRange::new(date(1, 1), date(2, 1))));
    }

    #[test]
    fn test_summarize_full_span() {
        let manager = manager();
        let range = manager.default_range().unwrap();
        let summary = manager.summarize(&range);

        assert_eq!(summary.observations, 9);
        assert_eq!(summary.weekday.totals(), (48, 410));
        assert_eq!(summary.month.total(), 458);
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let manager = manager();
        let range = DateRange::new(date(1, 2), date(1, 10));

        let first = manager.summarize(&range);
        let other = manager.summarize(&DateRange::new(date(1, 1), date(1, 1)));
        let second = manager.summarize(&range);

        assert_ne!(first, other);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_range_summaries() {
        let manager = manager();
        let summary = manager.summarize(&DateRange::new(date(3, 1), date(2, 1)));

        assert_eq!(summary.observations, 0);
        assert!(summary.weekday.is_empty());
        assert!(summary.month.is_empty());
        assert!(summary.hour.is_empty());
    }

    #[test]
    fn test_render_all_in_page_order() {
        let manager = manager();
        let range = manager.default_range().unwrap();
        let charts = manager.render_all(&range).unwrap();

        let kinds: Vec<ChartKind> = charts.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(kinds, ChartKind::ALL.to_vec());
        for (kind, svg) in charts {
            let svg = String::from_utf8(svg).unwrap();
            assert!(svg.contains(kind.title()));
        }
    }

    #[test]
    fn test_render_empty_range() {
        let manager = manager();
        let range = DateRange::new(date(6, 1), date(6, 2));
        assert!(manager.render_chart(ChartKind::Weekday, &range).is_ok());
        assert!(manager.render_chart(ChartKind::Month, &range).is_ok());
        assert!(manager.render_chart(ChartKind::Hour, &range).is_ok());
    }
}
