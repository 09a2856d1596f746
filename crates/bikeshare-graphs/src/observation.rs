//! Hourly observation records and the date range used to select them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One hour of one day of rentals.
///
/// Field names follow the columns of the hourly rental file; any other
/// column in the file is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date (`dteday`)
    #[serde(rename = "dteday")]
    pub date: NaiveDate,
    /// Hour of day, 0-23 (`hr`)
    #[serde(rename = "hr")]
    pub hour: u8,
    /// Day of week, 0-6 with Monday = 0
    pub weekday: u8,
    /// Month number, 1-12 (`mnth`)
    #[serde(rename = "mnth")]
    pub month: u8,
    /// Casual riders
    pub casual: u64,
    /// Registered riders
    pub registered: u64,
    /// Total riders (`cnt`)
    #[serde(rename = "cnt")]
    pub count: u64,
}

/// Inclusive calendar date range.
///
/// `start > end` is allowed and selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// First day, inclusive
    pub start: NaiveDate,
    /// Last day, inclusive
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range without reordering its bounds.
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whether `date` lies within the range, both ends included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Whether the range is inverted and can match no date.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// The loaded observation table, sorted ascending by date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservationTable {
    rows: Vec<Observation>,
}

impl ObservationTable {
    /// Builds a table, stably sorting rows by date so rows of one day keep file order.
    pub fn new(mut rows: Vec<Observation>) -> Self {
        rows.sort_by_key(|row| row.date);
        Self { rows }
    }

    /// All rows in date order.
    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First and last date present, or `None` for an empty table.
    pub fn date_span(&self) -> Option<DateRange> {
        let first = self.rows.first()?;
        let last = self.rows.last()?;
        Some(DateRange::new(first.date, last.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2011, 1, d).unwrap()
    }

    fn obs(date: NaiveDate, hour: u8) -> Observation {
        Observation {
            date,
            hour,
            weekday: 0,
            month: 1,
            casual: 1,
            registered: 1,
            count: 2,
        }
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let range = DateRange::new(day(2), day(4));
        assert!(!range.contains(day(1)));
        assert!(range.contains(day(2)));
        assert!(range.contains(day(4)));
        assert!(!range.contains(day(5)));
    }

    #[test]
    fn test_inverted_range_contains_nothing() {
        let range = DateRange::new(day(4), day(2));
        assert!(range.is_inverted());
        assert!((1..=5).all(|d| !range.contains(day(d))));
    }

    #[test]
    fn test_table_sorts_stably() {
        let table = ObservationTable::new(vec![obs(day(3), 5), obs(day(1), 9), obs(day(3), 1), obs(day(1), 2)]);
        let order: Vec<(u32, u8)> = table
            .rows()
            .iter()
            .map(|row| (chrono::Datelike::day(&row.date), row.hour))
            .collect();
        assert_eq!(order, vec![(1, 9), (1, 2), (3, 5), (3, 1)]);
    }

    #[test]
    fn test_date_span() {
        assert_eq!(ObservationTable::default().date_span(), None);

        let table = ObservationTable::new(vec![obs(day(9), 0), obs(day(2), 0), obs(day(5), 0)]);
        assert_eq!(table.date_span(), Some(DateRange::new(day(2), day(9))));
        assert_eq!(DateRange::new(day(2), day(9)).to_string(), "2011-01-02..=2011-01-09");
    }
}
