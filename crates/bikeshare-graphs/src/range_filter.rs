//! Inclusive date-range selection over observations.

use crate::observation::{DateRange, Observation, ObservationTable};

/// Rows of `rows` whose date falls within `range`, in input order.
///
/// Works on any slice; an inverted range yields an empty result.
pub fn filter_by_range(rows: &[Observation], range: &DateRange) -> Vec<Observation> {
    rows.iter().filter(|row| range.contains(row.date)).copied().collect()
}

impl ObservationTable {
    /// Borrows the contiguous run of rows within `range`.
    ///
    /// Relies on the table being date-sorted, so this is a pair of binary
    /// searches instead of a scan.
    pub fn select(&self, range: &DateRange) -> &[Observation] {
        if range.is_inverted() {
            return &[];
        }
        let rows = self.rows();
        let lower = rows.partition_point(|row| row.date < range.start);
        let upper = rows.partition_point(|row| row.date <= range.end);
        &rows[lower..upper.max(lower)]
    }
}
