//! Loads the hourly rental CSV into an [`ObservationTable`].

use crate::observation::{Observation, ObservationTable};
use bikeshare_common::{DashboardError, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Reads the fixed-schema hourly rental file.
pub struct TableLoader;

impl TableLoader {
    /// Loads and date-sorts the file at `path`.
    ///
    /// Fails with a load error if the file is missing or any row cannot be
    /// coerced to the expected column types.
    #[instrument]
    pub fn load(path: impl AsRef<Path> + std::fmt::Debug) -> Result<ObservationTable> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            DashboardError::load_with_path(format!("Cannot open {}", path.display()), path, e)
        })?;

        let table = Self::from_reader(file).map_err(|e| match e {
            DashboardError::Load { message, source, .. } => DashboardError::Load {
                message: format!("{message} in {}", path.display()),
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;

        match table.date_span() {
            Some(span) => info!(rows = table.len(), %span, "Loaded observation table"),
            None => info!("Loaded empty observation table"),
        }
        Ok(table)
    }

    /// Parses CSV text with a header row from any reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<ObservationTable> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let rows = csv_reader
            .deserialize::<Observation>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;
        debug!(rows = rows.len(), "Parsed observation rows");

        Ok(ObservationTable::new(rows))
    }
}
