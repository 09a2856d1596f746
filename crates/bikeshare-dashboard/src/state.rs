//! Application state for the HTTP server.

use bikeshare_graphs::{GraphManager, ObservationTable, StyleConfig};
use std::sync::Arc;

/// Shared application state passed to all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Read-only table plus chart styling
    pub manager: Arc<GraphManager>,
}

impl AppState {
    /// Create a new application state over a loaded table.
    pub fn new(table: ObservationTable, style: StyleConfig) -> Self {
        Self {
            manager: Arc::new(GraphManager::new(Arc::new(table), style)),
        }
    }
}
