//! Router configuration for the dashboard.

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Create the application router with all routes and request tracing.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/charts/{file}", get(handlers::chart))
        .route("/api/summary", get(handlers::summary))
        .route("/health", get(handlers::health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_graphs::{ObservationTable, StyleConfig};

    #[test]
    fn test_router_creation() {
        let state = AppState::new(ObservationTable::default(), StyleConfig::default());
        let _router = create_router(state);
    }
}
