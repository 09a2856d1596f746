//! HTTP handlers for the dashboard page, charts and JSON endpoints.
//!
//! Every handler reruns the whole pipeline for the requested range; nothing
//! is cached between requests.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use bikeshare_common::{format_iso_date, parse_iso_date};
use bikeshare_graphs::{ChartKind, DashboardSummary, DateRange};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::page::render_page;
use crate::state::AppState;

/// Result type for handlers.
pub type HandlerResult<T> = Result<T, AppError>;

/// `start` and `end` query parameters, ISO dates. Empty values count as missing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeQuery {
    /// First day, inclusive
    pub start: Option<String>,
    /// Last day, inclusive
    pub end: Option<String>,
}

impl RangeQuery {
    /// Resolves the requested range, defaulting each missing bound to the data span.
    ///
    /// An empty table has no span; missing bounds then widen to the full
    /// calendar so the selection is simply empty.
    pub fn resolve(&self, span: Option<DateRange>) -> Result<DateRange, AppError> {
        let start = match non_empty(self.start.as_deref()) {
            Some(value) => parse_iso_date(value, "start")?,
            None => span.map_or(NaiveDate::MIN, |span| span.start),
        };
        let end = match non_empty(self.end.as_deref()) {
            Some(value) => parse_iso_date(value, "end")?,
            None => span.map_or(NaiveDate::MAX, |span| span.end),
        };
        Ok(DateRange::new(start, end))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `ok`
    pub status: String,
    /// Observations loaded at startup
    pub rows: usize,
    /// First date in the data
    pub start: Option<String>,
    /// Last date in the data
    pub end: Option<String>,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let span = state.manager.default_range();
    Json(HealthResponse {
        status: "ok".to_string(),
        rows: state.manager.table().len(),
        start: span.map(|span| format_iso_date(span.start)),
        end: span.map(|span| format_iso_date(span.end)),
    })
}

/// GET /
///
/// The dashboard page with the picker set to the requested range.
pub async fn index(State(state): State<AppState>, Query(query): Query<RangeQuery>) -> HandlerResult<Html<String>> {
    let span = state.manager.default_range();
    let range = query.resolve(span)?;
    let observations = state.manager.table().select(&range).len();
    debug!(%range, observations, "Serving dashboard page");

    Ok(Html(render_page(&range, span.as_ref(), observations)))
}

/// GET /charts/{file}
///
/// One chart as SVG, where `file` is `weekday.svg`, `month.svg` or `hour.svg`.
pub async fn chart(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(query): Query<RangeQuery>,
) -> HandlerResult<impl IntoResponse> {
    let kind = file
        .strip_suffix(".svg")
        .and_then(|slug| slug.parse::<ChartKind>().ok())
        .ok_or_else(|| AppError::NotFound(format!("No chart named {file}")))?;
    let range = query.resolve(state.manager.default_range())?;

    let svg = state.manager.render_chart(kind, &range)?;
    Ok((
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    ))
}

/// GET /api/summary
///
/// The three summaries for the requested range.
pub async fn summary(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> HandlerResult<Json<DashboardSummary>> {
    let range = query.resolve(state.manager.default_range())?;
    Ok(Json(state.manager.summarize(&range)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2011, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2012, 12, 31).unwrap(),
        )
    }

    fn query(start: Option<&str>, end: Option<&str>) -> RangeQuery {
        RangeQuery {
            start: start.map(str::to_string),
            end: end.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_bounds_default_to_span() {
        assert_eq!(query(None, None).resolve(Some(span())).unwrap(), span());
        assert_eq!(query(Some(""), Some("  ")).resolve(Some(span())).unwrap(), span());
    }

    #[test]
    fn test_explicit_bounds() {
        let range = query(Some("2011-06-01"), None).resolve(Some(span())).unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2011, 6, 1).unwrap());
        assert_eq!(range.end, span().end);
    }

    #[test]
    fn test_inverted_bounds_are_accepted() {
        let range = query(Some("2012-01-01"), Some("2011-01-01"))
            .resolve(Some(span()))
            .unwrap();
        assert!(range.is_inverted());
    }

    #[test]
    fn test_malformed_bound_is_bad_request() {
        let err = query(Some("2011-13-01"), None).resolve(Some(span())).unwrap_err();
        assert!(matches!(err, AppError::BadRequest { field: Some(ref field), .. } if field == "start"));
    }

    #[test]
    fn test_empty_table_widens_missing_bounds() {
        let range = query(None, None).resolve(None).unwrap();
        assert_eq!((range.start, range.end), (NaiveDate::MIN, NaiveDate::MAX));
    }
}
