//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bikeshare_common::DashboardError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// JSON body returned for failed requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Offending field or underlying cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates an error body without details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attaches details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Error type returned by the HTTP handlers.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Unknown resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed query parameter
    #[error("Bad request: {message}")]
    BadRequest {
        /// Human readable description
        message: String,
        /// Offending parameter
        field: Option<String>,
    },

    /// Pipeline or rendering failure
    #[error("Internal error: {0}")]
    Internal(#[source] DashboardError),
}

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        match err {
            DashboardError::Validation { message, field } => Self::BadRequest { message, field },
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::NotFound(what) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", what)),
            Self::BadRequest { message, field } => {
                let body = ApiError::new("BAD_REQUEST", message);
                let body = match field {
                    Some(field) => body.with_details(field),
                    None => body,
                };
                (StatusCode::BAD_REQUEST, body)
            }
            Self::Internal(err) => {
                error!(error = %err, "Request failed");
                let body = ApiError::new("INTERNAL_ERROR", err.to_string());
                let body = match std::error::Error::source(&err) {
                    Some(cause) => body.with_details(cause.to_string()),
                    None => body,
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = AppError::from(DashboardError::validation_field("Invalid date", "start"));
        assert!(matches!(
            &err,
            AppError::BadRequest { field: Some(field), .. } if field == "start"
        ));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_other_errors_map_to_internal() {
        let err = AppError::from(DashboardError::graph("boom"));
        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let response = AppError::NotFound("pie.svg".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_api_error_skips_empty_details() {
        let json = serde_json::to_value(ApiError::new("BAD_REQUEST", "nope")).unwrap();
        assert!(json.get("details").is_none());

        let json = serde_json::to_value(ApiError::new("BAD_REQUEST", "nope").with_details("end")).unwrap();
        assert_eq!(json["details"], "end");
    }
}
