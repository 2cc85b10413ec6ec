// src/server/error.rs
//! RFC 7807 problem responses
//!
//! Catalog errors map onto HTTP statuses here and nowhere else.

use crate::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Problem details body (`application/problem+json`)
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    /// Error type URI
    #[serde(rename = "type")]
    pub error_type: String,
    /// Human-readable title
    pub title: String,
    /// HTTP status code
    pub status: u16,
    /// Detailed description
    pub detail: String,
    /// Additional error-specific data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl Problem {
    pub fn new(error_type: &str, title: &str, status: u16, detail: &str) -> Self {
        Self {
            error_type: format!("urn:recipebox:error:{}", error_type),
            title: title.to_string(),
            status,
            detail: detail.to_string(),
            extensions: None,
        }
    }

    pub fn not_found(detail: &str) -> Self {
        Self::new("not_found", "Not Found", 404, detail)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            "unauthorized",
            "Unauthorized",
            401,
            "You must be signed in to do that",
        )
    }

    pub fn forbidden(detail: &str) -> Self {
        Self::new("forbidden", "Forbidden", 403, detail)
    }

    pub fn internal(detail: &str) -> Self {
        Self::new("internal", "Internal Error", 500, detail)
    }
}

/// Error response wrapper for RFC 7807 format
#[derive(Debug)]
pub struct ApiError(pub Problem);

impl From<Problem> for ApiError {
    fn from(problem: Problem) -> Self {
        ApiError(problem)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let problem = match err {
            Error::NotFound(_) => Problem::not_found(&err.to_string()),
            Error::Unauthenticated => Problem::unauthorized(),
            Error::PermissionDenied(ref detail) => Problem::forbidden(detail),
            Error::Validation(errors) => {
                let mut problem = Problem::new(
                    "validation",
                    "Unprocessable Entity",
                    422,
                    &errors.to_string(),
                );
                problem.extensions = Some(serde_json::json!({ "errors": errors }));
                problem
            }
            other => {
                tracing::error!("Request failed: {}", other);
                Problem::internal("An internal error occurred")
            }
        };
        ApiError(problem)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [("content-type", "application/problem+json")],
            Json(self.0),
        )
            .into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
