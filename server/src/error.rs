//! Errors surfaced by the HTTP handlers.
//!
//! Validation failures carry one `FieldError` per offending input and render
//! as 422 with a `detail` array, so clients can tell which query parameter or
//! body field was rejected. Unknown ids render as 404. Anything else is a
//! plain 500.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

pub const NOT_FOUND_DETAIL: &str = "Item not found";

/// A single rejected input.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    /// Where the input came from, e.g. `["query", "limit"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| s.to_string()).collect(),
            msg: msg.into(),
            kind: kind.to_string(),
        }
    }

    pub fn missing(loc: &[&str]) -> Self {
        Self::new(loc, "Field required", "missing")
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed ({} error(s))", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Item not found")]
    NotFound,

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({ "detail": errors }),
            ApiError::NotFound => json!({ "detail": NOT_FOUND_DETAIL }),
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "unhandled server fault");
                json!({ "detail": "Internal Server Error" })
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Validation(vec![FieldError::new(
            &["query"],
            rejection.body_text(),
            "query_error",
        )])
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(vec![FieldError::new(
            &["path", "item_id"],
            rejection.body_text(),
            "int_parsing",
        )])
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        ApiError::Internal(format!("template rendering failed: {err}"))
    }
}
