//! crates/api-adapters/src/web/error.rs
//!
//! Maps domain failures onto the HTTP contract.
//!
//! Validation failures are 400 with a JSON body, unknown records are 404 with
//! a plain-text sentinel (`thread not found` / `reply not found`), and
//! storage failures are a generic 500. A wrong delete password is not an
//! error at all; handlers answer it with 200.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{BoardError, Entity};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0} not found")]
    NotFound(Entity),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn missing_field(field: &str) -> Self {
        ApiError::BadRequest(format!("missing required field: {field}"))
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Validation(msg) => ApiError::BadRequest(msg),
            BoardError::NotFound(entity, _) => ApiError::NotFound(entity),
            BoardError::Storage(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(err: askama::Error) -> Self {
        ApiError::Internal(format!("template rendering failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::NotFound(entity) => {
                (StatusCode::NOT_FOUND, format!("{entity} not found")).into_response()
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal server error" })),
                )
                    .into_response()
            }
        }
    }
}
