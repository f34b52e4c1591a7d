//! crates/api-adapters/src/web/extract.rs
//!
//! Request extraction helpers shared by the handlers.

use axum::extract::{Form, FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::Json;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Accepts a body as either `application/json` or
/// `application/x-www-form-urlencoded`, chosen by `Content-Type`.
pub struct FormOrJson<T>(pub T);

impl<T, S> FromRequest<S> for FormOrJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if is_json {
            let Json(body) = Json::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            Ok(Self(body))
        } else {
            let Form(body) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
            Ok(Self(body))
        }
    }
}

/// A present, non-blank field value.
pub fn required(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::missing_field(field)),
    }
}

/// Board names arrive as a path segment; surrounding whitespace is dropped.
pub fn board_name(raw: &str) -> Result<&str, ApiError> {
    let board = raw.trim();
    if board.is_empty() {
        return Err(ApiError::missing_field("board"));
    }
    Ok(board)
}
