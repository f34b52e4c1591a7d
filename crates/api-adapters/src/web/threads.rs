//! crates/api-adapters/src/web/threads.rs
//!
//! Handlers for `/api/threads/{board}`.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use domains::{DeleteOutcome, ThreadId};
use serde::{Deserialize, Serialize};
use services::{
    project_board_summary, project_diagnostic, project_thread_detail, DiagnosticThread,
    ThreadDetail, ThreadSummary, DEFAULT_THREAD_LIMIT,
};

use super::error::ApiError;
use super::extract::{board_name, required, FormOrJson};
use super::state::AppState;
use crate::metrics::BoardAction;

pub const SUCCESS: &str = "success";
pub const INCORRECT_PASSWORD: &str = "incorrect password";
pub const REPORTED: &str = "reported";

/// Envelope for creation responses: `{ "message": ..., "thread": ... }`.
#[derive(Debug, Serialize)]
pub struct Created<T> {
    pub message: &'static str,
    pub thread: T,
}

#[derive(Debug, Deserialize)]
pub struct CreateThreadForm {
    pub text: Option<String>,
    pub delete_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteThreadForm {
    pub thread_id: Option<String>,
    pub delete_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportThreadForm {
    pub thread_id: Option<String>,
}

/// Plain-text answer for a password-protected delete.
pub fn delete_response(state: &AppState, outcome: DeleteOutcome, deleted: BoardAction) -> Response {
    match outcome {
        DeleteOutcome::Deleted => {
            state.metrics.record(deleted);
            SUCCESS.into_response()
        }
        DeleteOutcome::WrongPassword => {
            state.metrics.record(BoardAction::PasswordRejected);
            INCORRECT_PASSWORD.into_response()
        }
    }
}

/// `GET /api/threads/{board}`: the ten most recently bumped threads, each with
/// its last three replies.
pub async fn list_threads(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> Result<Json<Vec<ThreadSummary>>, ApiError> {
    let board = board_name(&board)?;
    let threads = state
        .threads
        .list_recent_threads(board, DEFAULT_THREAD_LIMIT)
        .await?;
    Ok(Json(project_board_summary(&threads)))
}

/// `GET /api/threads`: every stored thread, for operators.
pub async fn list_all_threads(
    State(state): State<AppState>,
) -> Result<Json<Vec<DiagnosticThread>>, ApiError> {
    let threads = state.threads.list_all_threads().await?;
    Ok(Json(threads.iter().map(project_diagnostic).collect()))
}

/// `POST /api/threads/{board}`
pub async fn create_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    FormOrJson(form): FormOrJson<CreateThreadForm>,
) -> Result<Json<Created<ThreadDetail>>, ApiError> {
    let board = board_name(&board)?;
    let text = required(form.text, "text")?;
    let delete_password = required(form.delete_password, "delete_password")?;

    let thread = state
        .threads
        .create_thread(board, &text, &delete_password)
        .await?;
    state.metrics.record(BoardAction::ThreadCreated);

    Ok(Json(Created {
        message: "thread created",
        thread: project_thread_detail(&thread),
    }))
}

/// `PUT /api/threads/{board}`
pub async fn report_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    FormOrJson(form): FormOrJson<ReportThreadForm>,
) -> Result<&'static str, ApiError> {
    board_name(&board)?;
    let thread_id = ThreadId::parse(&required(form.thread_id, "thread_id")?)?;

    state.threads.report_thread(thread_id).await?;
    state.metrics.record(BoardAction::ThreadReported);
    Ok(REPORTED)
}

/// `DELETE /api/threads/{board}`
pub async fn delete_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    FormOrJson(form): FormOrJson<DeleteThreadForm>,
) -> Result<Response, ApiError> {
    let board = board_name(&board)?;
    let thread_id = required(form.thread_id, "thread_id")?;
    let delete_password = required(form.delete_password, "delete_password")?;
    let thread_id = ThreadId::parse(&thread_id)?;

    let outcome = state
        .threads
        .delete_thread(thread_id, board, &delete_password)
        .await?;
    Ok(delete_response(&state, outcome, BoardAction::ThreadDeleted))
}
