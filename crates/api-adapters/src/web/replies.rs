//! crates/api-adapters/src/web/replies.rs
//!
//! Handlers for `/api/replies/{board}`.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;
use domains::{BoardError, ReplyId, ThreadId};
use serde::Deserialize;
use services::{project_thread_detail, ReplyView, ThreadDetail};

use super::error::ApiError;
use super::extract::{board_name, required, FormOrJson};
use super::state::AppState;
use super::threads::{delete_response, Created, REPORTED};
use crate::metrics::BoardAction;

#[derive(Debug, Deserialize)]
pub struct ThreadQuery {
    pub thread_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateReplyForm {
    pub thread_id: Option<String>,
    pub text: Option<String>,
    pub delete_password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReportReplyForm {
    pub thread_id: Option<String>,
    pub reply_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteReplyForm {
    pub thread_id: Option<String>,
    pub reply_id: Option<String>,
    pub delete_password: Option<String>,
}

/// `GET /api/replies/{board}?thread_id=`: the whole thread with every reply.
pub async fn get_thread(
    State(state): State<AppState>,
    Path(board): Path<String>,
    Query(query): Query<ThreadQuery>,
) -> Result<Json<ThreadDetail>, ApiError> {
    board_name(&board)?;
    let thread_id = ThreadId::parse(&required(query.thread_id, "thread_id")?)?;

    let thread = state.threads.get_thread(thread_id).await?;
    Ok(Json(project_thread_detail(&thread)))
}

/// `POST /api/replies/{board}`
pub async fn create_reply(
    State(state): State<AppState>,
    Path(board): Path<String>,
    FormOrJson(form): FormOrJson<CreateReplyForm>,
) -> Result<Json<Created<ReplyView>>, ApiError> {
    board_name(&board)?;
    let thread_id = required(form.thread_id, "thread_id")?;
    let text = required(form.text, "text")?;
    let delete_password = required(form.delete_password, "delete_password")?;
    let thread_id = ThreadId::parse(&thread_id)?;

    let thread = state
        .threads
        .append_reply(thread_id, &text, &delete_password)
        .await?;
    let reply = thread
        .latest_reply()
        .ok_or_else(|| BoardError::storage("saved thread has no replies"))?;
    state.metrics.record(BoardAction::ReplyCreated);

    Ok(Json(Created {
        message: "reply created",
        thread: ReplyView::from(reply),
    }))
}

/// `PUT /api/replies/{board}`
pub async fn report_reply(
    State(state): State<AppState>,
    Path(board): Path<String>,
    FormOrJson(form): FormOrJson<ReportReplyForm>,
) -> Result<&'static str, ApiError> {
    board_name(&board)?;
    let thread_id = required(form.thread_id, "thread_id")?;
    let reply_id = required(form.reply_id, "reply_id")?;
    let thread_id = ThreadId::parse(&thread_id)?;
    let reply_id = ReplyId::parse(&reply_id)?;

    state.threads.report_reply(thread_id, reply_id).await?;
    state.metrics.record(BoardAction::ReplyReported);
    Ok(REPORTED)
}

/// `DELETE /api/replies/{board}`
pub async fn delete_reply(
    State(state): State<AppState>,
    Path(board): Path<String>,
    FormOrJson(form): FormOrJson<DeleteReplyForm>,
) -> Result<Response, ApiError> {
    board_name(&board)?;
    let thread_id = required(form.thread_id, "thread_id")?;
    let reply_id = required(form.reply_id, "reply_id")?;
    let delete_password = required(form.delete_password, "delete_password")?;
    let thread_id = ThreadId::parse(&thread_id)?;
    let reply_id = ReplyId::parse(&reply_id)?;

    let outcome = state
        .threads
        .delete_reply(thread_id, reply_id, &delete_password)
        .await?;
    Ok(delete_response(&state, outcome, BoardAction::ReplyDeleted))
}
