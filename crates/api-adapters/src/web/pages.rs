//! crates/api-adapters/src/web/pages.rs
//!
//! HTML front end: `/`, `/b/{board}/` and `/b/{board}/{thread_id}`.

use askama::Template;
use axum::extract::{Path, State};
use axum::response::Html;
use domains::{BoardError, ThreadId};
use services::{project_board_summary, project_thread_detail, DEFAULT_THREAD_LIMIT};

use super::error::ApiError;
use super::extract::board_name;
use super::state::AppState;
use crate::views::{BoardPage, IndexPage, ThreadPage};

pub async fn index() -> Result<Html<String>, ApiError> {
    Ok(Html(IndexPage.render()?))
}

pub async fn board(
    State(state): State<AppState>,
    Path(board): Path<String>,
) -> Result<Html<String>, ApiError> {
    let board = board_name(&board)?;
    let threads = state
        .threads
        .list_recent_threads(board, DEFAULT_THREAD_LIMIT)
        .await?;
    let summaries = project_board_summary(&threads);

    let page = BoardPage {
        board,
        threads: &summaries,
    };
    Ok(Html(page.render()?))
}

pub async fn thread(
    State(state): State<AppState>,
    Path((board, thread_id)): Path<(String, String)>,
) -> Result<Html<String>, ApiError> {
    let board = board_name(&board)?;
    let thread_id = ThreadId::parse(&thread_id)?;
    let thread = state.threads.get_thread(thread_id).await?;
    if thread.board != board {
        return Err(BoardError::thread_not_found(thread_id).into());
    }
    let detail = project_thread_detail(&thread);

    let page = ThreadPage {
        board,
        thread: &detail,
    };
    Ok(Html(page.render()?))
}
