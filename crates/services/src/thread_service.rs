//! # ThreadService
//!
//! The thread/reply lifecycle on top of a [`ThreadRepository`].
//!
//! Every mutation is a read-modify-write of the whole thread document:
//! fetch, apply the domain rule, save. Nothing here locks; two requests
//! touching the same thread race and the last save wins.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    BoardError, DeleteOutcome, Reply, ReplyId, Result, Thread, ThreadId, ThreadRepository,
};
use tracing::{info, warn};

/// Number of threads a board listing returns.
pub const DEFAULT_THREAD_LIMIT: usize = 10;

#[derive(Clone)]
pub struct ThreadService {
    repo: Arc<dyn ThreadRepository>,
}

impl ThreadService {
    pub fn new(repo: Arc<dyn ThreadRepository>) -> Self {
        Self { repo }
    }

    pub async fn create_thread(&self, board: &str, text: &str, delete_password: &str) -> Result<Thread> {
        let thread = Thread::new(board, text, delete_password, Utc::now())?;
        self.repo.insert(&thread).await?;
        info!(board = %thread.board, thread_id = %thread.id, "thread created");
        Ok(thread)
    }

    pub async fn list_recent_threads(&self, board: &str, limit: usize) -> Result<Vec<Thread>> {
        self.repo.list_by_board(board.trim(), limit).await
    }

    /// Diagnostic listing with no board filter.
    pub async fn list_all_threads(&self) -> Result<Vec<Thread>> {
        self.repo.list_all().await
    }

    pub async fn get_thread(&self, id: ThreadId) -> Result<Thread> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| BoardError::thread_not_found(id))
    }

    /// Appends a reply and bumps the thread. Returns the saved thread; the new
    /// reply is its last element.
    pub async fn append_reply(&self, thread_id: ThreadId, text: &str, delete_password: &str) -> Result<Thread> {
        let mut thread = self.get_thread(thread_id).await?;
        let reply = Reply::new(text, delete_password, Utc::now())?;
        let reply_id = reply.id;

        thread.push_reply(reply);
        self.repo.save(&thread).await?;

        info!(board = %thread.board, %thread_id, %reply_id, "reply appended");
        Ok(thread)
    }

    pub async fn report_thread(&self, thread_id: ThreadId) -> Result<Thread> {
        let mut thread = self.get_thread(thread_id).await?;
        if !thread.reported {
            thread.report();
            self.repo.save(&thread).await?;
        }
        info!(%thread_id, "thread reported");
        Ok(thread)
    }

    pub async fn report_reply(&self, thread_id: ThreadId, reply_id: ReplyId) -> Result<Thread> {
        let mut thread = self.get_thread(thread_id).await?;
        let reply = thread
            .reply_mut(reply_id)
            .ok_or_else(|| BoardError::reply_not_found(reply_id))?;

        if !reply.reported {
            reply.report();
            self.repo.save(&thread).await?;
        }
        info!(%thread_id, %reply_id, "reply reported");
        Ok(thread)
    }

    /// Hard delete. The thread must belong to `board`.
    pub async fn delete_thread(&self, thread_id: ThreadId, board: &str, delete_password: &str) -> Result<DeleteOutcome> {
        let board = board.trim();
        let thread = self
            .repo
            .find_in_board(thread_id, board)
            .await?
            .ok_or_else(|| BoardError::thread_not_found(thread_id))?;

        if !thread.password_matches(delete_password) {
            warn!(board, %thread_id, "thread delete rejected: incorrect password");
            return Ok(DeleteOutcome::WrongPassword);
        }

        if !self.repo.delete(thread_id).await? {
            return Err(BoardError::thread_not_found(thread_id));
        }
        info!(board, %thread_id, replies = thread.replies.len(), "thread deleted");
        Ok(DeleteOutcome::Deleted)
    }

    /// Soft delete: the reply stays in place with its text replaced.
    pub async fn delete_reply(&self, thread_id: ThreadId, reply_id: ReplyId, delete_password: &str) -> Result<DeleteOutcome> {
        let mut thread = self.get_thread(thread_id).await?;
        let reply = thread
            .reply_mut(reply_id)
            .ok_or_else(|| BoardError::reply_not_found(reply_id))?;

        if !reply.password_matches(delete_password) {
            warn!(%thread_id, %reply_id, "reply delete rejected: incorrect password");
            return Ok(DeleteOutcome::WrongPassword);
        }

        reply.redact();
        self.repo.save(&thread).await?;
        info!(%thread_id, %reply_id, "reply deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
