//! # Core Traits (Ports)
//!
//! Any storage backend must implement these traits to be used by the binary.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{Thread, ThreadId};

/// Document persistence contract for threads and their embedded replies.
///
/// Every write replaces or removes a whole thread document; there is no
/// field-level update. Concurrent writers to the same thread race and the
/// last `save` wins.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ThreadRepository: Send + Sync {
    /// Persists a brand-new thread.
    async fn insert(&self, thread: &Thread) -> Result<()>;

    /// Replaces the stored document of an existing thread.
    /// Fails with `NotFound` if the thread vanished since it was read.
    async fn save(&self, thread: &Thread) -> Result<()>;

    async fn find_by_id(&self, id: ThreadId) -> Result<Option<Thread>>;

    /// Lookup constrained to a board, used by authenticated deletes.
    async fn find_in_board(&self, id: ThreadId, board: &str) -> Result<Option<Thread>>;

    /// Up to `limit` threads of `board`, most recently bumped first.
    /// Ties keep insertion order.
    async fn list_by_board(&self, board: &str, limit: usize) -> Result<Vec<Thread>>;

    /// Every stored thread, in insertion order.
    async fn list_all(&self) -> Result<Vec<Thread>>;

    /// Removes a thread with all its replies. Returns whether a row existed.
    async fn delete(&self, id: ThreadId) -> Result<bool>;

    /// Releases backend resources. Called once on shutdown.
    async fn close(&self) {}
}
