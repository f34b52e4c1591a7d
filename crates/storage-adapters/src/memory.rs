//! # InMemoryThreadRepository
//!
//! Process-local `ThreadRepository` backed by a `DashMap`. Used by tests and
//! by `database.backend = "memory"` deployments. Nothing survives a restart.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use domains::{BoardError, Result, Thread, ThreadId, ThreadRepository};

struct Slot {
    /// Insertion sequence, the tie-breaker for equal bump times.
    seq: u64,
    thread: Thread,
}

#[derive(Default)]
pub struct InMemoryThreadRepository {
    threads: DashMap<ThreadId, Slot>,
    next_seq: AtomicU64,
}

impl InMemoryThreadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn by_bump_desc(mut matches: Vec<(u64, Thread)>) -> Vec<Thread> {
    matches.sort_by(|(a_seq, a), (b_seq, b)| b.bumped_on.cmp(&a.bumped_on).then(a_seq.cmp(b_seq)));
    matches.into_iter().map(|(_, thread)| thread).collect()
}

fn by_insertion(mut matches: Vec<(u64, Thread)>) -> Vec<Thread> {
    matches.sort_by_key(|(seq, _)| *seq);
    matches.into_iter().map(|(_, thread)| thread).collect()
}

#[async_trait]
impl ThreadRepository for InMemoryThreadRepository {
    async fn insert(&self, thread: &Thread) -> Result<()> {
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        self.threads.insert(
            thread.id,
            Slot {
                seq,
                thread: thread.clone(),
            },
        );
        Ok(())
    }

    async fn save(&self, thread: &Thread) -> Result<()> {
        match self.threads.get_mut(&thread.id) {
            Some(mut slot) => {
                slot.thread = thread.clone();
                Ok(())
            }
            None => Err(BoardError::thread_not_found(thread.id)),
        }
    }

    async fn find_by_id(&self, id: ThreadId) -> Result<Option<Thread>> {
        Ok(self.threads.get(&id).map(|slot| slot.thread.clone()))
    }

    async fn find_in_board(&self, id: ThreadId, board: &str) -> Result<Option<Thread>> {
        Ok(self
            .threads
            .get(&id)
            .filter(|slot| slot.thread.board == board)
            .map(|slot| slot.thread.clone()))
    }

    async fn list_by_board(&self, board: &str, limit: usize) -> Result<Vec<Thread>> {
        let matches = self
            .threads
            .iter()
            .filter(|slot| slot.thread.board == board)
            .map(|slot| (slot.seq, slot.thread.clone()))
            .collect();

        let mut threads = by_bump_desc(matches);
        threads.truncate(limit);
        Ok(threads)
    }

    async fn list_all(&self) -> Result<Vec<Thread>> {
        let all = self
            .threads
            .iter()
            .map(|slot| (slot.seq, slot.thread.clone()))
            .collect();
        Ok(by_insertion(all))
    }

    async fn delete(&self, id: ThreadId) -> Result<bool> {
        Ok(self.threads.remove(&id).is_some())
    }
}
