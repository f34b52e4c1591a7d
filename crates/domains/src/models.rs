//! # Domain Models
//!
//! These structs represent the core entities of the message board.
//! A thread owns its replies; the pair is persisted as one document.
//! We use UUID v7 for time-ordered, globally unique identification.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BoardError, Result};

/// Text a reply carries after a successful delete.
pub const DELETED_TEXT: &str = "[deleted]";

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $not_found:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Parses a client-supplied identifier. A malformed value cannot name
            /// a stored record, so it is reported as not found.
            pub fn parse(raw: &str) -> Result<Self> {
                Uuid::parse_str(raw.trim())
                    .map(Self)
                    .map_err(|_| ($not_found)(raw))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

record_id!(
    /// Store-assigned identity of a thread.
    ThreadId,
    BoardError::thread_not_found
);
record_id!(
    /// Identity of a reply, unique within its thread.
    ReplyId,
    BoardError::reply_not_found
);

/// Outcome of a password-protected delete. A wrong password is a normal
/// result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    WrongPassword,
}

/// A top-level post on a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub id: ThreadId,
    /// The partition this thread lives in (e.g. "test", "general")
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    /// The timestamp used for sorting threads by activity
    pub bumped_on: DateTime<Utc>,
    pub delete_password: String,
    #[serde(default)]
    pub reported: bool,
    /// Insertion order is chronological order. Never shrinks.
    #[serde(default)]
    pub replies: Vec<Reply>,
}

impl Thread {
    pub fn new(board: &str, text: &str, delete_password: &str, now: DateTime<Utc>) -> Result<Self> {
        let board = required("board", board.trim())?;
        let text = required("text", text)?;
        let delete_password = required("delete_password", delete_password)?;

        Ok(Self {
            id: ThreadId::new(),
            board,
            text,
            created_on: now,
            bumped_on: now,
            delete_password,
            reported: false,
            replies: Vec::new(),
        })
    }

    /// Appends a reply and bumps the thread to the reply's timestamp.
    pub fn push_reply(&mut self, reply: Reply) {
        self.bumped_on = reply.created_on.max(self.created_on);
        self.replies.push(reply);
    }

    pub fn reply(&self, id: ReplyId) -> Option<&Reply> {
        self.replies.iter().find(|r| r.id == id)
    }

    pub fn reply_mut(&mut self, id: ReplyId) -> Option<&mut Reply> {
        self.replies.iter_mut().find(|r| r.id == id)
    }

    pub fn latest_reply(&self) -> Option<&Reply> {
        self.replies.last()
    }

    pub fn report(&mut self) {
        self.reported = true;
    }

    /// Verbatim comparison; passwords are stored as given.
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.delete_password == candidate
    }
}

/// A post nested inside a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reply {
    pub id: ReplyId,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub delete_password: String,
    #[serde(default)]
    pub reported: bool,
}

impl Reply {
    pub fn new(text: &str, delete_password: &str, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: ReplyId::new(),
            text: required("text", text)?,
            created_on: now,
            delete_password: required("delete_password", delete_password)?,
            reported: false,
        })
    }

    pub fn report(&mut self) {
        self.reported = true;
    }

    /// Soft delete: the record keeps its place and metadata.
    pub fn redact(&mut self) {
        self.text = DELETED_TEXT.to_string();
    }

    pub fn is_deleted(&self) -> bool {
        self.text == DELETED_TEXT
    }

    pub fn password_matches(&self, candidate: &str) -> bool {
        self.delete_password == candidate
    }
}

fn required(field: &str, value: &str) -> Result<String> {
    if value.trim().is_empty() {
        return Err(BoardError::Validation(format!("{field} is required")));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn thread() -> Thread {
        Thread::new("test", "hello", "pw", Utc::now()).unwrap()
    }

    #[test]
    fn new_thread_starts_unbumped_and_empty() {
        let now = Utc::now();
        let t = Thread::new("  test ", "hello", "pw", now).unwrap();
        assert_eq!(t.board, "test");
        assert_eq!(t.created_on, now);
        assert_eq!(t.bumped_on, now);
        assert!(t.replies.is_empty());
        assert!(!t.reported);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let now = Utc::now();
        assert!(matches!(Thread::new("", "x", "pw", now), Err(BoardError::Validation(_))));
        assert!(matches!(Thread::new("b", "  ", "pw", now), Err(BoardError::Validation(_))));
        assert!(matches!(Thread::new("b", "x", "", now), Err(BoardError::Validation(_))));
        assert!(matches!(Reply::new("", "pw", now), Err(BoardError::Validation(_))));
        assert!(matches!(Reply::new("x", "", now), Err(BoardError::Validation(_))));
    }

    #[test]
    fn push_reply_bumps_thread() {
        let mut t = thread();
        let later = t.created_on + Duration::seconds(5);
        let reply = Reply::new("first", "rpw", later).unwrap();
        let reply_id = reply.id;

        t.push_reply(reply);

        assert_eq!(t.bumped_on, later);
        assert_eq!(t.latest_reply().map(|r| r.id), Some(reply_id));
    }

    #[test]
    fn bump_never_precedes_creation() {
        let mut t = thread();
        let earlier = t.created_on - Duration::seconds(30);
        t.push_reply(Reply::new("skewed", "rpw", earlier).unwrap());
        assert!(t.bumped_on >= t.created_on);
    }

    #[test]
    fn redact_keeps_identity_and_flags() {
        let mut reply = Reply::new("body", "rpw", Utc::now()).unwrap();
        reply.report();
        let (id, created_on) = (reply.id, reply.created_on);

        reply.redact();

        assert_eq!(reply.text, DELETED_TEXT);
        assert!(reply.is_deleted());
        assert!(reply.reported);
        assert_eq!(reply.id, id);
        assert_eq!(reply.created_on, created_on);
    }

    #[test]
    fn password_compare_is_verbatim() {
        let t = thread();
        assert!(t.password_matches("pw"));
        assert!(!t.password_matches("PW"));
        assert!(!t.password_matches(" pw"));
    }

    #[test]
    fn malformed_ids_are_not_found() {
        assert!(matches!(
            ThreadId::parse("not-a-uuid"),
            Err(BoardError::NotFound(crate::errors::Entity::Thread, _))
        ));
        assert!(matches!(
            ReplyId::parse("123"),
            Err(BoardError::NotFound(crate::errors::Entity::Reply, _))
        ));
        let id = ThreadId::new();
        assert_eq!(ThreadId::parse(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn stored_documents_without_flags_default_to_unreported() {
        let t = thread();
        let mut doc = serde_json::to_value(&t).unwrap();
        doc.as_object_mut().unwrap().remove("reported");
        let restored: Thread = serde_json::from_value(doc).unwrap();
        assert!(!restored.reported);
        assert_eq!(restored.id, t.id);
    }
}
