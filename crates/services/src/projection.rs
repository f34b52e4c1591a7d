//! # Board Projection
//!
//! Pure transformations applied to threads before they leave the system.
//! None of the view types carry a `delete_password` field, so no projection
//! can leak one.

use chrono::{DateTime, Utc};
use domains::{Reply, ReplyId, Thread, ThreadId};
use serde::Serialize;

/// Replies shown per thread on a board listing.
pub const REPLY_PREVIEW_LEN: usize = 3;

/// A reply as clients see it: no password, no moderation flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyView {
    #[serde(rename = "_id")]
    pub id: ReplyId,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl From<&Reply> for ReplyView {
    fn from(reply: &Reply) -> Self {
        Self {
            id: reply.id,
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// One entry of a board listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadSummary {
    #[serde(rename = "_id")]
    pub id: ThreadId,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
}

/// A full thread with every reply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadDetail {
    #[serde(rename = "_id")]
    pub id: ThreadId,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub replies: Vec<ReplyView>,
}

/// Operational view used by the unfiltered listing: everything stored except
/// the passwords.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticThread {
    #[serde(rename = "_id")]
    pub id: ThreadId,
    pub board: String,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    pub reported: bool,
    pub replies: Vec<DiagnosticReply>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReply {
    #[serde(rename = "_id")]
    pub id: ReplyId,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub reported: bool,
}

/// The last `n` replies in insertion order, or all of them if fewer.
fn last_n(replies: &[Reply], n: usize) -> &[Reply] {
    &replies[replies.len().saturating_sub(n)..]
}

pub fn project_board_summary(threads: &[Thread]) -> Vec<ThreadSummary> {
    threads
        .iter()
        .map(|thread| ThreadSummary {
            id: thread.id,
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            replies: last_n(&thread.replies, REPLY_PREVIEW_LEN)
                .iter()
                .map(ReplyView::from)
                .collect(),
        })
        .collect()
}

pub fn project_thread_detail(thread: &Thread) -> ThreadDetail {
    ThreadDetail {
        id: thread.id,
        board: thread.board.clone(),
        text: thread.text.clone(),
        created_on: thread.created_on,
        bumped_on: thread.bumped_on,
        replies: thread.replies.iter().map(ReplyView::from).collect(),
    }
}

pub fn project_diagnostic(thread: &Thread) -> DiagnosticThread {
    DiagnosticThread {
        id: thread.id,
        board: thread.board.clone(),
        text: thread.text.clone(),
        created_on: thread.created_on,
        bumped_on: thread.bumped_on,
        reported: thread.reported,
        replies: thread
            .replies
            .iter()
            .map(|r| DiagnosticReply {
                id: r.id,
                text: r.text.clone(),
                created_on: r.created_on,
                reported: r.reported,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn thread_with_replies(n: usize) -> Thread {
        let start = Utc::now();
        let mut thread = Thread::new("test", "op", "secret", start).unwrap();
        for i in 0..n {
            let at = start + Duration::seconds(i as i64 + 1);
            thread.push_reply(Reply::new(&format!("reply {i}"), "rsecret", at).unwrap());
        }
        thread
    }

    #[test]
    fn summary_keeps_only_last_three_replies_in_order() {
        let thread = thread_with_replies(5);
        let summary = project_board_summary(std::slice::from_ref(&thread));

        let texts: Vec<_> = summary[0].replies.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, ["reply 2", "reply 3", "reply 4"]);
    }

    #[test]
    fn summary_with_few_replies_keeps_all() {
        for n in 0..=3 {
            let thread = thread_with_replies(n);
            let summary = project_board_summary(&[thread]);
            assert_eq!(summary[0].replies.len(), n);
        }
    }

    #[test]
    fn detail_is_not_capped() {
        let thread = thread_with_replies(7);
        let detail = project_thread_detail(&thread);
        assert_eq!(detail.replies.len(), 7);
        assert_eq!(detail.replies[0].text, "reply 0");
    }

    #[test]
    fn summary_preserves_input_order() {
        let a = thread_with_replies(0);
        let b = thread_with_replies(1);
        let summary = project_board_summary(&[b.clone(), a.clone()]);
        assert_eq!(summary[0].id, b.id);
        assert_eq!(summary[1].id, a.id);
    }

    #[test]
    fn no_projection_serializes_a_password() {
        let mut thread = thread_with_replies(4);
        thread.report();
        thread.replies[0].report();

        let payloads = [
            serde_json::to_string(&project_board_summary(&[thread.clone()])).unwrap(),
            serde_json::to_string(&project_thread_detail(&thread)).unwrap(),
            serde_json::to_string(&project_diagnostic(&thread)).unwrap(),
        ];
        for payload in payloads {
            assert!(!payload.contains("delete_password"), "{payload}");
            assert!(!payload.contains("secret"), "{payload}");
        }
    }

    #[test]
    fn standard_views_hide_reported_flag() {
        let mut thread = thread_with_replies(1);
        thread.replies[0].report();

        let detail = serde_json::to_value(project_thread_detail(&thread)).unwrap();
        assert!(detail.get("reported").is_none());
        assert!(detail["replies"][0].get("reported").is_none());
        assert_eq!(detail["_id"], thread.id.to_string());

        let diagnostic = serde_json::to_value(project_diagnostic(&thread)).unwrap();
        assert_eq!(diagnostic["replies"][0]["reported"], true);
    }
}
