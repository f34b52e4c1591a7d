//! crates/services/src/lib.rs
//!
//! Application services: the thread store operations and the projections
//! applied at the system boundary.

pub mod projection;
pub mod thread_service;

pub use projection::{
    project_board_summary, project_diagnostic, project_thread_detail, DiagnosticReply,
    DiagnosticThread, ReplyView, ThreadDetail, ThreadSummary, REPLY_PREVIEW_LEN,
};
pub use thread_service::{ThreadService, DEFAULT_THREAD_LIMIT};
