//! Shared fixtures for the cross-crate test suites.

use chrono::{DateTime, Duration, TimeZone, Utc};
use domains::{Reply, Thread};

/// A fixed instant so ordering assertions never depend on the wall clock.
pub fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
}

pub fn at(minutes: i64) -> DateTime<Utc> {
    epoch() + Duration::minutes(minutes)
}

/// A thread on `board` created `minutes` after [`epoch`], password `"pw"`.
pub fn thread_at(board: &str, text: &str, minutes: i64) -> Thread {
    Thread::new(board, text, "pw", at(minutes)).unwrap()
}

/// Appends a reply stamped `minutes` after [`epoch`], password `"rpw"`.
pub fn reply_at(thread: &mut Thread, text: &str, minutes: i64) {
    thread.push_reply(Reply::new(text, "rpw", at(minutes)).unwrap());
}
