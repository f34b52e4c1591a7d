//! # HTML views
//!
//! Server-rendered pages for browsing boards without a client app. They use the
//! same projections as the JSON API, so they never see a password either.

use askama::Template;
use services::{ThreadDetail, ThreadSummary};

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage;

#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardPage<'a> {
    pub board: &'a str,
    pub threads: &'a [ThreadSummary],
}

#[derive(Template)]
#[template(path = "thread.html")]
pub struct ThreadPage<'a> {
    pub board: &'a str,
    pub thread: &'a ThreadDetail,
}
