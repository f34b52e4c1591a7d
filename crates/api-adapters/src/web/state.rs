//! crates/api-adapters/src/web/state.rs
//!
//! Shared state handed to every handler.

use std::sync::Arc;

use services::ThreadService;

use crate::metrics::BoardMetrics;

/// Created once at startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub threads: ThreadService,
    pub metrics: Arc<BoardMetrics>,
}

impl AppState {
    pub fn new(threads: ThreadService) -> Self {
        Self {
            threads,
            metrics: Arc::new(BoardMetrics::new()),
        }
    }
}
