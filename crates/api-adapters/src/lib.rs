//! # api-adapters
//!
//! Everything that faces a client: the axum router (feature `web-axum`), the
//! server-rendered HTML views, and the metrics registry.

pub mod metrics;
pub mod views;
#[cfg(feature = "web-axum")]
pub mod web;

pub use metrics::{BoardAction, BoardMetrics};
#[cfg(feature = "web-axum")]
pub use web::{router, AppState, WebOptions};
