//! # Axum web adapter
//!
//! The HTTP routing and orchestration layer for the message board.

pub mod error;
pub mod extract;
pub mod middleware;
pub mod ops;
pub mod pages;
pub mod replies;
pub mod state;
pub mod threads;

use std::path::PathBuf;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::AppState;

/// Knobs for the outer layers of the router.
#[derive(Debug, Clone)]
pub struct WebOptions {
    /// Directory served under `/public`.
    pub public_dir: PathBuf,
    pub cors_allow_any_origin: bool,
}

impl Default for WebOptions {
    fn default() -> Self {
        Self {
            public_dir: PathBuf::from("./public"),
            cors_allow_any_origin: true,
        }
    }
}

/// Configures the routes for the message board.
///
/// A known path hit with an unsupported method gets the same plain `Not Found`
/// as an unknown path.
///
/// # Developer Note
/// The `board` segment of the reply routes is accepted but not checked
/// against the thread; only thread deletion is scoped to a board.
pub fn router(state: AppState, options: &WebOptions) -> Router {
    let routes = Router::new()
        .route("/api/threads", get(threads::list_all_threads).fallback(ops::not_found))
        .route(
            "/api/threads/{board}",
            get(threads::list_threads)
                .post(threads::create_thread)
                .put(threads::report_thread)
                .delete(threads::delete_thread)
                .fallback(ops::not_found),
        )
        .route(
            "/api/replies/{board}",
            get(replies::get_thread)
                .post(replies::create_reply)
                .put(replies::report_reply)
                .delete(replies::delete_reply)
                .fallback(ops::not_found),
        )
        .route("/", get(pages::index).fallback(ops::not_found))
        .route("/b/{board}", get(pages::board).fallback(ops::not_found))
        .route("/b/{board}/", get(pages::board).fallback(ops::not_found))
        .route("/b/{board}/{thread_id}", get(pages::thread).fallback(ops::not_found))
        .route("/metrics", get(ops::metrics).fallback(ops::not_found))
        .nest_service("/public", ServeDir::new(&options.public_dir))
        .fallback(ops::not_found)
        .with_state(state);

    let routes = if options.cors_allow_any_origin {
        routes.layer(middleware::cors_policy())
    } else {
        routes
    };
    // Wraps CORS: preflight answers are produced there.
    let routes = routes.layer(axum::middleware::from_fn(middleware::security_headers));

    routes.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http().make_span_with(middleware::request_span))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(CompressionLayer::new()),
    )
}
