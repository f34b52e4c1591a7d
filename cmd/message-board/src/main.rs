//! # Message Board Binary
//!
//! The entry point that assembles the application from configuration and the
//! compile-time storage features.

use std::sync::Arc;

use anyhow::Context;
use api_adapters::{router, AppState, WebOptions};
use configs::{LogFormat, LoggingSettings, Settings, StorageBackend};
use domains::ThreadRepository;
use services::ThreadService;
use storage_adapters::InMemoryThreadRepository;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration and logging
    let settings = Settings::load().context("loading configuration")?;
    init_tracing(&settings.logging);
    info!(backend = ?settings.database.backend, "configuration loaded");

    // 2. Storage
    let repo = open_repository(&settings).await?;

    // 3. Router
    let state = AppState::new(ThreadService::new(repo.clone()));
    let app = router(
        state,
        &WebOptions {
            public_dir: settings.web.public_dir.clone(),
            cors_allow_any_origin: settings.web.cors_allow_any_origin,
        },
    );

    // 4. Serve until interrupted
    let address = settings.server.bind_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("binding {address}"))?;
    info!(%address, "message board listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    repo.close().await;
    info!("shut down cleanly");
    Ok(())
}

fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logging.level.as_str()));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

async fn open_repository(settings: &Settings) -> anyhow::Result<Arc<dyn ThreadRepository>> {
    match settings.database.backend {
        #[cfg(feature = "db-sqlite")]
        StorageBackend::Sqlite => {
            use secrecy::ExposeSecret;

            let repo = storage_adapters::SqliteThreadRepository::connect(
                settings.database.url.expose_secret(),
                settings.database.max_connections,
            )
            .await
            .context("opening SQLite store")?;
            info!("using SQLite store");
            Ok(Arc::new(repo))
        }
        #[cfg(not(feature = "db-sqlite"))]
        StorageBackend::Sqlite => {
            anyhow::bail!("built without the db-sqlite feature; set database.backend = \"memory\"")
        }
        StorageBackend::Memory => {
            warn!("using in-memory store; threads are lost on restart");
            Ok(Arc::new(InMemoryThreadRepository::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
