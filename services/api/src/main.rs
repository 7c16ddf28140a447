use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod error;
mod models;
mod repositories;
mod routes;
mod schema;
mod settings;
mod state;
mod validation;

use common::database::{close_pool, health_check, init_pool};

use crate::{
    settings::{Settings, StoreBackend},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load().context("Failed to load configuration")?;

    // Initialize logging; RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting API service");

    let app_state = match settings.store.backend {
        StoreBackend::Postgres => {
            let pool = init_pool(&settings.database).await?;

            // Check database connectivity
            if health_check(&pool).await {
                info!("Database connection successful");
            } else {
                anyhow::bail!("Failed to connect to database");
            }

            schema::ensure_schema(&pool).await?;
            AppState::postgres(pool)
        }
        StoreBackend::Memory => {
            warn!("Using the in-memory store; records are lost on shutdown");
            AppState::in_memory()
        }
    };
    let db_pool = app_state.db_pool.clone();

    info!("API service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let address = settings.server.address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind API server to {}", address))?;
    info!("API service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server error")?;

    if let Some(pool) = db_pool {
        close_pool(&pool).await;
    }

    info!("API service stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
