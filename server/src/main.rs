//! RSVP HTTP server.
//!
//! Wires configuration, the Postgres record store and the axum router, then
//! serves until Ctrl+C or SIGTERM.

mod config;

use config::Config;
use rsvp_postgres::{PostgresRecordStore, migrate};
use rsvp_web::{AppState, build_router};
use sqlx::postgres::PgPoolOptions;
use std::future::IntoFuture;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Notify;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine; real deployments set the environment directly
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "rsvp_server={level},rsvp_web={level},tower_http=debug",
                    level = config.server.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting RSVP server");
    info!(
        host = %config.server.host,
        port = config.server.port,
        max_connections = config.database.max_connections,
        run_migrations = config.database.run_migrations,
        "Configuration loaded"
    );

    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(config.database.connect_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Database connected");

    if config.database.run_migrations {
        migrate(&pool).await?;
    }

    let store = Arc::new(PostgresRecordStore::from_pool(pool.clone()));
    let app = build_router(AppState::from_store(store));

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(address = %addr, "Server listening");

    let shutdown = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown.clone()))
        .into_future();
    let budget = config.server.shutdown_timeout();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                error!(error = %e, "Server error");
                return Err(e.into());
            }
        }
        () = async {
            shutdown.notified().await;
            tokio::time::sleep(budget).await;
        } => {
            warn!(timeout_secs = budget.as_secs(), "Graceful shutdown timed out, dropping open connections");
        }
    }

    pool.close().await;
    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C or SIGTERM, then signal `shutdown`.
async fn shutdown_signal(shutdown: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }

    shutdown.notify_one();
}
