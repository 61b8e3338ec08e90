//! Todolist HTTP server.

use anyhow::Context;
use std::sync::Arc;
use todolist_core::TodoList;
use todolist_server::Config;
use todolist_web::{AppState, build_router};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies.
    let dotenv = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todolist=debug,tower_http=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &dotenv {
        Err(e) if !e.not_found() => warn!(error = %e, "Failed to read .env file"),
        _ => {}
    }

    info!("Starting todolist server");

    let config = Config::from_env().context("invalid configuration")?;
    info!(
        database_url = %config.database.redacted(),
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    let store = todolist_sqlite::connect(&config.database)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to open database"))
        .context("failed to open database")?;

    let todos = TodoList::load(store)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to load todos"))
        .context("failed to load todos")?;
    info!(count = todos.len().await, "Todos loaded");

    let app = build_router(AppState::new(Arc::new(todos)));

    let addr = config.server.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(address = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
}
