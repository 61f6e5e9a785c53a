//! Service binary: flags, configuration, logging, database, HTTP server.

use biblioteca_api::AppState;
use biblioteca_catalog::{Database, Repository};
use biblioteca_config::Config;
use clap::Parser;
use miette::miette;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// HTTP API for managing a catalog of books and their categories.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Read configuration from this file instead of the default locations.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Override the address the server listens on.
    #[arg(short, long, value_name = "ADDR")]
    listen: Option<SocketAddr>,
    /// Override the SQLite database file.
    #[arg(short, long, value_name = "FILE")]
    database: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let args = Args::parse();
    let mut config = Config::load_from(args.config.as_deref()).map_err(|err| miette!("{err:?}"))?;
    if let Some(listen) = args.listen {
        config.http.listen = listen;
    }
    if let Some(database) = args.database {
        config.database.path = database;
    }

    init_tracing(&config.log.filter);

    // The default database path lives under the platform data directory,
    // which may not exist on a first run.
    if let Some(parent) = config.database.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|err| miette!("failed to create {}: {err}", parent.display()))?;
    }

    let db = Database::connect(&config.database.path).await.map_err(|err| miette!("{err:?}"))?;
    tracing::info!(path = %config.database.path.display(), "catalog database ready");

    let app = biblioteca_api::router(AppState::new(Repository::from(&db)));
    let listener = tokio::net::TcpListener::bind(config.http.listen)
        .await
        .map_err(|err| miette!("failed to bind {}: {err}", config.http.listen))?;
    tracing::info!(listen = %config.http.listen, "serving the book catalog API");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| miette!("server error: {err}"))?;

    db.close().await;
    tracing::info!("catalog database closed, bye");
    Ok(())
}

fn init_tracing(filter: &str) {
    // RUST_LOG wins over the configured filter when both are present.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves when the process is asked to stop (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
