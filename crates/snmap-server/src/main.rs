//! ServiceNow mapping service binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite store, and serves the JSON API over HTTP until SIGINT/SIGTERM.

mod settings;

use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use snmap_core::service::MappingService;
use snmap_store_sqlite::SqliteStore;
use tokio::{net::TcpListener, sync::watch};
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "ServiceNow sys_id to API mapping service")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(cli.config)?;

  let store = SqliteStore::open(&server_cfg.database_path)
    .await
    .with_context(|| {
      format!("failed to open store at {:?}", server_cfg.database_path)
    })?;

  let service = Arc::new(MappingService::new(store));
  let app = snmap_api::api_router(service).layer(TraceLayer::new_for_http());

  let address = server_cfg.address();
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  // The server stops accepting once `stop` flips; in-flight requests then get
  // `shutdown_grace_secs` to finish.
  let (stop_tx, mut stop_rx) = watch::channel(false);
  let mut server = tokio::spawn(async move {
    axum::serve(listener, app)
      .with_graceful_shutdown(async move {
        let _ = stop_rx.changed().await;
      })
      .await
  });

  tokio::select! {
    joined = &mut server => {
      joined.context("server task panicked")?.context("server error")?;
      return Ok(());
    }
    () = shutdown_signal() => {}
  }

  tracing::info!("Shutting down server...");
  let _ = stop_tx.send(true);

  let grace = Duration::from_secs(server_cfg.shutdown_grace_secs);
  match tokio::time::timeout(grace, server).await {
    Ok(joined) => {
      joined.context("server task panicked")?.context("server error")?;
      tracing::info!("Server exited successfully");
    }
    Err(_) => tracing::warn!(?grace, "forced shutdown with requests in flight"),
  }

  Ok(())
}

/// Resolve on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for Ctrl-C");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
    {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => {},
    () = terminate => {},
  }
}
