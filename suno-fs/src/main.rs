//! Project store server (suno-fs) - Main entry point
//!
//! Tiny filesystem service for SunoMaker: exposes projects, styles and the
//! prompt template under `/api/fs`.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use suno_common::config::{DataRootResolver, TomlConfig};
use suno_common::DataLayout;
use suno_fs::{build_router, AppState};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for suno-fs
#[derive(Parser, Debug)]
#[command(name = "suno-fs")]
#[command(about = "Filesystem project store for SunoMaker")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "SUNO_FS_HOST")]
    host: std::net::IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "5000", env = "SUNO_FS_PORT")]
    port: u16,

    /// Data root containing projects/, styles/ and templates/
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml = TomlConfig::load();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("suno_fs={level},tower_http={level}", level = toml.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SunoMaker filesystem server (suno-fs) v{}", env!("CARGO_PKG_VERSION"));

    let data_dir = DataRootResolver::new("suno-fs")
        .with_cli_arg(args.data_dir)
        .with_toml(toml)
        .resolve();
    let layout = DataLayout::new(data_dir);
    layout.ensure_directories_exist().with_context(|| {
        format!("Failed to create data directories under {}", layout.root.display())
    })?;
    info!("Data directory: {}", layout.root.display());

    let app = build_router(AppState::new(layout));

    let addr = SocketAddr::from((args.host, args.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("suno-fs listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
