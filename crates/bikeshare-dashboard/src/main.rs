//! Bike rental dashboard - main entry point

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use bikeshare_common::init_logging;
use bikeshare_config::{Config, ConfigLoader};
use bikeshare_dashboard::{create_router, AppState};
use bikeshare_graphs::{StyleConfig, TableLoader};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Hourly rental CSV, overriding the configured path
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Log level, overriding the configured level
    #[arg(short, long)]
    log_level: Option<String>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)?,
        None => ConfigLoader::load()?,
    };
    ConfigLoader::apply_cli_overrides(&mut config, args.data.as_deref(), args.log_level.as_deref())?;
    Ok(config)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args).context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging.to_logging_config())?;

    info!("Starting bike rental dashboard v{}", env!("CARGO_PKG_VERSION"));

    let table = TableLoader::load(&config.data.path)
        .with_context(|| format!("Failed to load {}", config.data.path.display()))?;
    let state = AppState::new(table, StyleConfig::from(&config.charts));
    let app = create_router(state);

    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Dashboard stopped");
    Ok(())
}
