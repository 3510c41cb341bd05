//! marina_server: HTTP front end for the marina boat/slip registry.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use marina_server::{create_router, AppState, Config};

#[derive(Parser)]
#[command(name = "marina_server")]
#[command(about = "REST API for managing boats and the slips they dock in")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "marina.toml")]
    config: PathBuf,

    /// Listen address (overrides config file)
    #[arg(long, env = "MARINA_BIND")]
    bind: Option<SocketAddr>,

    /// SQLite database path (overrides config file)
    #[arg(long, env = "MARINA_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Log level (overrides config file)
    #[arg(long, env = "MARINA_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rotated log files (overrides config file)
    #[arg(long, env = "MARINA_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(db_path) = cli.db_path {
        config.storage.db_path = db_path;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if let Some(dir) = cli.log_dir {
        config.logging.dir = Some(dir);
    }

    let log_dir = config
        .logging
        .dir
        .as_deref()
        .map(|dir| dir.to_str().context("log dir must be valid UTF-8"))
        .transpose()?;
    marina_core::init_logging(&config.logging.level, log_dir).map_err(anyhow::Error::msg)?;

    info!(
        "event=server_start module=server status=start version={}",
        marina_core::core_version()
    );
    if config_found {
        info!("event=config_load module=server status=ok path={}", cli.config.display());
    } else {
        warn!(
            "event=config_load module=server status=defaults path={}",
            cli.config.display()
        );
    }

    let state = AppState::open(&config.storage.db_path).with_context(|| {
        format!("failed to open database {}", config.storage.db_path.display())
    })?;
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(config.server.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind))?;
    info!(
        "event=server_listen module=server status=ok addr={} db_path={}",
        config.server.bind,
        config.storage.db_path.display()
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("event=server_stop module=server status=ok");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("event=server_signal module=server status=error error={}", err);
    }
}
