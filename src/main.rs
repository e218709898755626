use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{info, warn};

use yt_summarizer::{logging, ApiServer, AppState, Config};

#[derive(Parser)]
#[command(name = "yt-summarizer", version, about = "Summarize YouTube videos from their captions")]
struct Cli {
    /// Configuration file (defaults to the standard search paths)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Interface to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served under /static
    #[arg(long, value_name = "DIR")]
    static_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "yt_summarizer=debug,tower_http=debug"
    } else {
        "yt_summarizer=info,tower_http=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(logging::env_filter(default_filter))
        .init();

    // Load configuration
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(static_dir) = cli.static_dir {
        config.server.static_dir = static_dir;
    }

    config.validate()?;
    info!("{}", config.summary());

    let addr = resolve_bind_addr(&config.server.host, config.server.port).await?;
    let state = AppState::from_config(config)?;

    ApiServer::new(state, addr).start().await
}

/// Resolve the configured interface, accepting hostnames as well as IP literals
async fn resolve_bind_addr(host: &str, port: u16) -> Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("Failed to resolve listen address {}:{}", host, port))?
        .next()
        .ok_or_else(|| anyhow!("No address found for {}:{}", host, port))
}
