//! enviroCar server entry point.

#![forbid(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use envirocar_core::InMemoryStore;
use envirocar_rest::{AppState, Server, ServerConfig, Services};

/// enviroCar REST API server
#[derive(Parser, Debug)]
#[command(name = "envirocar-server", author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "ENVIROCAR_CONFIG")]
    config: Option<PathBuf>,

    /// JSON seed document to load into the in-memory store
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Port to listen on, overriding the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Enable debug logging for every crate
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose {
        "debug"
    } else {
        "info,envirocar=debug"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let mut config = ServerConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(port) = args.port {
        config.port = port;
    }

    let store = match &args.seed {
        Some(path) => {
            tracing::info!(seed = %path.display(), "Loading seed");
            InMemoryStore::load_seed(path)
                .with_context(|| format!("loading seed {}", path.display()))?
        }
        None => InMemoryStore::new(),
    };

    let state = AppState::new(Services::in_memory(Arc::new(store)), &config)?;
    Server::new(config, state).run().await?;
    Ok(())
}
