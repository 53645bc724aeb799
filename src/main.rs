use std::path::PathBuf;

use anyhow::{Context, Result};
use bookstore::Server;
use bookstore::config::Config;
use bookstore::util::logger::init_logger;
use clap::Parser;
use tracing::info;

/// In-memory bookstore HTTP service
#[derive(Debug, Parser)]
#[command(name = "bookstore", version)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening address, overrides `server_addr` from the config
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(addr) = args.listen {
        config = config.with_server_addr(addr)?;
    }

    init_logger(&config.log)?;

    info!("Starting bookstore");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let server = Server::bind(&config.server_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server_addr))?;
    info!("Server listening on: {}", server.local_addr());

    let store = server.store();
    server.run().await.context("Server error")?;

    info!("Exiting with {} books in store", store.len()?);
    Ok(())
}
