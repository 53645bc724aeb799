//! Logging setup

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Parse the configured level; only plain levels ("info", "debug", "off", ...) are accepted
fn level_filter(log: &LogConfig) -> Result<LevelFilter> {
  log
    .level
    .parse::<LevelFilter>()
    .map_err(|_| anyhow!("Invalid log level '{}'", log.level))
}

/// Build the event filter; `RUST_LOG` takes precedence over the configured level
fn build_filter(log: &LogConfig) -> Result<EnvFilter> {
  let level = level_filter(log)?;
  Ok(
    EnvFilter::try_from_default_env()
      .unwrap_or_else(|_| EnvFilter::default().add_directive(level.into())),
  )
}

/// Initialize the global tracing subscriber
///
/// When a log file is configured, events are appended to it instead of stdout.
pub fn init_logger(log: &LogConfig) -> Result<()> {
  let filter = build_filter(log)?;

  let builder = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .with_thread_ids(true);

  let installed = match &log.file {
    Some(path) => {
      let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file '{}'", path))?;
      builder.with_ansi(false).with_writer(Mutex::new(file)).try_init()
    }
    None => builder.try_init(),
  };

  installed.map_err(|e| anyhow!("Failed to install log subscriber: {}", e))
}
