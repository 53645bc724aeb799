use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

/// Log configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LogConfig {
  /// Log file path, if not set, logs will be printed to stdout
  pub file: Option<String>,
  /// Log level, default is "info"
  #[serde(default = "default_log_level")]
  pub level: String,
}

fn default_log_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    Self {
      file: None,
      level: default_log_level(),
    }
  }
}

/// Bookstore configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
  /// HTTP listening address
  #[serde(default = "default_server_addr")]
  pub server_addr: String,

  /// Log configuration
  #[serde(default)]
  pub log: LogConfig,
}

fn default_server_addr() -> String {
  "0.0.0.0:8080".to_string()
}

impl Default for Config {
  fn default() -> Self {
    Self {
      server_addr: default_server_addr(),
      log: LogConfig::default(),
    }
  }
}

impl Config {
  /// Load configuration from TOML file
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let config_str = fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

    Self::parse(&config_str)
      .with_context(|| format!("Failed to parse config file '{}'", path.display()))
  }

  /// Parse configuration from a TOML string
  pub fn parse(config_str: &str) -> Result<Self> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
  }

  /// Accepts `ip:port`, `[ipv6]:port` or `host:port`; host names resolve at bind time
  fn validate(&self) -> Result<()> {
    if self.server_addr.parse::<SocketAddr>().is_ok() {
      return Ok(());
    }
    match self.server_addr.rsplit_once(':') {
      Some((host, port))
        if !host.is_empty() && !host.contains(char::is_whitespace) && port.parse::<u16>().is_ok() =>
      {
        Ok(())
      }
      _ => bail!("invalid server_addr '{}'", self.server_addr),
    }
  }

  /// Override the listening address, e.g. from the command line
  pub fn with_server_addr(mut self, addr: impl Into<String>) -> Result<Self> {
    self.server_addr = addr.into();
    self.validate()?;
    Ok(self)
  }
}
