//! Runtime server configuration.

use std::path::PathBuf;

use anyhow::Context as _;
use serde::Deserialize;

/// Deserialised from an optional TOML file, then overridden by `SNMAP_*`
/// environment variables (e.g. `SNMAP_PORT=9000`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  pub database_path:       PathBuf,
  /// How long in-flight requests may drain after a shutdown signal.
  pub shutdown_grace_secs: u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "0.0.0.0".to_string(),
      port:                8080,
      database_path:       PathBuf::from("mappings.db"),
      shutdown_grace_secs: 5,
    }
  }
}

impl ServerConfig {
  pub fn load(path: PathBuf) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("SNMAP"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}
