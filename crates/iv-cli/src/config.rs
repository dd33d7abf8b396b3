use anyhow::{Context, Result};
use iv_core::EngineConfig;
use std::path::Path;
use tracing::debug;

/// Engine configuration from `--config`, else from the environment
pub fn load(path: Option<&Path>) -> Result<EngineConfig> {
  match path {
    Some(path) => EngineConfig::from_file(path)
      .with_context(|| format!("Failed to load configuration from {}", path.display())),
    None => {
      debug!("No --config given, reading configuration from the environment");
      EngineConfig::from_env().context("Failed to load configuration from the environment")
    }
  }
}
