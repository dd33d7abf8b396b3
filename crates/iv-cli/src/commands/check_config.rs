use crate::config::load;
use anyhow::Result;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Clone, Debug)]
pub struct CheckConfigArgs {
  /// Configuration file to check; defaults to --config, then the environment
  path: Option<PathBuf>,

  /// Print the merged configuration as JSON
  #[arg(long)]
  print: bool,
}

pub fn execute(args: CheckConfigArgs, global_path: Option<&Path>) -> Result<()> {
  let path = args.path.as_deref().or(global_path);
  let config = load(path)?;

  info!(
    "Configuration OK: {} ticker overrides, {} sector hints",
    config.ticker_overrides.len(),
    config.sector_hints.len()
  );

  if args.print {
    println!("{}", serde_json::to_string_pretty(&config)?);
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;

  #[test]
  fn test_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"tax_rate": 0.25, "weights": {"Bank": {"dcf": 0.2, "epv": 0.3, "asset": 0.5}}}"#)
      .unwrap();

    let config = load(Some(path.as_path())).unwrap();
    assert_eq!(config.tax_rate, 0.25);
  }

  #[test]
  fn test_invalid_weights_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"weights": {"Bank": {"dcf": 0.5, "epv": 0.5, "asset": 0.5}}}"#).unwrap();

    let err = load(Some(path.as_path())).unwrap_err();
    assert!(format!("{:#}", err).contains("Bank"));
  }

  #[test]
  fn test_unknown_field_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"tax": 0.25}"#).unwrap();
    assert!(load(Some(path.as_path())).is_err());
  }
}
