use crate::types::BusinessCategory;
use thiserror::Error;

/// The main error type for iv-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// A category's weight triple does not sum to 1.0
  #[error("Weights for {category:?} sum to {sum}, expected 1.0")]
  InvalidWeights { category: BusinessCategory, sum: f64 },

  /// A category table was built without an entry for every category
  #[error("No entry for category {0:?}")]
  MissingCategory(BusinessCategory),

  /// A per-category valuation assumption is out of range
  #[error("Invalid assumption for {category:?}: {reason}")]
  InvalidAssumption { category: BusinessCategory, reason: String },

  /// Reading a configuration file failed
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  /// Serialization/Deserialization error
  #[error("Serialization error: {0}")]
  Serde(#[from] serde_json::Error),
}

/// Result type alias for iv-* crates
pub type Result<T> = std::result::Result<T, Error>;
