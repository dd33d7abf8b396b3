//! Discrete recommendation labels derived from the margin of safety.

use serde::{Deserialize, Serialize};

/// Recommendation bucket, ordered from most to least favourable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Recommendation {
  #[serde(rename = "Strong Buy")]
  StrongBuy,
  Buy,
  Hold,
  Sell,
  Avoid,
}

impl std::fmt::Display for Recommendation {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Recommendation::StrongBuy => write!(f, "Strong Buy"),
      Recommendation::Buy => write!(f, "Buy"),
      Recommendation::Hold => write!(f, "Hold"),
      Recommendation::Sell => write!(f, "Sell"),
      Recommendation::Avoid => write!(f, "Avoid"),
    }
  }
}

impl Recommendation {
  /// Check if the label suggests opening a position
  pub fn is_buy(&self) -> bool {
    matches!(self, Recommendation::StrongBuy | Recommendation::Buy)
  }
}
