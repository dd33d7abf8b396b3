//! Policy thresholds for the classifier and the recommender.
//!
//! The `pub const` values are the shipped policy. Both structs deserialize with
//! `#[serde(default)]`, so a config file only has to name the thresholds it moves.

use serde::{Deserialize, Serialize};

/// Rule 2: gross margin (%) a high-margin software business must exceed
pub const SOFTWARE_MIN_GROSS_MARGIN: f64 = 70.0;
/// Rule 2: ROE (%) a high-margin software business must exceed
pub const SOFTWARE_MIN_ROE: f64 = 20.0;
/// Rule 3: debt-to-equity an asset-heavy business must exceed
pub const ASSET_HEAVY_MIN_DEBT_TO_EQUITY: f64 = 2.0;
/// Rule 3: gross margin (%) an asset-heavy business must stay below
pub const ASSET_HEAVY_MAX_GROSS_MARGIN: f64 = 40.0;
/// Rule 4: ROE (%) a growth company must exceed
pub const GROWTH_MIN_ROE: f64 = 25.0;
/// Rule 4: gross margin (%) a growth company must exceed
pub const GROWTH_MIN_GROSS_MARGIN: f64 = 50.0;
/// Rule 5: ROE (%) a mature company must exceed
pub const MATURE_MIN_ROE: f64 = 15.0;
/// Rule 5: debt-to-equity a mature company must stay below
pub const MATURE_MAX_DEBT_TO_EQUITY: f64 = 1.0;

/// Margin of safety (%) above which the label is Strong Buy
pub const STRONG_BUY_ABOVE: f64 = 30.0;
/// Margin of safety (%) above which the label is Buy
pub const BUY_ABOVE: f64 = 10.0;
/// Margin of safety (%) above which the label is Hold
pub const HOLD_ABOVE: f64 = -10.0;
/// Margin of safety (%) above which the label is Sell; at or below is Avoid
pub const SELL_ABOVE: f64 = -30.0;

/// Thresholds for the ratio-based classification rules. All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierThresholds {
  pub software_min_gross_margin: f64,
  pub software_min_roe: f64,
  pub asset_heavy_min_debt_to_equity: f64,
  pub asset_heavy_max_gross_margin: f64,
  pub growth_min_roe: f64,
  pub growth_min_gross_margin: f64,
  pub mature_min_roe: f64,
  pub mature_max_debt_to_equity: f64,
}

impl Default for ClassifierThresholds {
  fn default() -> Self {
    Self {
      software_min_gross_margin: SOFTWARE_MIN_GROSS_MARGIN,
      software_min_roe: SOFTWARE_MIN_ROE,
      asset_heavy_min_debt_to_equity: ASSET_HEAVY_MIN_DEBT_TO_EQUITY,
      asset_heavy_max_gross_margin: ASSET_HEAVY_MAX_GROSS_MARGIN,
      growth_min_roe: GROWTH_MIN_ROE,
      growth_min_gross_margin: GROWTH_MIN_GROSS_MARGIN,
      mature_min_roe: MATURE_MIN_ROE,
      mature_max_debt_to_equity: MATURE_MAX_DEBT_TO_EQUITY,
    }
  }
}

/// Lower bounds (exclusive) of each recommendation bucket.
///
/// A margin of safety exactly on a bound falls into the lower bucket.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationThresholds {
  pub strong_buy_above: f64,
  pub buy_above: f64,
  pub hold_above: f64,
  pub sell_above: f64,
}

impl Default for RecommendationThresholds {
  fn default() -> Self {
    Self {
      strong_buy_above: STRONG_BUY_ABOVE,
      buy_above: BUY_ABOVE,
      hold_above: HOLD_ABOVE,
      sell_above: SELL_ABOVE,
    }
  }
}

impl RecommendationThresholds {
  /// Bounds must be finite and strictly descending
  pub fn is_ordered(&self) -> bool {
    let bounds = [self.strong_buy_above, self.buy_above, self.hold_above, self.sell_above];
    bounds.iter().all(|b| b.is_finite()) && bounds.windows(2).all(|pair| pair[0] > pair[1])
  }
}
