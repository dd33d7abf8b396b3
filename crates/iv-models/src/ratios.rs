//! Derived ratio view over one statement and a market price

use serde::{Deserialize, Serialize};

/// Ratios derived from a [`crate::FinancialStatement`].
///
/// `None` means unavailable: a missing input or a zero/negative denominator.
/// A `Some` value is always finite. Margins, ROE and ROA are percentages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatioSet {
  pub pe_ratio: Option<f64>,
  pub pb_ratio: Option<f64>,
  pub ps_ratio: Option<f64>,
  pub roe: Option<f64>,
  pub roa: Option<f64>,
  pub debt_to_equity: Option<f64>,
  pub current_ratio: Option<f64>,
  pub gross_margin: Option<f64>,
  pub operating_margin: Option<f64>,
  pub net_margin: Option<f64>,
}

impl RatioSet {
  fn values(&self) -> [Option<f64>; 10] {
    [
      self.pe_ratio,
      self.pb_ratio,
      self.ps_ratio,
      self.roe,
      self.roa,
      self.debt_to_equity,
      self.current_ratio,
      self.gross_margin,
      self.operating_margin,
      self.net_margin,
    ]
  }

  /// Number of ratios that could be computed
  pub fn available_count(&self) -> usize {
    self.values().iter().filter(|value| value.is_some()).count()
  }

  /// Every present ratio is finite
  pub fn is_well_formed(&self) -> bool {
    self.values().iter().flatten().all(|value| value.is_finite())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_ratio_set() {
    let ratios = RatioSet::default();
    assert_eq!(ratios.available_count(), 0);
    assert!(ratios.is_well_formed());
  }

  #[test]
  fn test_available_count_and_well_formed() {
    let ratios = RatioSet { roe: Some(25.0), gross_margin: Some(60.0), ..Default::default() };
    assert_eq!(ratios.available_count(), 2);
    assert!(ratios.is_well_formed());

    let broken = RatioSet { pe_ratio: Some(f64::INFINITY), ..Default::default() };
    assert!(!broken.is_well_formed());
  }

  #[test]
  fn test_unavailable_serializes_as_null() {
    let ratios = RatioSet { roe: Some(12.5), ..Default::default() };
    let json = serde_json::to_value(ratios).unwrap();
    assert_eq!(json["roe"], 12.5);
    assert!(json["pe_ratio"].is_null());
  }
}
