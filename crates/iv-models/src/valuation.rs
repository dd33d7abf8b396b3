/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Valuation method estimates, the blended fair value and the final result

use crate::ratios::RatioSet;
use crate::statement::{StatementField, StatementKey};
use iv_core::{BusinessCategory, Recommendation, ValuationMethod, WeightTriple};
use serde::{Deserialize, Serialize};

/// Why a valuation method produced no estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
  /// The input was not reported
  Missing,
  /// The input was zero or negative
  NonPositive,
  /// The arithmetic did not produce a finite number
  NotFinite,
}

/// Per-share estimate from one valuation method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodEstimate {
  Available { value: f64 },
  Unavailable { reason: UnavailableReason, field: StatementField },
}

impl MethodEstimate {
  pub fn missing(field: StatementField) -> Self {
    MethodEstimate::Unavailable { reason: UnavailableReason::Missing, field }
  }

  pub fn non_positive(field: StatementField) -> Self {
    MethodEstimate::Unavailable { reason: UnavailableReason::NonPositive, field }
  }

  /// Wrap a computed value; non-finite arithmetic is reported against `field`
  pub fn from_value(value: f64, field: StatementField) -> Self {
    if value.is_finite() {
      MethodEstimate::Available { value }
    } else {
      MethodEstimate::Unavailable { reason: UnavailableReason::NotFinite, field }
    }
  }

  pub fn value(&self) -> Option<f64> {
    match self {
      MethodEstimate::Available { value } => Some(*value),
      MethodEstimate::Unavailable { .. } => None,
    }
  }

  pub fn is_available(&self) -> bool {
    self.value().is_some()
  }
}

/// Output of the three valuation methods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationTriple {
  pub dcf: MethodEstimate,
  pub epv: MethodEstimate,
  pub asset_based: MethodEstimate,
}

impl ValuationTriple {
  pub fn get(&self, method: ValuationMethod) -> &MethodEstimate {
    match method {
      ValuationMethod::Dcf => &self.dcf,
      ValuationMethod::Epv => &self.epv,
      ValuationMethod::AssetBased => &self.asset_based,
    }
  }

  /// `(method, value)` for every method that produced an estimate
  pub fn available(&self) -> Vec<(ValuationMethod, f64)> {
    ValuationMethod::ALL
      .iter()
      .filter_map(|method| self.get(*method).value().map(|value| (*method, value)))
      .collect()
  }
}

/// Blended estimate over the available methods
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blend {
  /// Fair value per share
  pub fair_value: f64,

  /// Weights actually applied, renormalized over the available methods
  pub effective_weights: WeightTriple,

  /// Number of methods that contributed
  pub methods_used: usize,

  /// `(fair value - price) / price * 100`, when a positive price is known
  pub margin_of_safety_percent: Option<f64>,

  pub recommendation: Option<Recommendation>,
}

/// Blended fair value, or the explicit absence of one
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FairValue {
  Estimated(Blend),
  /// No valuation method could be computed
  Unavailable,
}

impl FairValue {
  pub fn blend(&self) -> Option<&Blend> {
    match self {
      FairValue::Estimated(blend) => Some(blend),
      FairValue::Unavailable => None,
    }
  }
}

/// Result of valuing one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
  /// `(ticker, period)` of the source statement, when known
  pub key: Option<StatementKey>,

  pub ticker: Option<String>,

  pub current_price: Option<f64>,

  pub category: BusinessCategory,

  /// Name of the classification rule that selected the category
  pub classification_rule: String,

  /// The category's configured weights
  pub weights: WeightTriple,

  pub ratios: RatioSet,

  pub estimates: ValuationTriple,

  pub fair_value: FairValue,
}

impl ValuationResult {
  pub fn fair_value_per_share(&self) -> Option<f64> {
    self.fair_value.blend().map(|blend| blend.fair_value)
  }

  pub fn margin_of_safety_percent(&self) -> Option<f64> {
    self.fair_value.blend().and_then(|blend| blend.margin_of_safety_percent)
  }

  pub fn recommendation(&self) -> Option<Recommendation> {
    self.fair_value.blend().and_then(|blend| blend.recommendation)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_method_estimate_from_value() {
    let ok = MethodEstimate::from_value(12.5, StatementField::FreeCashFlow);
    assert_eq!(ok.value(), Some(12.5));

    let nan = MethodEstimate::from_value(f64::NAN, StatementField::FreeCashFlow);
    assert!(!nan.is_available());
    assert_eq!(
      nan,
      MethodEstimate::Unavailable {
        reason: UnavailableReason::NotFinite,
        field: StatementField::FreeCashFlow
      }
    );
  }

  #[test]
  fn test_triple_available_methods() {
    let triple = ValuationTriple {
      dcf: MethodEstimate::Available { value: 100.0 },
      epv: MethodEstimate::non_positive(StatementField::OperatingIncome),
      asset_based: MethodEstimate::Available { value: 40.0 },
    };
    assert_eq!(
      triple.available(),
      vec![(ValuationMethod::Dcf, 100.0), (ValuationMethod::AssetBased, 40.0)]
    );
  }

  #[test]
  fn test_method_estimate_serialization() {
    let json = serde_json::to_value(MethodEstimate::missing(StatementField::SharesOutstanding)).unwrap();
    assert_eq!(json["status"], "unavailable");
    assert_eq!(json["reason"], "missing");
    assert_eq!(json["field"], "shares_outstanding");

    let json = serde_json::to_value(MethodEstimate::Available { value: 3.5 }).unwrap();
    assert_eq!(json["status"], "available");
    assert_eq!(json["value"], 3.5);
  }

  #[test]
  fn test_fair_value_unavailable_is_distinct() {
    let json = serde_json::to_value(FairValue::Unavailable).unwrap();
    assert_eq!(json["status"], "unavailable");
    assert!(json.get("fair_value").is_none());
    assert!(FairValue::Unavailable.blend().is_none());
  }

  #[test]
  fn test_fair_value_estimated_serialization() {
    let blend = Blend {
      fair_value: 25.0,
      effective_weights: WeightTriple::new(0.5, 0.3, 0.2),
      methods_used: 3,
      margin_of_safety_percent: Some(25.0),
      recommendation: Some(Recommendation::Buy),
    };
    let json = serde_json::to_value(FairValue::Estimated(blend)).unwrap();
    assert_eq!(json["status"], "estimated");
    assert_eq!(json["fair_value"], 25.0);
    assert_eq!(json["recommendation"], "Buy");
  }
}
