//! Blender and recommender
//!
//! Weights of unavailable methods are dropped and the rest renormalized to sum
//! to 1.0. With nothing left to blend the result is [`FairValue::Unavailable`].

use iv_core::{Recommendation, RecommendationThresholds, ValuationMethod, WeightTriple};
use iv_models::{Blend, FairValue, ValuationTriple};

/// `(fair - price) / price * 100`, when the price is positive
pub fn margin_of_safety(fair_value: f64, price: Option<f64>) -> Option<f64> {
  let price = price.filter(|p| *p > 0.0 && p.is_finite())?;
  Some((fair_value - price) * 100.0 / price).filter(|mos| mos.is_finite())
}

/// Bucket a margin of safety. A value on a bound falls to the lower bucket.
pub fn recommend(margin_of_safety: f64, thresholds: &RecommendationThresholds) -> Recommendation {
  if margin_of_safety > thresholds.strong_buy_above {
    Recommendation::StrongBuy
  } else if margin_of_safety > thresholds.buy_above {
    Recommendation::Buy
  } else if margin_of_safety > thresholds.hold_above {
    Recommendation::Hold
  } else if margin_of_safety > thresholds.sell_above {
    Recommendation::Sell
  } else {
    Recommendation::Avoid
  }
}

/// Weights over the available methods, scaled to sum to 1.0.
///
/// `None` when no available method carries weight.
pub fn effective_weights(estimates: &ValuationTriple, weights: WeightTriple) -> Option<WeightTriple> {
  let kept = |method: ValuationMethod| {
    if estimates.get(method).is_available() {
      weights.weight_for(method)
    } else {
      0.0
    }
  };
  let raw = WeightTriple::new(
    kept(ValuationMethod::Dcf),
    kept(ValuationMethod::Epv),
    kept(ValuationMethod::AssetBased),
  );

  let total = raw.sum();
  if total <= 0.0 || !total.is_finite() {
    return None;
  }
  Some(WeightTriple::new(raw.dcf / total, raw.epv / total, raw.asset / total))
}

pub fn blend(
  estimates: &ValuationTriple,
  weights: WeightTriple,
  price: Option<f64>,
  thresholds: &RecommendationThresholds,
) -> FairValue {
  let Some(effective) = effective_weights(estimates, weights) else {
    return FairValue::Unavailable;
  };

  let available = estimates.available();
  let fair_value: f64 =
    available.iter().map(|(method, value)| value * effective.weight_for(*method)).sum();
  if !fair_value.is_finite() {
    return FairValue::Unavailable;
  }

  let margin = margin_of_safety(fair_value, price);
  FairValue::Estimated(Blend {
    fair_value,
    effective_weights: effective,
    methods_used: available.iter().filter(|(method, _)| effective.weight_for(*method) > 0.0).count(),
    margin_of_safety_percent: margin,
    recommendation: margin.map(|mos| recommend(mos, thresholds)),
  })
}
