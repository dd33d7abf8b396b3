//! Financial data normalizer
//!
//! Turns a [`FinancialStatement`] and an optional price into a [`RatioSet`].
//! Each ratio degrades to `None` on its own; nothing here fails.

use iv_models::{FinancialStatement, RatioSet};
use tracing::debug;

/// `numerator / denominator` when the denominator is positive and the result finite
fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
  if denominator <= 0.0 || !denominator.is_finite() || !numerator.is_finite() {
    return None;
  }
  Some(numerator / denominator).filter(|value| value.is_finite())
}

/// `numerator / denominator * 100`, multiplied first so whole-number inputs stay exact
fn safe_percent(numerator: f64, denominator: f64) -> Option<f64> {
  safe_div(numerator * 100.0, denominator)
}

fn positive(value: Option<f64>) -> Option<f64> {
  value.filter(|v| *v > 0.0 && v.is_finite())
}

/// Compute every ratio the statement supports
pub fn normalize(statement: &FinancialStatement, price: Option<f64>) -> RatioSet {
  let price = positive(price);
  let shares = positive(statement.shares_outstanding);
  let net_income = statement.net_income;
  let equity = statement.shareholders_equity;
  let revenue = statement.revenue;

  let pe_ratio = match (price, shares, positive(net_income)) {
    (Some(price), Some(shares), Some(net_income)) => safe_div(price * shares, net_income),
    _ => None,
  };

  let pb_ratio = match (price, shares, equity) {
    (Some(price), Some(shares), Some(equity)) => safe_div(price * shares, equity),
    _ => None,
  };

  let ps_ratio = match (price, shares, revenue) {
    (Some(price), Some(shares), Some(revenue)) => safe_div(price * shares, revenue),
    _ => None,
  };

  let ratio = |numerator: Option<f64>, denominator: Option<f64>| match (numerator, denominator) {
    (Some(n), Some(d)) => safe_div(n, d),
    _ => None,
  };
  let percent = |numerator: Option<f64>, denominator: Option<f64>| match (numerator, denominator) {
    (Some(n), Some(d)) => safe_percent(n, d),
    _ => None,
  };

  let ratios = RatioSet {
    pe_ratio,
    pb_ratio,
    ps_ratio,
    roe: percent(net_income, equity),
    roa: percent(net_income, statement.total_assets),
    debt_to_equity: ratio(statement.total_liabilities, equity),
    current_ratio: ratio(statement.current_assets, statement.current_liabilities),
    gross_margin: percent(statement.gross_profit, revenue),
    operating_margin: percent(statement.operating_income, revenue),
    net_margin: percent(net_income, revenue),
  };

  debug!(
    "Normalized {}: {} of 10 ratios available",
    statement.ticker.as_deref().unwrap_or("<unknown>"),
    ratios.available_count()
  );
  ratios
}

#[cfg(test)]
mod tests {
  use super::*;
  use iv_core::test_utils::{assert_some_approx_eq, RATIO_TOLERANCE};

  fn scenario() -> FinancialStatement {
    FinancialStatement {
      revenue: Some(100.0),
      net_income: Some(15.0),
      shareholders_equity: Some(60.0),
      total_liabilities: Some(40.0),
      shares_outstanding: Some(10.0),
      ..Default::default()
    }
  }

  #[test]
  fn test_scenario_ratios() {
    let ratios = normalize(&scenario(), Some(20.0));
    assert_some_approx_eq(ratios.pe_ratio, 13.33, RATIO_TOLERANCE);
    assert_some_approx_eq(ratios.pb_ratio, 3.33, RATIO_TOLERANCE);
    assert_some_approx_eq(ratios.ps_ratio, 2.0, RATIO_TOLERANCE);
    assert_eq!(ratios.roe, Some(25.0));
    assert_some_approx_eq(ratios.debt_to_equity, 0.667, RATIO_TOLERANCE);
    assert_eq!(ratios.net_margin, Some(15.0));
    assert_eq!(ratios.gross_margin, None);
    assert_eq!(ratios.current_ratio, None);
    assert_eq!(ratios.roa, None);
  }

  #[test]
  fn test_missing_price_only_drops_price_ratios() {
    let ratios = normalize(&scenario(), None);
    assert_eq!(ratios.pe_ratio, None);
    assert_eq!(ratios.pb_ratio, None);
    assert_eq!(ratios.ps_ratio, None);
    assert_eq!(ratios.roe, Some(25.0));
  }

  #[test]
  fn test_zero_and_negative_denominators() {
    let statement = FinancialStatement {
      revenue: Some(0.0),
      gross_profit: Some(10.0),
      net_income: Some(-5.0),
      shareholders_equity: Some(-20.0),
      total_liabilities: Some(50.0),
      total_assets: Some(0.0),
      current_assets: Some(10.0),
      current_liabilities: Some(0.0),
      shares_outstanding: Some(10.0),
      ..Default::default()
    };
    let ratios = normalize(&statement, Some(20.0));
    assert_eq!(ratios, RatioSet::default());
    assert!(ratios.is_well_formed());
  }

  #[test]
  fn test_zero_shares_and_price() {
    let zero_shares = FinancialStatement { shares_outstanding: Some(0.0), ..scenario() };
    let ratios = normalize(&zero_shares, Some(20.0));
    assert_eq!(ratios.pe_ratio, None);
    assert_eq!(ratios.pb_ratio, None);
    assert_eq!(ratios.roe, Some(25.0));

    let ratios = normalize(&scenario(), Some(0.0));
    assert_eq!(ratios.pe_ratio, None);
  }

  #[test]
  fn test_negative_earnings_keep_negative_roe() {
    let statement = FinancialStatement { net_income: Some(-6.0), ..scenario() };
    let ratios = normalize(&statement, Some(20.0));
    assert_eq!(ratios.pe_ratio, None);
    assert_eq!(ratios.roe, Some(-10.0));
    assert_eq!(ratios.net_margin, Some(-6.0));
  }

  #[test]
  fn test_current_ratio_requires_breakdown() {
    let statement = FinancialStatement {
      current_assets: Some(150.0),
      current_liabilities: Some(100.0),
      ..scenario()
    };
    assert_eq!(normalize(&statement, None).current_ratio, Some(1.5));

    let partial = FinancialStatement { current_assets: Some(150.0), ..scenario() };
    assert_eq!(normalize(&partial, None).current_ratio, None);
  }

  #[test]
  fn test_non_finite_inputs_are_unavailable() {
    let statement = FinancialStatement {
      revenue: Some(f64::INFINITY),
      gross_profit: Some(f64::NAN),
      net_income: Some(f64::MAX),
      shareholders_equity: Some(f64::MIN_POSITIVE),
      ..Default::default()
    };
    let ratios = normalize(&statement, None);
    assert!(ratios.is_well_formed());
    assert_eq!(ratios.gross_margin, None);
    assert_eq!(ratios.roe, None);
  }
}
