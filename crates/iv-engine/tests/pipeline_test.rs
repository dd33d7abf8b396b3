//! End-to-end tests for the valuation pipeline

use chrono::NaiveDate;
use iv_core::test_utils::{assert_approx_eq, assert_some_approx_eq, DEFAULT_TOLERANCE, RATIO_TOLERANCE};
use iv_core::{BusinessCategory, EngineConfig, Recommendation, ValuationMethod, WeightTriple};
use iv_engine::{ValuationRequest, Valuator};
use iv_models::{FairValue, FinancialStatement, MethodEstimate, StatementField};

fn scenario_statement() -> FinancialStatement {
  FinancialStatement {
    revenue: Some(100.0),
    net_income: Some(15.0),
    shareholders_equity: Some(60.0),
    total_liabilities: Some(40.0),
    shares_outstanding: Some(10.0),
    ..FinancialStatement::new("ACME", NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
  }
}

fn full_statement(ticker: &str) -> FinancialStatement {
  FinancialStatement {
    revenue: Some(1_000.0),
    gross_profit: Some(450.0),
    operating_income: Some(180.0),
    net_income: Some(120.0),
    total_assets: Some(1_500.0),
    total_liabilities: Some(700.0),
    shareholders_equity: Some(800.0),
    operating_cash_flow: Some(200.0),
    capital_expenditures: Some(-60.0),
    shares_outstanding: Some(100.0),
    ..FinancialStatement::new(ticker, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap())
  }
}

fn valuator() -> Valuator {
  Valuator::new(EngineConfig::default()).unwrap()
}

#[test]
fn test_scenario_classifies_mature() {
  let result = valuator().value(&scenario_statement(), Some(20.0), None);

  assert_some_approx_eq(result.ratios.pe_ratio, 13.33, RATIO_TOLERANCE);
  assert_some_approx_eq(result.ratios.pb_ratio, 3.33, RATIO_TOLERANCE);
  assert_eq!(result.ratios.roe, Some(25.0));
  assert_some_approx_eq(result.ratios.debt_to_equity, 0.667, RATIO_TOLERANCE);

  // ROE of exactly 25 misses the growth rule and lands on the mature rule
  assert_eq!(result.category, BusinessCategory::MatureCompany);
  assert_eq!(result.classification_rule, "mature");
  assert_eq!(result.weights, WeightTriple::new(0.4, 0.4, 0.2));
}

#[test]
fn test_scenario_blends_available_methods() {
  let result = valuator().value(&scenario_statement(), Some(20.0), None);

  assert_eq!(result.estimates.dcf, MethodEstimate::missing(StatementField::FreeCashFlow));
  // net income 15 at the mature multiple of 12, over 10 shares
  assert_approx_eq(result.estimates.epv.value().unwrap(), 18.0, DEFAULT_TOLERANCE);
  assert_approx_eq(result.estimates.asset_based.value().unwrap(), 6.0, DEFAULT_TOLERANCE);

  let blend = result.fair_value.blend().unwrap();
  assert_eq!(blend.methods_used, 2);
  assert_approx_eq(blend.effective_weights.dcf, 0.0, DEFAULT_TOLERANCE);
  assert_approx_eq(blend.effective_weights.epv, 2.0 / 3.0, 1e-9);
  assert_approx_eq(blend.effective_weights.asset, 1.0 / 3.0, 1e-9);
  assert_approx_eq(blend.fair_value, 14.0, 1e-9);
  // -30% sits on the Sell/Avoid bound and falls to Avoid
  assert_eq!(blend.margin_of_safety_percent, Some(-30.0));
  assert_eq!(blend.recommendation, Some(Recommendation::Avoid));
}

#[test]
fn test_renormalization_with_one_method_missing() {
  let mut config = EngineConfig::default();
  config.weights.set(BusinessCategory::Default, WeightTriple::new(0.5, 0.3, 0.2));
  let valuator = Valuator::new(config).unwrap();

  // Negative equity removes the asset method only
  let statement = FinancialStatement {
    free_cash_flow: Some(50.0),
    operating_income: Some(40.0),
    shareholders_equity: Some(-10.0),
    shares_outstanding: Some(10.0),
    ..FinancialStatement::new("ZZZ", NaiveDate::from_ymd_opt(2024, 1, 31).unwrap())
  };
  let result = valuator.value(&statement, Some(50.0), None);
  assert_eq!(result.category, BusinessCategory::Default);
  assert!(!result.estimates.asset_based.is_available());

  let blend = result.fair_value.blend().unwrap();
  assert_approx_eq(blend.effective_weights.dcf, 0.625, DEFAULT_TOLERANCE);
  assert_approx_eq(blend.effective_weights.epv, 0.375, DEFAULT_TOLERANCE);

  let dcf = result.estimates.get(ValuationMethod::Dcf).value().unwrap();
  let epv = result.estimates.get(ValuationMethod::Epv).value().unwrap();
  assert_approx_eq(blend.fair_value, dcf * 0.625 + epv * 0.375, 1e-9);
}

#[test]
fn test_software_boundary_through_pipeline() {
  let statement = FinancialStatement {
    revenue: Some(100.0),
    gross_profit: Some(70.0),
    net_income: Some(20.0),
    shareholders_equity: Some(100.0),
    total_liabilities: Some(150.0),
    ..FinancialStatement::new("EDGE", NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
  };
  let result = valuator().value(&statement, None, None);
  assert_eq!(result.ratios.gross_margin, Some(70.0));
  assert_eq!(result.ratios.roe, Some(20.0));
  assert_ne!(result.category, BusinessCategory::EnterpriseSoftware);
  assert_eq!(result.category, BusinessCategory::Default);
}

#[test]
fn test_override_precedence() {
  // Ratios of a high-margin software company, ticker of a bank
  let statement = FinancialStatement {
    revenue: Some(100.0),
    gross_profit: Some(90.0),
    net_income: Some(40.0),
    shareholders_equity: Some(100.0),
    total_liabilities: Some(20.0),
    ..FinancialStatement::new("jpm", NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
  };
  let result = valuator().value(&statement, None, Some("Software"));
  assert_eq!(result.category, BusinessCategory::Bank);
  assert_eq!(result.classification_rule, "ticker_override");
  assert_eq!(result.weights, WeightTriple::new(0.1, 0.4, 0.5));

  let unlisted = FinancialStatement { ticker: Some("XYZ".to_string()), ..statement };
  let result = valuator().value(&unlisted, None, None);
  assert_eq!(result.category, BusinessCategory::EnterpriseSoftware);
}

#[test]
fn test_config_override_changes_category() {
  let config = EngineConfig::from_json_str(r#"{"ticker_overrides": {"acme": "DistressedCompany"}}"#).unwrap();
  let result = Valuator::new(config).unwrap().value(&scenario_statement(), Some(20.0), None);
  assert_eq!(result.category, BusinessCategory::DistressedCompany);
  assert_eq!(result.weights, WeightTriple::new(0.1, 0.2, 0.7));
}

#[test]
fn test_no_fair_value_is_distinct() {
  let statement = FinancialStatement {
    revenue: Some(50.0),
    net_income: Some(-5.0),
    operating_income: Some(-3.0),
    shareholders_equity: Some(-20.0),
    shares_outstanding: Some(10.0),
    ..FinancialStatement::new("LOSS", NaiveDate::from_ymd_opt(2023, 12, 31).unwrap())
  };
  let result = valuator().value(&statement, Some(4.0), None);
  assert_eq!(result.fair_value, FairValue::Unavailable);
  assert_eq!(result.fair_value_per_share(), None);
  assert_eq!(result.margin_of_safety_percent(), None);
  assert_eq!(result.recommendation(), None);

  let json = serde_json::to_value(&result).unwrap();
  assert_eq!(json["fair_value"]["status"], "unavailable");
}

#[test]
fn test_result_is_deterministic() {
  let valuator = valuator();
  let statement = full_statement("DET");
  let first = valuator.value(&statement, Some(25.0), None);
  for _ in 0..5 {
    assert_eq!(valuator.value(&statement, Some(25.0), None), first);
  }
}

#[test]
fn test_batch_keeps_input_order() {
  let tickers = ["AAA", "NVDA", "JPM", "BBB", "ORCL", "CCC", "META", "DDD"];
  let requests: Vec<ValuationRequest> = tickers
    .iter()
    .enumerate()
    .map(|(i, ticker)| ValuationRequest::new(full_statement(ticker), Some(10.0 + i as f64)))
    .collect();

  let valuator = valuator();
  let results = valuator.value_batch(&requests);
  assert_eq!(results.len(), tickers.len());
  for ((request, result), ticker) in requests.iter().zip(&results).zip(tickers) {
    assert_eq!(result.ticker.as_deref(), Some(ticker));
    assert_eq!(result, &valuator.value_request(request));
  }
  assert_eq!(results[1].category, BusinessCategory::AiSemiconductor);
  assert_eq!(results[2].category, BusinessCategory::Bank);
}

#[test]
fn test_result_serialization() {
  let result = valuator().value(&full_statement("SER"), Some(25.0), None);
  let json = serde_json::to_value(&result).unwrap();
  assert_eq!(json["key"]["ticker"], "SER");
  assert_eq!(json["key"]["period"], "2024-06-30");
  assert_eq!(json["category"], "Default");
  assert_eq!(json["estimates"]["dcf"]["status"], "available");
  assert_eq!(json["fair_value"]["status"], "estimated");
}
