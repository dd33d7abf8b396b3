use anyhow::Result;
use clap::Args;
use iv_core::{BusinessCategory, CategoryAssumptions, EngineConfig, WeightTriple};
use serde::Serialize;

#[derive(Args, Clone, Debug)]
pub struct CategoriesArgs {
  /// Print as JSON instead of a table
  #[arg(long)]
  json: bool,
}

#[derive(Debug, Serialize)]
struct CategoryRow {
  category: BusinessCategory,
  label: &'static str,
  weights: WeightTriple,
  assumptions: CategoryAssumptions,
  override_tickers: Vec<String>,
}

fn rows(config: &EngineConfig) -> Vec<CategoryRow> {
  BusinessCategory::ALL
    .iter()
    .map(|&category| CategoryRow {
      category,
      label: category.label(),
      weights: config.weights_for(category),
      assumptions: *config.assumptions_for(category),
      override_tickers: config
        .ticker_overrides
        .iter()
        .filter(|(_, c)| **c == category)
        .map(|(ticker, _)| ticker.clone())
        .collect(),
    })
    .collect()
}

fn percent(value: f64) -> String {
  format!("{:.1}%", value * 100.0)
}

pub fn execute(args: CategoriesArgs, config: EngineConfig) -> Result<()> {
  let rows = rows(&config);

  if args.json {
    println!("{}", serde_json::to_string_pretty(&rows)?);
    return Ok(());
  }

  println!(
    "{:<22} {:>5} {:>5} {:>5} {:>7} {:>7} {:>7} {:>6} {:>7} {:>6}",
    "Category", "DCF", "EPV", "Asset", "Growth", "Disc.", "Term.", "Mult.", "MgnCap", "Intang"
  );
  for row in &rows {
    let a = &row.assumptions;
    println!(
      "{:<22} {:>5.2} {:>5.2} {:>5.2} {:>7} {:>7} {:>7} {:>6.1} {:>7} {:>6}",
      row.label,
      row.weights.dcf,
      row.weights.epv,
      row.weights.asset,
      percent(a.growth_rate),
      percent(a.discount_rate),
      percent(a.terminal_growth_rate),
      a.epv_multiple,
      a.sustainable_operating_margin.map(|m| format!("{:.0}%", m)).unwrap_or_else(|| "-".to_string()),
      percent(a.intangible_discount),
    );
    if !row.override_tickers.is_empty() {
      println!("{:<22} overrides: {}", "", row.override_tickers.join(", "));
    }
  }
  println!("\nTax rate {}, {} projection years", percent(config.tax_rate), config.projection_years);

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rows_cover_every_category() {
    let rows = rows(&EngineConfig::default());
    assert_eq!(rows.len(), BusinessCategory::COUNT);

    let bank = rows.iter().find(|r| r.category == BusinessCategory::Bank).unwrap();
    assert!(bank.override_tickers.contains(&"JPM".to_string()));
    assert!(rows.iter().all(|r| r.weights.is_normalized(iv_core::WEIGHT_SUM_TOLERANCE)));
  }

  #[test]
  fn test_rows_serialize() {
    let json = serde_json::to_value(rows(&EngineConfig::default())).unwrap();
    assert_eq!(json[0]["category"], "Default");
    assert_eq!(json[0]["weights"]["dcf"], 0.4);
  }
}
