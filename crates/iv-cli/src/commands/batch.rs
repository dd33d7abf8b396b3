//! Value a CSV of statement rows in parallel
//!
//! Input columns follow [`StatementRecord`]; missing columns and empty cells
//! are unavailable values. Output is one summary row per input row, in order.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use csv::{Reader, Writer};
use iv_core::{BusinessCategory, EngineConfig};
use iv_engine::{ValuationRequest, Valuator};
use iv_models::{StatementRecord, ValuationResult};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Args, Clone, Debug)]
pub struct BatchArgs {
  /// CSV file of statement rows
  input: PathBuf,

  /// Write the summary CSV here instead of stdout
  #[arg(short, long)]
  output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
  ticker: Option<String>,
  period: Option<NaiveDate>,
  category: BusinessCategory,
  rule: String,
  price: Option<f64>,
  dcf: Option<f64>,
  epv: Option<f64>,
  asset_based: Option<f64>,
  fair_value: Option<f64>,
  margin_of_safety_percent: Option<f64>,
  recommendation: Option<String>,
}

impl From<&ValuationResult> for SummaryRow {
  fn from(result: &ValuationResult) -> Self {
    Self {
      ticker: result.ticker.clone(),
      period: result.key.as_ref().map(|key| key.period),
      category: result.category,
      rule: result.classification_rule.clone(),
      price: result.current_price,
      dcf: result.estimates.dcf.value(),
      epv: result.estimates.epv.value(),
      asset_based: result.estimates.asset_based.value(),
      fair_value: result.fair_value_per_share(),
      margin_of_safety_percent: result.margin_of_safety_percent(),
      recommendation: result.recommendation().map(|r| r.to_string()),
    }
  }
}

/// Parse statement rows into valuation requests
fn read_requests<R: Read>(input: R) -> Result<Vec<ValuationRequest>> {
  let mut reader = Reader::from_reader(input);

  let mut requests = Vec::new();
  for (line, result) in reader.deserialize().enumerate() {
    let record: StatementRecord =
      result.with_context(|| format!("Invalid statement row {}", line + 1))?;
    if record.ticker.trim().is_empty() {
      warn!("Row {} has no ticker", line + 1);
    }
    let (statement, price) = record.into_parts();
    requests.push(ValuationRequest::new(statement, price));
  }

  Ok(requests)
}

fn write_summary<W: Write>(output: W, results: &[ValuationResult]) -> Result<()> {
  let mut writer = Writer::from_writer(output);
  for result in results {
    writer.serialize(SummaryRow::from(result))?;
  }
  writer.flush()?;
  Ok(())
}

fn open_input(path: &Path) -> Result<File> {
  File::open(path).with_context(|| format!("Failed to open {}", path.display()))
}

pub fn execute(args: BatchArgs, config: EngineConfig) -> Result<()> {
  let requests = read_requests(open_input(&args.input)?)?;
  info!("Read {} statement rows from {}", requests.len(), args.input.display());

  let valuator = Valuator::new(config).context("Invalid engine configuration")?;
  let results = valuator.value_batch(&requests);

  match &args.output {
    Some(path) => {
      let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
      write_summary(file, &results)?;
      info!("Wrote {} summary rows to {}", results.len(), path.display());
    }
    None => write_summary(io::stdout().lock(), &results)?,
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const INPUT: &str = "\
ticker,period,price,revenue,net_income,shareholders_equity,total_liabilities,shares_outstanding
ACME,2024-12-31,20,100,15,60,40,10
LOSS,2024-12-31,4,50,-5,-20,80,10
";

  #[test]
  fn test_read_requests() {
    let requests = read_requests(INPUT.as_bytes()).unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].statement.ticker.as_deref(), Some("ACME"));
    assert_eq!(requests[0].price, Some(20.0));
    assert_eq!(requests[1].statement.net_income, Some(-5.0));
  }

  #[test]
  fn test_read_requests_rejects_bad_numbers() {
    let bad = "ticker,price\nACME,twenty\n";
    assert!(read_requests(bad.as_bytes()).is_err());
  }

  #[test]
  fn test_summary_rows() {
    let requests = read_requests(INPUT.as_bytes()).unwrap();
    let results = Valuator::new(EngineConfig::default()).unwrap().value_batch(&requests);

    let mut out = Vec::new();
    write_summary(&mut out, &results).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("ticker,period,category,rule,price"));
    assert!(lines[1].starts_with("ACME,2024-12-31,MatureCompany,mature,20.0"));
    // no method available: empty fair value and recommendation
    assert!(lines[2].starts_with("LOSS,2024-12-31,"));
    assert!(lines[2].ends_with(",,,,,"));
  }

  #[test]
  fn test_execute_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("statements.csv");
    let output = dir.path().join("summary.csv");
    File::create(&input).unwrap().write_all(INPUT.as_bytes()).unwrap();

    let args = BatchArgs { input, output: Some(output.clone()) };
    execute(args, EngineConfig::default()).unwrap();

    let summary = std::fs::read_to_string(output).unwrap();
    assert_eq!(summary.lines().count(), 3);
  }
}
