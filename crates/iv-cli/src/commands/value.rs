use anyhow::{bail, Context, Result};
use clap::Args;
use iv_core::EngineConfig;
use iv_engine::Valuator;
use iv_models::fundamentals::{BalanceSheet, CashFlow, CompanyOverview, IncomeStatement};
use iv_models::FinancialStatement;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Clone, Debug)]
pub struct ValueArgs {
  /// Statement JSON file in the engine's own format
  #[arg(short, long, conflicts_with_all = ["income", "balance", "cash_flow", "overview"])]
  statement: Option<PathBuf>,

  /// Provider income statement JSON
  #[arg(long, requires_all = ["balance", "cash_flow"])]
  income: Option<PathBuf>,

  /// Provider balance sheet JSON
  #[arg(long)]
  balance: Option<PathBuf>,

  /// Provider cash flow JSON
  #[arg(long)]
  cash_flow: Option<PathBuf>,

  /// Provider company overview JSON, for name, sector and share count
  #[arg(long)]
  overview: Option<PathBuf>,

  /// Current market price per share
  #[arg(short, long)]
  price: Option<f64>,

  /// Ticker, replacing the one in the statement
  #[arg(short, long)]
  ticker: Option<String>,

  /// Company-name/sector hint for the classifier
  #[arg(long)]
  hint: Option<String>,

  /// Pretty-print the JSON result
  #[arg(long)]
  pretty: bool,
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  let content =
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
  serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

fn load_statement(args: &ValueArgs) -> Result<FinancialStatement> {
  if let Some(path) = &args.statement {
    return read_json(path);
  }

  match (&args.income, &args.balance, &args.cash_flow) {
    (Some(income), Some(balance), Some(cash_flow)) => {
      let income: IncomeStatement = read_json(income)?;
      let balance: BalanceSheet = read_json(balance)?;
      let cash_flow: CashFlow = read_json(cash_flow)?;
      let overview: Option<CompanyOverview> =
        args.overview.as_deref().map(read_json::<CompanyOverview>).transpose()?;
      Ok(FinancialStatement::from_annual_reports(&income, &balance, &cash_flow, overview.as_ref()))
    }
    _ => bail!("Provide --statement, or --income with --balance and --cash-flow"),
  }
}

pub fn execute(args: ValueArgs, config: EngineConfig) -> Result<()> {
  let mut statement = load_statement(&args)?;
  if let Some(ticker) = &args.ticker {
    statement.ticker = Some(ticker.trim().to_uppercase());
  }

  let valuator = Valuator::new(config).context("Invalid engine configuration")?;
  let result = valuator.value(&statement, args.price, args.hint.as_deref());
  info!(
    "{}: {} ({})",
    result.ticker.as_deref().unwrap_or("<unknown>"),
    result.category,
    result.recommendation().map(|r| r.to_string()).unwrap_or_else(|| "no recommendation".to_string())
  );

  let json = if args.pretty {
    serde_json::to_string_pretty(&result)?
  } else {
    serde_json::to_string(&result)?
  };
  println!("{}", json);

  Ok(())
}
