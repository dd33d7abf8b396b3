//! Flat statement row for CSV input
//!
//! One row carries a company's statement and its current price. Empty cells
//! are unavailable values, not zeroes.

use crate::statement::FinancialStatement;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatementRecord {
  pub ticker: String,
  pub period: Option<NaiveDate>,
  pub price: Option<f64>,
  pub company_name: Option<String>,
  pub sector: Option<String>,

  pub revenue: Option<f64>,
  pub gross_profit: Option<f64>,
  pub operating_income: Option<f64>,
  pub net_income: Option<f64>,

  pub total_assets: Option<f64>,
  pub total_liabilities: Option<f64>,
  pub shareholders_equity: Option<f64>,
  pub cash: Option<f64>,
  pub current_assets: Option<f64>,
  pub current_liabilities: Option<f64>,

  pub operating_cash_flow: Option<f64>,
  pub free_cash_flow: Option<f64>,
  pub capital_expenditures: Option<f64>,

  pub shares_outstanding: Option<f64>,
  pub market_capitalization: Option<f64>,
}

impl StatementRecord {
  /// Split the row into the statement and the current price
  pub fn into_parts(self) -> (FinancialStatement, Option<f64>) {
    let ticker = Some(self.ticker.trim().to_uppercase()).filter(|t| !t.is_empty());
    let blank_to_none = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

    let statement = FinancialStatement {
      ticker,
      period: self.period,
      company_name: blank_to_none(self.company_name),
      sector: blank_to_none(self.sector),
      revenue: self.revenue,
      gross_profit: self.gross_profit,
      operating_income: self.operating_income,
      net_income: self.net_income,
      total_assets: self.total_assets,
      total_liabilities: self.total_liabilities,
      shareholders_equity: self.shareholders_equity,
      cash: self.cash,
      current_assets: self.current_assets,
      current_liabilities: self.current_liabilities,
      operating_cash_flow: self.operating_cash_flow,
      free_cash_flow: self.free_cash_flow,
      capital_expenditures: self.capital_expenditures,
      shares_outstanding: self.shares_outstanding,
      market_capitalization: self.market_capitalization,
    };

    (statement, self.price)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const CSV: &str = "\
ticker,period,price,sector,revenue,net_income,shareholders_equity,total_liabilities,shares_outstanding
acme,2024-12-31,20,Industrials,100,15,60,40,10
EMPTY,,,,,,,,
";

  fn read_rows() -> Vec<StatementRecord> {
    let mut reader = csv::Reader::from_reader(CSV.as_bytes());
    reader.deserialize().collect::<Result<Vec<StatementRecord>, _>>().unwrap()
  }

  #[test]
  fn test_csv_row_into_parts() {
    let rows = read_rows();
    assert_eq!(rows.len(), 2);

    let (statement, price) = rows[0].clone().into_parts();
    assert_eq!(price, Some(20.0));
    assert_eq!(statement.ticker.as_deref(), Some("ACME"));
    assert_eq!(statement.period, NaiveDate::from_ymd_opt(2024, 12, 31));
    assert_eq!(statement.sector.as_deref(), Some("Industrials"));
    assert_eq!(statement.net_income, Some(15.0));
    assert_eq!(statement.gross_profit, None);
  }

  #[test]
  fn test_empty_cells_are_unavailable() {
    let rows = read_rows();
    let (statement, price) = rows[1].clone().into_parts();
    assert_eq!(price, None);
    assert_eq!(statement.period, None);
    assert_eq!(statement.sector, None);
    assert_eq!(statement.revenue, None);
    assert!(statement.key().is_none());
  }
}
