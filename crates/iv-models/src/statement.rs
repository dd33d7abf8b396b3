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

//! Per-period financial statement facts for one company

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identity of a recorded statement: one company, one fiscal period
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StatementKey {
  pub ticker: String,

  /// Fiscal date ending
  pub period: NaiveDate,
}

impl std::fmt::Display for StatementKey {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}@{}", self.ticker, self.period)
  }
}

/// Raw facts for one company and period.
///
/// Every figure is optional: a missing value degrades only the ratios and
/// valuation methods that need it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialStatement {
  pub ticker: Option<String>,

  /// Fiscal date ending
  pub period: Option<NaiveDate>,

  pub company_name: Option<String>,

  /// Free-form sector/industry text, used as a classification hint
  pub sector: Option<String>,

  // Income statement
  pub revenue: Option<f64>,
  pub gross_profit: Option<f64>,
  pub operating_income: Option<f64>,
  pub net_income: Option<f64>,

  // Balance sheet
  pub total_assets: Option<f64>,
  pub total_liabilities: Option<f64>,
  pub shareholders_equity: Option<f64>,
  pub cash: Option<f64>,
  pub current_assets: Option<f64>,
  pub current_liabilities: Option<f64>,

  // Cash flow statement
  pub operating_cash_flow: Option<f64>,
  pub free_cash_flow: Option<f64>,
  pub capital_expenditures: Option<f64>,

  // Market data
  pub shares_outstanding: Option<f64>,
  pub market_capitalization: Option<f64>,
}

/// Names of the statement inputs, used to report why a value is unavailable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementField {
  Revenue,
  GrossProfit,
  OperatingIncome,
  NetIncome,
  TotalAssets,
  TotalLiabilities,
  ShareholdersEquity,
  FreeCashFlow,
  SharesOutstanding,
}

impl std::fmt::Display for StatementField {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      StatementField::Revenue => write!(f, "revenue"),
      StatementField::GrossProfit => write!(f, "gross_profit"),
      StatementField::OperatingIncome => write!(f, "operating_income"),
      StatementField::NetIncome => write!(f, "net_income"),
      StatementField::TotalAssets => write!(f, "total_assets"),
      StatementField::TotalLiabilities => write!(f, "total_liabilities"),
      StatementField::ShareholdersEquity => write!(f, "shareholders_equity"),
      StatementField::FreeCashFlow => write!(f, "free_cash_flow"),
      StatementField::SharesOutstanding => write!(f, "shares_outstanding"),
    }
  }
}

impl FinancialStatement {
  pub fn new(ticker: &str, period: NaiveDate) -> Self {
    Self { ticker: Some(ticker.trim().to_uppercase()), period: Some(period), ..Self::default() }
  }

  /// `(ticker, period)` when both are known
  pub fn key(&self) -> Option<StatementKey> {
    match (&self.ticker, self.period) {
      (Some(ticker), Some(period)) => Some(StatementKey { ticker: ticker.clone(), period }),
      _ => None,
    }
  }

  /// Reported free cash flow, else operating cash flow less capital expenditures.
  ///
  /// Providers report capex with either sign, so its magnitude is subtracted.
  pub fn free_cash_flow_or_derived(&self) -> Option<f64> {
    self.free_cash_flow.or_else(|| match (self.operating_cash_flow, self.capital_expenditures) {
      (Some(ocf), Some(capex)) => Some(ocf - capex.abs()),
      _ => None,
    })
  }

  /// Net assets: total assets less total liabilities, else reported equity
  pub fn net_assets(&self) -> Option<f64> {
    match (self.total_assets, self.total_liabilities) {
      (Some(assets), Some(liabilities)) => Some(assets - liabilities),
      _ => self.shareholders_equity,
    }
  }
}
