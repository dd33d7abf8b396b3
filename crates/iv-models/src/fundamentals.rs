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

//! Fundamentals reports in the market-data provider's JSON shape.
//!
//! The provider sends every amount as a string and uses `"None"` for a value it
//! does not have. Only the line items the valuation engine reads are modelled;
//! unknown keys are ignored.

use crate::statement::FinancialStatement;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parse a provider amount. `"None"`, `"-"`, empty and non-finite values are `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
  let trimmed = raw.trim();
  if trimmed.is_empty() || trimmed == "-" || trimmed.eq_ignore_ascii_case("none") {
    return None;
  }
  trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parse a provider `YYYY-MM-DD` date
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Company overview with descriptive fields and share data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyOverview {
  #[serde(rename = "Symbol")]
  pub symbol: String,

  #[serde(rename = "Name", default)]
  pub name: String,

  #[serde(rename = "Sector", default)]
  pub sector: String,

  /// Industry classification
  #[serde(rename = "Industry", default)]
  pub industry: String,

  #[serde(rename = "MarketCapitalization", default)]
  pub market_capitalization: String,

  #[serde(rename = "SharesOutstanding", default)]
  pub shares_outstanding: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatement {
  /// Stock symbol
  pub symbol: String,

  /// Annual reports, most recent first
  #[serde(rename = "annualReports", default)]
  pub annual_reports: Vec<IncomeStatementReport>,

  #[serde(rename = "quarterlyReports", default)]
  pub quarterly_reports: Vec<IncomeStatementReport>,
}

/// Individual income statement report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeStatementReport {
  /// Fiscal date ending
  #[serde(rename = "fiscalDateEnding")]
  pub fiscal_date_ending: String,

  #[serde(rename = "totalRevenue", default)]
  pub total_revenue: String,

  #[serde(rename = "grossProfit", default)]
  pub gross_profit: String,

  #[serde(rename = "operatingIncome", default)]
  pub operating_income: String,

  #[serde(rename = "netIncome", default)]
  pub net_income: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheet {
  pub symbol: String,

  #[serde(rename = "annualReports", default)]
  pub annual_reports: Vec<BalanceSheetReport>,

  #[serde(rename = "quarterlyReports", default)]
  pub quarterly_reports: Vec<BalanceSheetReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSheetReport {
  #[serde(rename = "fiscalDateEnding")]
  pub fiscal_date_ending: String,

  #[serde(rename = "totalAssets", default)]
  pub total_assets: String,

  #[serde(rename = "totalCurrentAssets", default)]
  pub total_current_assets: String,

  #[serde(rename = "cashAndCashEquivalentsAtCarryingValue", default)]
  pub cash_and_cash_equivalents_at_carrying_value: String,

  #[serde(rename = "totalLiabilities", default)]
  pub total_liabilities: String,

  #[serde(rename = "totalCurrentLiabilities", default)]
  pub total_current_liabilities: String,

  #[serde(rename = "totalShareholderEquity", default)]
  pub total_shareholder_equity: String,

  #[serde(rename = "commonStockSharesOutstanding", default)]
  pub common_stock_shares_outstanding: String,
}

/// Cash flow statement data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
  pub symbol: String,

  #[serde(rename = "annualReports", default)]
  pub annual_reports: Vec<CashFlowReport>,

  #[serde(rename = "quarterlyReports", default)]
  pub quarterly_reports: Vec<CashFlowReport>,
}

/// Individual cash flow report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowReport {
  #[serde(rename = "fiscalDateEnding")]
  pub fiscal_date_ending: String,

  #[serde(rename = "operatingCashflow", default)]
  pub operating_cashflow: String,

  #[serde(rename = "capitalExpenditures", default)]
  pub capital_expenditures: String,
}

impl FinancialStatement {
  /// Build a statement from the most recent annual income statement report,
  /// joined with the balance sheet and cash flow reports for the same fiscal date.
  ///
  /// A balance sheet or cash flow report with a different fiscal date is not
  /// mixed in; its fields stay `None`.
  pub fn from_annual_reports(
    income: &IncomeStatement,
    balance: &BalanceSheet,
    cash_flow: &CashFlow,
    overview: Option<&CompanyOverview>,
  ) -> Self {
    let latest = income.annual_reports.first();
    let fiscal_date = latest.map(|report| report.fiscal_date_ending.as_str());

    let balance_report =
      balance.annual_reports.iter().find(|report| Some(report.fiscal_date_ending.as_str()) == fiscal_date);
    let cash_flow_report = cash_flow
      .annual_reports
      .iter()
      .find(|report| Some(report.fiscal_date_ending.as_str()) == fiscal_date);

    let mut statement = FinancialStatement {
      ticker: Some(income.symbol.trim().to_uppercase()),
      period: fiscal_date.and_then(parse_date),
      ..Default::default()
    };

    if let Some(report) = latest {
      statement.revenue = parse_amount(&report.total_revenue);
      statement.gross_profit = parse_amount(&report.gross_profit);
      statement.operating_income = parse_amount(&report.operating_income);
      statement.net_income = parse_amount(&report.net_income);
    }

    if let Some(report) = balance_report {
      statement.total_assets = parse_amount(&report.total_assets);
      statement.total_liabilities = parse_amount(&report.total_liabilities);
      statement.shareholders_equity = parse_amount(&report.total_shareholder_equity);
      statement.cash = parse_amount(&report.cash_and_cash_equivalents_at_carrying_value);
      statement.current_assets = parse_amount(&report.total_current_assets);
      statement.current_liabilities = parse_amount(&report.total_current_liabilities);
      statement.shares_outstanding = parse_amount(&report.common_stock_shares_outstanding);
    }

    if let Some(report) = cash_flow_report {
      statement.operating_cash_flow = parse_amount(&report.operating_cashflow);
      statement.capital_expenditures = parse_amount(&report.capital_expenditures);
    }

    if let Some(overview) = overview {
      let non_empty = |s: &str| Some(s.trim().to_string()).filter(|s| !s.is_empty() && s.as_str() != "None");
      statement.company_name = non_empty(&overview.name);
      statement.sector = match (non_empty(&overview.sector), non_empty(&overview.industry)) {
        (Some(sector), Some(industry)) => Some(format!("{} / {}", sector, industry)),
        (sector, industry) => sector.or(industry),
      };
      statement.market_capitalization = parse_amount(&overview.market_capitalization);
      if statement.shares_outstanding.is_none() {
        statement.shares_outstanding = parse_amount(&overview.shares_outstanding);
      }
    }

    statement
  }
}
