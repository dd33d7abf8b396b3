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

//! Valuation methods
//!
//! Each method returns a per-share [`MethodEstimate`] and degrades to
//! `Unavailable` on its own when its inputs are missing or non-positive.

use iv_core::CategoryAssumptions;
use iv_models::{FinancialStatement, MethodEstimate, RatioSet, StatementField, ValuationTriple};

/// Horizon and tax inputs shared by every category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodSettings {
  pub tax_rate: f64,
  pub projection_years: u32,
}

/// Check that a required input is present and positive
fn require_positive(value: Option<f64>, field: StatementField) -> Result<f64, MethodEstimate> {
  match value {
    None => Err(MethodEstimate::missing(field)),
    Some(v) if !v.is_finite() || v <= 0.0 => Err(MethodEstimate::non_positive(field)),
    Some(v) => Ok(v),
  }
}

/// Discounted cash flow per share.
///
/// Free cash flow grows at the category growth rate for `projection_years`,
/// each year discounted at the category discount rate, plus a Gordon terminal
/// value discounted from the last projected year.
pub fn dcf(
  statement: &FinancialStatement,
  assumptions: &CategoryAssumptions,
  projection_years: u32,
) -> MethodEstimate {
  let fcf = match require_positive(statement.free_cash_flow_or_derived(), StatementField::FreeCashFlow) {
    Ok(v) => v,
    Err(unavailable) => return unavailable,
  };
  let shares =
    match require_positive(statement.shares_outstanding, StatementField::SharesOutstanding) {
      Ok(v) => v,
      Err(unavailable) => return unavailable,
    };

  let growth = 1.0 + assumptions.growth_rate;
  let discount = 1.0 + assumptions.discount_rate;

  let mut present_value = 0.0;
  let mut projected = fcf;
  let mut discount_factor = 1.0;
  for _ in 0..projection_years {
    projected *= growth;
    discount_factor *= discount;
    present_value += projected / discount_factor;
  }

  let terminal_value = projected * (1.0 + assumptions.terminal_growth_rate)
    / (assumptions.discount_rate - assumptions.terminal_growth_rate);
  present_value += terminal_value / discount_factor;

  MethodEstimate::from_value(present_value / shares, StatementField::FreeCashFlow)
}

/// Earnings power value per share.
///
/// Operating income, capped at the category's sustainable operating margin when
/// one is configured, taxed and capitalized at the category multiple. Net income
/// stands in when operating income is not reported.
pub fn epv(
  statement: &FinancialStatement,
  ratios: &RatioSet,
  assumptions: &CategoryAssumptions,
  tax_rate: f64,
) -> MethodEstimate {
  let earning_power = match statement.operating_income {
    Some(operating_income) => {
      let operating_income =
        match require_positive(Some(operating_income), StatementField::OperatingIncome) {
          Ok(v) => v,
          Err(unavailable) => return unavailable,
        };
      let capped = match (assumptions.sustainable_operating_margin, ratios.operating_margin, statement.revenue) {
        (Some(cap), Some(margin), Some(revenue)) if margin > cap => revenue * cap / 100.0,
        _ => operating_income,
      };
      capped * (1.0 - tax_rate)
    }
    None => match require_positive(statement.net_income, StatementField::NetIncome) {
      Ok(v) => v,
      Err(unavailable) => return unavailable,
    },
  };

  let shares =
    match require_positive(statement.shares_outstanding, StatementField::SharesOutstanding) {
      Ok(v) => v,
      Err(unavailable) => return unavailable,
    };

  MethodEstimate::from_value(
    earning_power * assumptions.epv_multiple / shares,
    StatementField::OperatingIncome,
  )
}

/// Net assets per share after the category's intangible discount
pub fn asset_based(statement: &FinancialStatement, assumptions: &CategoryAssumptions) -> MethodEstimate {
  if let Some(equity) = statement.shareholders_equity {
    if !equity.is_finite() || equity <= 0.0 {
      return MethodEstimate::non_positive(StatementField::ShareholdersEquity);
    }
  }

  let net_assets = match statement.net_assets() {
    None => return MethodEstimate::missing(StatementField::ShareholdersEquity),
    Some(v) if !v.is_finite() || v <= 0.0 => {
      return MethodEstimate::non_positive(StatementField::TotalLiabilities)
    }
    Some(v) => v,
  };

  let shares =
    match require_positive(statement.shares_outstanding, StatementField::SharesOutstanding) {
      Ok(v) => v,
      Err(unavailable) => return unavailable,
    };

  MethodEstimate::from_value(
    net_assets / shares * (1.0 - assumptions.intangible_discount),
    StatementField::TotalAssets,
  )
}

/// Run all three methods with one category's assumptions
pub fn estimate(
  statement: &FinancialStatement,
  ratios: &RatioSet,
  assumptions: &CategoryAssumptions,
  settings: MethodSettings,
) -> ValuationTriple {
  ValuationTriple {
    dcf: dcf(statement, assumptions, settings.projection_years),
    epv: epv(statement, ratios, assumptions, settings.tax_rate),
    asset_based: asset_based(statement, assumptions),
  }
}
