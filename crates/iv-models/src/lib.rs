//! # iv-models
//!
//! Data models for the intrinsic value engine.
//!
//! - [`FinancialStatement`]: raw per-period facts for one company, every figure optional
//! - [`RatioSet`]: derived ratios, each either a finite number or unavailable
//! - [`ValuationResult`]: method estimates, blended fair value and recommendation
//! - [`fundamentals`]: provider-shaped fundamentals reports that convert into a statement
//! - [`StatementRecord`]: one flat row of a statement batch file
//!
//! ## Usage
//!
//! ```ignore
//! use iv_models::fundamentals::{BalanceSheet, CashFlow, IncomeStatement};
//! use iv_models::FinancialStatement;
//!
//! let income: IncomeStatement = serde_json::from_str(&income_json)?;
//! let balance: BalanceSheet = serde_json::from_str(&balance_json)?;
//! let cash_flow: CashFlow = serde_json::from_str(&cash_flow_json)?;
//! let statement = FinancialStatement::from_annual_reports(&income, &balance, &cash_flow, None);
//! ```

#![warn(clippy::all)]

pub mod fundamentals;
pub mod ratios;
pub mod record;
pub mod statement;
pub mod valuation;

pub use ratios::RatioSet;
pub use record::StatementRecord;
pub use statement::{FinancialStatement, StatementField, StatementKey};
pub use valuation::{
  Blend, FairValue, MethodEstimate, UnavailableReason, ValuationResult, ValuationTriple,
};
