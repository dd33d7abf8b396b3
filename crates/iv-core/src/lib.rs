//! Core types, policy constants and configuration shared by the iv-* crates.

pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{CategoryAssumptions, EngineConfig, SectorHint};
pub use error::{Error, Result};
pub use types::{
  BusinessCategory, CategoryTable, ClassifierThresholds, Recommendation,
  RecommendationThresholds, ValuationMethod, WeightTriple,
};

/// Allowed deviation of a weight triple's sum from 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Corporate tax rate applied to operating income in the EPV method
pub const DEFAULT_TAX_RATE: f64 = 0.21;

/// Number of explicitly projected years in the DCF method
pub const DEFAULT_PROJECTION_YEARS: u32 = 5;

/// Upper bound accepted for the DCF projection horizon
pub const MAX_PROJECTION_YEARS: u32 = 30;
