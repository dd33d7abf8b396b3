//! Configuration for the valuation engine
//!
//! [`EngineConfig`] carries every lookup table and policy number the pipeline
//! reads. The built-in defaults can be overridden from a JSON file; every load
//! path ends in [`EngineConfig::validate`], so a broken table fails at startup
//! instead of on a request.

use crate::error::{Error, Result};
use crate::types::{
  BusinessCategory, CategoryTable, ClassifierThresholds, RecommendationThresholds, WeightTriple,
};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Valuation assumptions owned by one business category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryAssumptions {
  /// Annual free cash flow growth during the projection years
  pub growth_rate: f64,

  /// Discount rate applied to projected cash flows
  pub discount_rate: f64,

  /// Perpetual growth after the projection years
  pub terminal_growth_rate: f64,

  /// Multiple applied to after-tax earning power
  pub epv_multiple: f64,

  /// Operating margin (%) the category can sustain; higher reported margins are capped to it
  #[serde(default)]
  pub sustainable_operating_margin: Option<f64>,

  /// Haircut applied to book value per share, 0.0 = none
  #[serde(default)]
  pub intangible_discount: f64,
}

impl CategoryAssumptions {
  fn new(growth_rate: f64, discount_rate: f64, terminal_growth_rate: f64, epv_multiple: f64) -> Self {
    Self {
      growth_rate,
      discount_rate,
      terminal_growth_rate,
      epv_multiple,
      sustainable_operating_margin: None,
      intangible_discount: 0.0,
    }
  }

  fn with_margin_cap(mut self, margin: f64) -> Self {
    self.sustainable_operating_margin = Some(margin);
    self
  }

  fn check(&self, category: BusinessCategory) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidAssumption { category, reason: reason.to_string() };

    let numbers =
      [self.growth_rate, self.discount_rate, self.terminal_growth_rate, self.epv_multiple];
    if numbers.iter().any(|n| !n.is_finite()) {
      return Err(invalid("assumptions must be finite"));
    }
    if self.growth_rate <= -1.0 {
      return Err(invalid("growth_rate must be greater than -1"));
    }
    if self.terminal_growth_rate <= -1.0 {
      return Err(invalid("terminal_growth_rate must be greater than -1"));
    }
    if self.discount_rate <= 0.0 {
      return Err(invalid("discount_rate must be positive"));
    }
    if self.discount_rate <= self.terminal_growth_rate {
      return Err(invalid("discount_rate must exceed terminal_growth_rate"));
    }
    if self.epv_multiple <= 0.0 {
      return Err(invalid("epv_multiple must be positive"));
    }
    if !(0.0..1.0).contains(&self.intangible_discount) {
      return Err(invalid("intangible_discount must be in [0, 1)"));
    }
    if let Some(margin) = self.sustainable_operating_margin {
      if !(margin > 0.0 && margin <= 100.0) {
        return Err(invalid("sustainable_operating_margin must be in (0, 100]"));
      }
    }
    Ok(())
  }
}

/// Keyword in a company-name/sector hint that selects a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorHint {
  pub keyword: String,
  pub category: BusinessCategory,
}

impl SectorHint {
  pub fn new(keyword: &str, category: BusinessCategory) -> Self {
    Self { keyword: keyword.to_lowercase(), category }
  }
}

/// Main configuration struct for the valuation engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
  /// Ticker to category overrides, keys upper-case
  pub ticker_overrides: BTreeMap<String, BusinessCategory>,

  /// Ordered keyword table consulted when a sector hint is supplied
  pub sector_hints: Vec<SectorHint>,

  /// Blend weights per category
  pub weights: CategoryTable<WeightTriple>,

  /// DCF/EPV/asset assumptions per category
  pub assumptions: CategoryTable<CategoryAssumptions>,

  pub classifier: ClassifierThresholds,

  pub recommendation: RecommendationThresholds,

  /// Tax rate applied to operating income in the EPV method
  pub tax_rate: f64,

  /// Explicitly projected years in the DCF method
  pub projection_years: u32,
}

/// Subset of [`EngineConfig`] read from a JSON file. Entries replace the
/// default for the same key.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigOverrides {
  pub ticker_overrides: BTreeMap<String, BusinessCategory>,
  pub sector_hints: Option<Vec<SectorHint>>,
  pub weights: HashMap<BusinessCategory, WeightTriple>,
  pub assumptions: HashMap<BusinessCategory, CategoryAssumptions>,
  pub classifier: Option<ClassifierThresholds>,
  pub recommendation: Option<RecommendationThresholds>,
  pub tax_rate: Option<f64>,
  pub projection_years: Option<u32>,
}

fn default_weights(category: BusinessCategory) -> WeightTriple {
  use BusinessCategory::*;
  match category {
    Default => WeightTriple::new(0.4, 0.4, 0.2),
    GrowthCompany => WeightTriple::new(0.6, 0.3, 0.1),
    MatureCompany => WeightTriple::new(0.4, 0.4, 0.2),
    AssetHeavy => WeightTriple::new(0.2, 0.3, 0.5),
    DistressedCompany => WeightTriple::new(0.1, 0.2, 0.7),
    Bank => WeightTriple::new(0.1, 0.4, 0.5),
    AiSemiconductor => WeightTriple::new(0.7, 0.25, 0.05),
    EnterpriseSoftware => WeightTriple::new(0.6, 0.35, 0.05),
    CloudInfrastructure => WeightTriple::new(0.65, 0.3, 0.05),
    PlatformTech => WeightTriple::new(0.55, 0.4, 0.05),
    BiotechPharma => WeightTriple::new(0.6, 0.2, 0.2),
    FinTech => WeightTriple::new(0.5, 0.4, 0.1),
  }
}

fn default_assumptions(category: BusinessCategory) -> CategoryAssumptions {
  use BusinessCategory::*;
  match category {
    Default => CategoryAssumptions::new(0.05, 0.10, 0.025, 10.0),
    GrowthCompany => CategoryAssumptions::new(0.12, 0.11, 0.03, 15.0),
    MatureCompany => CategoryAssumptions::new(0.04, 0.09, 0.02, 12.0),
    AssetHeavy => CategoryAssumptions::new(0.03, 0.10, 0.02, 8.0).with_margin_cap(15.0),
    DistressedCompany => CategoryAssumptions::new(0.0, 0.14, 0.01, 5.0).with_margin_cap(10.0),
    Bank => CategoryAssumptions::new(0.04, 0.10, 0.02, 10.0),
    AiSemiconductor => CategoryAssumptions::new(0.20, 0.12, 0.035, 25.0),
    EnterpriseSoftware => CategoryAssumptions::new(0.12, 0.10, 0.03, 20.0).with_margin_cap(40.0),
    CloudInfrastructure => CategoryAssumptions::new(0.15, 0.11, 0.03, 20.0),
    PlatformTech => CategoryAssumptions::new(0.12, 0.10, 0.03, 18.0),
    BiotechPharma => CategoryAssumptions::new(0.15, 0.12, 0.03, 18.0),
    FinTech => CategoryAssumptions::new(0.12, 0.11, 0.03, 16.0),
  }
}

fn default_ticker_overrides() -> BTreeMap<String, BusinessCategory> {
  use BusinessCategory::*;
  [
    ("NVDA", AiSemiconductor),
    ("AMD", AiSemiconductor),
    ("AVGO", AiSemiconductor),
    ("TSM", AiSemiconductor),
    ("ORCL", EnterpriseSoftware),
    ("MSFT", EnterpriseSoftware),
    ("CRM", EnterpriseSoftware),
    ("ADBE", EnterpriseSoftware),
    ("SAP", EnterpriseSoftware),
    ("GOOGL", PlatformTech),
    ("GOOG", PlatformTech),
    ("META", PlatformTech),
    ("AMZN", CloudInfrastructure),
    ("SNOW", CloudInfrastructure),
    ("NET", CloudInfrastructure),
    ("JPM", Bank),
    ("BAC", Bank),
    ("WFC", Bank),
    ("C", Bank),
    ("PYPL", FinTech),
    ("SQ", FinTech),
    ("V", FinTech),
    ("MA", FinTech),
    ("LLY", BiotechPharma),
    ("PFE", BiotechPharma),
    ("MRNA", BiotechPharma),
    ("AMGN", BiotechPharma),
  ]
  .into_iter()
  .map(|(ticker, category)| (ticker.to_string(), category))
  .collect()
}

fn default_sector_hints() -> Vec<SectorHint> {
  use BusinessCategory::*;
  vec![
    SectorHint::new("fintech", FinTech),
    SectorHint::new("payment", FinTech),
    SectorHint::new("bank", Bank),
    SectorHint::new("semiconductor", AiSemiconductor),
    SectorHint::new("biotech", BiotechPharma),
    SectorHint::new("pharma", BiotechPharma),
    SectorHint::new("cloud", CloudInfrastructure),
    SectorHint::new("software", EnterpriseSoftware),
  ]
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self {
      ticker_overrides: default_ticker_overrides(),
      sector_hints: default_sector_hints(),
      weights: CategoryTable::from_fn(default_weights),
      assumptions: CategoryTable::from_fn(default_assumptions),
      classifier: ClassifierThresholds::default(),
      recommendation: RecommendationThresholds::default(),
      tax_rate: crate::DEFAULT_TAX_RATE,
      projection_years: crate::DEFAULT_PROJECTION_YEARS,
    }
  }
}

impl EngineConfig {
  /// Load configuration from environment variables.
  ///
  /// `IV_CONFIG_PATH` names an optional JSON override file; `IV_TAX_RATE` and
  /// `IV_PROJECTION_YEARS` override the scalars on top of it.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let mut config = match env::var("IV_CONFIG_PATH") {
      Ok(path) => Self::from_file(path)?,
      Err(_) => Self::default(),
    };

    if let Ok(raw) = env::var("IV_TAX_RATE") {
      config.tax_rate =
        raw.parse().map_err(|_| Error::Config("Invalid IV_TAX_RATE".to_string()))?;
    }

    if let Ok(raw) = env::var("IV_PROJECTION_YEARS") {
      config.projection_years =
        raw.parse().map_err(|_| Error::Config("Invalid IV_PROJECTION_YEARS".to_string()))?;
    }

    config.validate()?;
    Ok(config)
  }

  /// Load the defaults with overrides from a JSON file
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    info!("Loading engine configuration overrides from {}", path.display());
    Self::from_json_str(&content)
  }

  /// Load the defaults with overrides from a JSON document
  pub fn from_json_str(json: &str) -> Result<Self> {
    let overrides: ConfigOverrides = serde_json::from_str(json)?;
    let mut config = Self::default();
    config.apply(overrides);
    config.validate()?;
    Ok(config)
  }

  /// Merge overrides into this configuration without validating
  pub fn apply(&mut self, overrides: ConfigOverrides) {
    for (ticker, category) in overrides.ticker_overrides {
      debug!("Ticker override {} -> {:?}", ticker, category);
      self.ticker_overrides.insert(ticker.trim().to_uppercase(), category);
    }

    if let Some(hints) = overrides.sector_hints {
      self.sector_hints =
        hints.into_iter().map(|hint| SectorHint::new(&hint.keyword, hint.category)).collect();
    }

    for (category, weights) in overrides.weights {
      self.weights.set(category, weights);
    }

    for (category, assumptions) in overrides.assumptions {
      self.assumptions.set(category, assumptions);
    }

    if let Some(classifier) = overrides.classifier {
      self.classifier = classifier;
    }

    if let Some(recommendation) = overrides.recommendation {
      self.recommendation = recommendation;
    }

    if let Some(tax_rate) = overrides.tax_rate {
      self.tax_rate = tax_rate;
    }

    if let Some(projection_years) = overrides.projection_years {
      self.projection_years = projection_years;
    }
  }

  /// Check every table and policy number
  pub fn validate(&self) -> Result<()> {
    for (category, weights) in self.weights.iter() {
      if !weights.is_normalized(crate::WEIGHT_SUM_TOLERANCE) {
        return Err(Error::InvalidWeights { category, sum: weights.sum() });
      }
    }

    for (category, assumptions) in self.assumptions.iter() {
      assumptions.check(category)?;
    }

    if !(0.0..1.0).contains(&self.tax_rate) {
      return Err(Error::Config(format!("tax_rate {} must be in [0, 1)", self.tax_rate)));
    }

    if self.projection_years == 0 || self.projection_years > crate::MAX_PROJECTION_YEARS {
      return Err(Error::Config(format!(
        "projection_years {} must be in 1..={}",
        self.projection_years,
        crate::MAX_PROJECTION_YEARS
      )));
    }

    if !self.recommendation.is_ordered() {
      return Err(Error::Config("recommendation thresholds must be strictly descending".to_string()));
    }

    if self.sector_hints.iter().any(|hint| hint.keyword.trim().is_empty()) {
      return Err(Error::Config("sector hint keywords must not be empty".to_string()));
    }

    Ok(())
  }

  /// Category forced for a ticker, if any
  pub fn category_override(&self, ticker: &str) -> Option<BusinessCategory> {
    self.ticker_overrides.get(&ticker.trim().to_uppercase()).copied()
  }

  pub fn weights_for(&self, category: BusinessCategory) -> WeightTriple {
    *self.weights.get(category)
  }

  pub fn assumptions_for(&self, category: BusinessCategory) -> &CategoryAssumptions {
    self.assumptions.get(category)
  }
}
