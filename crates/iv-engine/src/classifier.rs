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

//! Business classifier
//!
//! An ordered decision list; the first entry that matches decides the category:
//!
//! 1. ticker override table
//! 2. sector hint keywords, only when a hint is supplied
//! 3. ratio rules from [`default_rules`], in order
//! 4. fallback to [`BusinessCategory::Default`]
//!
//! A ratio rule never matches on an unavailable ratio.

use iv_core::{BusinessCategory, ClassifierThresholds, EngineConfig, SectorHint};
use iv_models::RatioSet;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

pub const OVERRIDE_RULE: &str = "ticker_override";
pub const SECTOR_HINT_RULE: &str = "sector_hint";
pub const FALLBACK_RULE: &str = "fallback";

pub type RulePredicate = fn(&RatioSet, &ClassifierThresholds) -> bool;

/// One ratio-based entry of the decision list
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
  pub name: &'static str,
  pub category: BusinessCategory,
  pub predicate: RulePredicate,
}

impl ClassificationRule {
  pub fn matches(&self, ratios: &RatioSet, thresholds: &ClassifierThresholds) -> bool {
    (self.predicate)(ratios, thresholds)
  }
}

fn above(value: Option<f64>, bound: f64) -> bool {
  value.is_some_and(|v| v > bound)
}

fn below(value: Option<f64>, bound: f64) -> bool {
  value.is_some_and(|v| v < bound)
}

fn high_margin_software(r: &RatioSet, t: &ClassifierThresholds) -> bool {
  above(r.gross_margin, t.software_min_gross_margin) && above(r.roe, t.software_min_roe)
}

fn asset_heavy(r: &RatioSet, t: &ClassifierThresholds) -> bool {
  above(r.debt_to_equity, t.asset_heavy_min_debt_to_equity)
    && below(r.gross_margin, t.asset_heavy_max_gross_margin)
}

fn high_growth(r: &RatioSet, t: &ClassifierThresholds) -> bool {
  above(r.roe, t.growth_min_roe) && above(r.gross_margin, t.growth_min_gross_margin)
}

fn mature(r: &RatioSet, t: &ClassifierThresholds) -> bool {
  above(r.roe, t.mature_min_roe) && below(r.debt_to_equity, t.mature_max_debt_to_equity)
}

/// The ratio rules in precedence order
pub fn default_rules() -> Vec<ClassificationRule> {
  vec![
    ClassificationRule {
      name: "high_margin_software",
      category: BusinessCategory::EnterpriseSoftware,
      predicate: high_margin_software,
    },
    ClassificationRule {
      name: "asset_heavy",
      category: BusinessCategory::AssetHeavy,
      predicate: asset_heavy,
    },
    ClassificationRule {
      name: "high_growth",
      category: BusinessCategory::GrowthCompany,
      predicate: high_growth,
    },
    ClassificationRule { name: "mature", category: BusinessCategory::MatureCompany, predicate: mature },
  ]
}

/// Selected category and the rule that selected it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
  pub category: BusinessCategory,
  pub rule: String,
}

impl Classification {
  fn new(category: BusinessCategory, rule: &str) -> Self {
    Self { category, rule: rule.to_string() }
  }
}

#[derive(Debug, Clone)]
pub struct Classifier {
  overrides: BTreeMap<String, BusinessCategory>,
  sector_hints: Vec<SectorHint>,
  thresholds: ClassifierThresholds,
  rules: Vec<ClassificationRule>,
}

impl Classifier {
  pub fn new(config: &EngineConfig) -> Self {
    Self::with_rules(config, default_rules())
  }

  /// Classifier with a custom ratio rule list
  pub fn with_rules(config: &EngineConfig, rules: Vec<ClassificationRule>) -> Self {
    Self {
      overrides: config.ticker_overrides.clone(),
      sector_hints: config.sector_hints.clone(),
      thresholds: config.classifier,
      rules,
    }
  }

  pub fn rules(&self) -> &[ClassificationRule] {
    &self.rules
  }

  pub fn classify(
    &self,
    ticker: Option<&str>,
    ratios: &RatioSet,
    hint: Option<&str>,
  ) -> Classification {
    let classification = self.decide(ticker, ratios, hint);
    debug!(
      "Classified {} as {} by rule {}",
      ticker.unwrap_or("<unknown>"),
      classification.category,
      classification.rule
    );
    classification
  }

  fn decide(&self, ticker: Option<&str>, ratios: &RatioSet, hint: Option<&str>) -> Classification {
    if let Some(category) =
      ticker.and_then(|t| self.overrides.get(&t.trim().to_uppercase()).copied())
    {
      return Classification::new(category, OVERRIDE_RULE);
    }

    if let Some(hint) = hint {
      let hint = hint.to_lowercase();
      if let Some(matched) = self.sector_hints.iter().find(|h| hint.contains(&h.keyword)) {
        return Classification::new(matched.category, SECTOR_HINT_RULE);
      }
    }

    self
      .rules
      .iter()
      .find(|rule| rule.matches(ratios, &self.thresholds))
      .map(|rule| Classification::new(rule.category, rule.name))
      .unwrap_or_else(|| Classification::new(BusinessCategory::Default, FALLBACK_RULE))
  }
}
