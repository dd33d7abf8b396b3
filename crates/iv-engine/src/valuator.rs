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

//! Valuation pipeline orchestration
//!
//! [`Valuator`] holds a validated [`EngineConfig`] and runs
//! normalizer, classifier, valuation methods and blender for one company, or
//! for many in parallel.

use crate::blender;
use crate::classifier::Classifier;
use crate::normalizer;
use crate::valuation::{self, MethodSettings};
use iv_core::{EngineConfig, Result};
use iv_models::{FairValue, FinancialStatement, ValuationResult};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// One company to value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValuationRequest {
  pub statement: FinancialStatement,
  pub price: Option<f64>,
  /// Company-name/sector hint; `None` skips the hint rule
  pub hint: Option<String>,
}

impl ValuationRequest {
  pub fn new(statement: FinancialStatement, price: Option<f64>) -> Self {
    Self { statement, price, hint: None }
  }

  pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
    self.hint = Some(hint.into());
    self
  }
}

#[derive(Debug, Clone)]
pub struct Valuator {
  config: EngineConfig,
  classifier: Classifier,
}

impl Valuator {
  /// Validate the configuration and build the pipeline
  pub fn new(config: EngineConfig) -> Result<Self> {
    config.validate()?;
    let classifier = Classifier::new(&config);
    Ok(Self { config, classifier })
  }

  pub fn config(&self) -> &EngineConfig {
    &self.config
  }

  pub fn classifier(&self) -> &Classifier {
    &self.classifier
  }

  /// Value one company
  pub fn value(
    &self,
    statement: &FinancialStatement,
    price: Option<f64>,
    hint: Option<&str>,
  ) -> ValuationResult {
    let ticker = statement.ticker.as_deref();
    let label = ticker.unwrap_or("<unknown>");

    let ratios = normalizer::normalize(statement, price);

    let classification = self.classifier.classify(ticker, &ratios, hint);
    let category = classification.category;

    let settings = MethodSettings {
      tax_rate: self.config.tax_rate,
      projection_years: self.config.projection_years,
    };
    let estimates =
      valuation::estimate(statement, &ratios, self.config.assumptions_for(category), settings);
    debug!("{} estimates: {:?}", label, estimates);

    let weights = self.config.weights_for(category);
    let fair_value = blender::blend(&estimates, weights, price, &self.config.recommendation);

    match &fair_value {
      FairValue::Estimated(blend) => info!(
        "Valued {} as {}: fair value {:.2} from {} method(s), margin of safety {}",
        label,
        category,
        blend.fair_value,
        blend.methods_used,
        blend
          .margin_of_safety_percent
          .map(|mos| format!("{:.1}%", mos))
          .unwrap_or_else(|| "n/a".to_string())
      ),
      FairValue::Unavailable => {
        warn!("No fair value available for {}: no valuation method could be computed", label)
      }
    }

    ValuationResult {
      key: statement.key(),
      ticker: statement.ticker.clone(),
      current_price: price,
      category,
      classification_rule: classification.rule,
      weights,
      ratios,
      estimates,
      fair_value,
    }
  }

  pub fn value_request(&self, request: &ValuationRequest) -> ValuationResult {
    self.value(&request.statement, request.price, request.hint.as_deref())
  }

  /// Value many companies in parallel. Results keep the input order.
  pub fn value_batch(&self, requests: &[ValuationRequest]) -> Vec<ValuationResult> {
    info!("Valuing {} companies", requests.len());
    let results: Vec<ValuationResult> =
      requests.par_iter().map(|request| self.value_request(request)).collect();

    let unavailable = results.iter().filter(|r| r.fair_value == FairValue::Unavailable).count();
    if unavailable > 0 {
      warn!("{} of {} companies have no fair value", unavailable, results.len());
    }
    results
  }
}
