//! # iv-engine
//!
//! Valuation pipeline for one company's financial statement:
//!
//! - [`normalizer`] derives the ratio set
//! - [`classifier`] picks the business category
//! - [`valuation`] runs DCF, earnings power and asset-based methods
//! - [`blender`] blends them into a fair value, margin of safety and recommendation
//!
//! [`Valuator`] ties the stages together.

pub mod blender;
pub mod classifier;
pub mod normalizer;
pub mod valuation;
pub mod valuator;

// Re-export commonly used types
pub use blender::{blend, effective_weights, margin_of_safety, recommend};
pub use classifier::{default_rules, Classification, ClassificationRule, Classifier};
pub use normalizer::normalize;
pub use valuation::MethodSettings;
pub use valuator::{ValuationRequest, Valuator};

// Prelude for convenient imports
pub mod prelude {
  pub use crate::{Classification, Classifier, ValuationRequest, Valuator};
  pub use iv_core::{BusinessCategory, EngineConfig, Recommendation, WeightTriple};
  pub use iv_models::{FairValue, FinancialStatement, RatioSet, ValuationResult};
}
