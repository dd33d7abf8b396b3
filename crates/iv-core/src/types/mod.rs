//! Common types used across iv-* crates

pub mod category;
pub mod recommendation;
pub mod thresholds;

pub use category::{BusinessCategory, CategoryTable, ValuationMethod, WeightTriple};
pub use recommendation::Recommendation;
pub use thresholds::{ClassifierThresholds, RecommendationThresholds};
