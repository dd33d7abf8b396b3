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

//! Business categories, the per-category lookup table and valuation weight triples.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// Business-model classification used to select valuation assumptions and weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BusinessCategory {
  Default,
  GrowthCompany,
  MatureCompany,
  AssetHeavy,
  DistressedCompany,
  Bank,
  AiSemiconductor,
  EnterpriseSoftware,
  CloudInfrastructure,
  PlatformTech,
  BiotechPharma,
  FinTech,
}

impl BusinessCategory {
  /// Number of categories
  pub const COUNT: usize = 12;

  /// Every category, in declaration order
  pub const ALL: [BusinessCategory; Self::COUNT] = [
    BusinessCategory::Default,
    BusinessCategory::GrowthCompany,
    BusinessCategory::MatureCompany,
    BusinessCategory::AssetHeavy,
    BusinessCategory::DistressedCompany,
    BusinessCategory::Bank,
    BusinessCategory::AiSemiconductor,
    BusinessCategory::EnterpriseSoftware,
    BusinessCategory::CloudInfrastructure,
    BusinessCategory::PlatformTech,
    BusinessCategory::BiotechPharma,
    BusinessCategory::FinTech,
  ];

  /// Position of the category in [`BusinessCategory::ALL`]
  pub fn index(self) -> usize {
    self as usize
  }

  /// Parse category from a loose label ("AI & Semiconductor", "ai_semiconductor", "Mature")
  pub fn from_str(s: &str) -> Option<Self> {
    match s.to_uppercase().replace([' ', '-', '_', '&', '/'], "").as_str() {
      "DEFAULT" | "GENERAL" => Some(BusinessCategory::Default),
      "GROWTH" | "GROWTHCOMPANY" => Some(BusinessCategory::GrowthCompany),
      "MATURE" | "MATURECOMPANY" => Some(BusinessCategory::MatureCompany),
      "ASSETHEAVY" | "CAPITALINTENSIVE" => Some(BusinessCategory::AssetHeavy),
      "DISTRESSED" | "DISTRESSEDCOMPANY" => Some(BusinessCategory::DistressedCompany),
      "BANK" | "BANKING" => Some(BusinessCategory::Bank),
      "AISEMICONDUCTOR" | "SEMICONDUCTOR" | "AI" => Some(BusinessCategory::AiSemiconductor),
      "ENTERPRISESOFTWARE" | "SOFTWARE" | "SAAS" => Some(BusinessCategory::EnterpriseSoftware),
      "CLOUDINFRASTRUCTURE" | "CLOUD" => Some(BusinessCategory::CloudInfrastructure),
      "PLATFORMTECH" | "PLATFORM" => Some(BusinessCategory::PlatformTech),
      "BIOTECHPHARMA" | "BIOTECH" | "PHARMA" => Some(BusinessCategory::BiotechPharma),
      "FINTECH" => Some(BusinessCategory::FinTech),
      _ => None,
    }
  }

  /// Human-readable label
  pub fn label(&self) -> &'static str {
    match self {
      BusinessCategory::Default => "Default",
      BusinessCategory::GrowthCompany => "Growth Company",
      BusinessCategory::MatureCompany => "Mature Company",
      BusinessCategory::AssetHeavy => "Asset Heavy",
      BusinessCategory::DistressedCompany => "Distressed Company",
      BusinessCategory::Bank => "Bank",
      BusinessCategory::AiSemiconductor => "AI & Semiconductor",
      BusinessCategory::EnterpriseSoftware => "Enterprise Software",
      BusinessCategory::CloudInfrastructure => "Cloud Infrastructure",
      BusinessCategory::PlatformTech => "Platform Tech",
      BusinessCategory::BiotechPharma => "Biotech & Pharma",
      BusinessCategory::FinTech => "FinTech",
    }
  }
}

impl std::fmt::Display for BusinessCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.label())
  }
}

/// The three valuation methods blended into a fair value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValuationMethod {
  Dcf,
  Epv,
  AssetBased,
}

impl ValuationMethod {
  pub const ALL: [ValuationMethod; 3] =
    [ValuationMethod::Dcf, ValuationMethod::Epv, ValuationMethod::AssetBased];
}

impl std::fmt::Display for ValuationMethod {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValuationMethod::Dcf => write!(f, "DCF"),
      ValuationMethod::Epv => write!(f, "EPV"),
      ValuationMethod::AssetBased => write!(f, "Asset-Based"),
    }
  }
}

/// Blend weights for (DCF, EPV, Asset-Based)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightTriple {
  pub dcf: f64,
  pub epv: f64,
  pub asset: f64,
}

impl WeightTriple {
  pub const fn new(dcf: f64, epv: f64, asset: f64) -> Self {
    Self { dcf, epv, asset }
  }

  pub fn sum(&self) -> f64 {
    self.dcf + self.epv + self.asset
  }

  pub fn weight_for(&self, method: ValuationMethod) -> f64 {
    match method {
      ValuationMethod::Dcf => self.dcf,
      ValuationMethod::Epv => self.epv,
      ValuationMethod::AssetBased => self.asset,
    }
  }

  /// Every weight finite and non-negative, and the sum within `tolerance` of 1.0
  pub fn is_normalized(&self, tolerance: f64) -> bool {
    let parts = [self.dcf, self.epv, self.asset];
    parts.iter().all(|w| w.is_finite() && *w >= 0.0) && (self.sum() - 1.0).abs() <= tolerance
  }
}

/// A value for every [`BusinessCategory`].
///
/// The table is total by construction, so a lookup can never miss.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTable<T> {
  entries: [T; BusinessCategory::COUNT],
}

impl<T> CategoryTable<T> {
  pub fn from_fn(f: impl FnMut(BusinessCategory) -> T) -> Self {
    Self { entries: BusinessCategory::ALL.map(f) }
  }

  /// Build a table from a map, failing on the first category without an entry
  pub fn from_map(mut map: HashMap<BusinessCategory, T>) -> Result<Self> {
    let entries: Vec<T> = BusinessCategory::ALL
      .iter()
      .map(|category| map.remove(category).ok_or(Error::MissingCategory(*category)))
      .collect::<Result<_>>()?;

    let entries: [T; BusinessCategory::COUNT] = entries
      .try_into()
      .map_err(|_| Error::Config("category table size mismatch".to_string()))?;

    Ok(Self { entries })
  }

  pub fn get(&self, category: BusinessCategory) -> &T {
    &self.entries[category.index()]
  }

  pub fn set(&mut self, category: BusinessCategory, value: T) {
    self.entries[category.index()] = value;
  }

  pub fn iter(&self) -> impl Iterator<Item = (BusinessCategory, &T)> {
    BusinessCategory::ALL.into_iter().zip(self.entries.iter())
  }
}

impl<T: Serialize> Serialize for CategoryTable<T> {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_map(self.iter())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_category_parsing() {
    assert_eq!(BusinessCategory::from_str("AI & Semiconductor"), Some(BusinessCategory::AiSemiconductor));
    assert_eq!(BusinessCategory::from_str("enterprise_software"), Some(BusinessCategory::EnterpriseSoftware));
    assert_eq!(BusinessCategory::from_str("Mature"), Some(BusinessCategory::MatureCompany));
    assert_eq!(BusinessCategory::from_str("Biotech/Pharma"), Some(BusinessCategory::BiotechPharma));
    assert_eq!(BusinessCategory::from_str("Technology"), None);
  }

  #[test]
  fn test_category_labels_round_trip() {
    for category in BusinessCategory::ALL {
      assert_eq!(BusinessCategory::from_str(category.label()), Some(category));
    }
  }

  #[test]
  fn test_category_index_matches_all() {
    for (position, category) in BusinessCategory::ALL.iter().enumerate() {
      assert_eq!(category.index(), position);
    }
  }

  #[test]
  fn test_weight_triple_normalized() {
    assert!(WeightTriple::new(0.5, 0.3, 0.2).is_normalized(0.001));
    assert!(WeightTriple::new(0.3334, 0.3333, 0.3333).is_normalized(0.001));
    assert!(!WeightTriple::new(0.5, 0.3, 0.3).is_normalized(0.001));
    assert!(!WeightTriple::new(1.2, -0.1, -0.1).is_normalized(0.001));
    assert!(!WeightTriple::new(f64::NAN, 0.5, 0.5).is_normalized(0.001));
  }

  #[test]
  fn test_weight_for_method() {
    let weights = WeightTriple::new(0.5, 0.3, 0.2);
    assert_eq!(weights.weight_for(ValuationMethod::Dcf), 0.5);
    assert_eq!(weights.weight_for(ValuationMethod::Epv), 0.3);
    assert_eq!(weights.weight_for(ValuationMethod::AssetBased), 0.2);
  }

  #[test]
  fn test_category_table_from_map_complete() {
    let map: HashMap<_, _> = BusinessCategory::ALL.iter().map(|c| (*c, c.index())).collect();
    let table = CategoryTable::from_map(map).unwrap();
    assert_eq!(*table.get(BusinessCategory::FinTech), 11);
    assert_eq!(table.iter().count(), BusinessCategory::COUNT);
  }

  #[test]
  fn test_category_table_from_map_missing() {
    let mut map: HashMap<_, _> = BusinessCategory::ALL.iter().map(|c| (*c, 1u8)).collect();
    map.remove(&BusinessCategory::Bank);
    let err = CategoryTable::from_map(map).unwrap_err();
    assert!(matches!(err, Error::MissingCategory(BusinessCategory::Bank)));
  }

  #[test]
  fn test_category_table_serializes_as_map() {
    let table = CategoryTable::from_fn(|c| c.index());
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["Default"], 0);
    assert_eq!(json["AiSemiconductor"], 6);
  }
}
