//! Core data types for the rummage search engine.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A catalog record that can be searched.
///
/// Only `id` is required. Every text field is optional; absent fields are
/// skipped by the scorer and never cause a failure. `tags` are joined with
/// spaces before they are scored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchableItem {
  /// Identity of the record. Not searched.
  pub id: String,
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub sku: Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub category: Option<String>,
  #[serde(default)]
  pub supplier: Option<String>,
  #[serde(default)]
  pub barcode: Option<String>,
  #[serde(default)]
  pub location: Option<String>,
  #[serde(default)]
  pub tags: Option<Vec<String>>,
  /// Lifecycle state, consulted by status intents and `include_inactive`.
  #[serde(default)]
  pub status: ItemStatus,
  /// Base selling price, consulted by price intents and price sorting.
  #[serde(default)]
  pub price_tier1: f64,
  /// Units in stock, consulted by quantity intents and quantity sorting.
  #[serde(default)]
  pub quantity_on_hand: i64,
}

impl SearchableItem {
  /// Creates an active item with the given identity and no other data.
  pub fn new(id: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      ..Default::default()
    }
  }

  pub fn name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn sku(mut self, sku: impl Into<String>) -> Self {
    self.sku = Some(sku.into());
    self
  }

  pub fn description(mut self, description: impl Into<String>) -> Self {
    self.description = Some(description.into());
    self
  }

  pub fn category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn supplier(mut self, supplier: impl Into<String>) -> Self {
    self.supplier = Some(supplier.into());
    self
  }

  pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
    self.barcode = Some(barcode.into());
    self
  }

  pub fn location(mut self, location: impl Into<String>) -> Self {
    self.location = Some(location.into());
    self
  }

  /// Sets the tag list.
  pub fn tags<I, S>(mut self, tags: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.tags = Some(tags.into_iter().map(Into::into).collect());
    self
  }

  pub fn status(mut self, status: ItemStatus) -> Self {
    self.status = status;
    self
  }

  pub fn price(mut self, price: f64) -> Self {
    self.price_tier1 = price;
    self
  }

  pub fn quantity(mut self, quantity: i64) -> Self {
    self.quantity_on_hand = quantity;
    self
  }
}

/// Lifecycle state of a catalog record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
  #[default]
  Active,
  Inactive,
  Discontinued,
}

impl ItemStatus {
  /// The lowercase name used by status intents.
  pub fn as_str(&self) -> &'static str {
    match self {
      ItemStatus::Active => "active",
      ItemStatus::Inactive => "inactive",
      ItemStatus::Discontinued => "discontinued",
    }
  }

  pub fn is_active(&self) -> bool {
    matches!(self, ItemStatus::Active)
  }
}

/// Coarse classification of the strongest match strategy that fired for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
  /// The whole query equals a field, directly or after stemming.
  Exact,
  /// Accepted through blended string similarity.
  Fuzzy,
  /// Accepted through synonym expansion.
  Semantic,
  /// Substring or term containment.
  Partial,
}

/// A single ranked hit.
///
/// Results borrow the caller's items and are created fresh per search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult<'a> {
  /// The matched item.
  pub item: &'a SearchableItem,
  /// Position of the item in the slice passed to `search`.
  pub index: usize,
  /// Accumulated score divided by the theoretical maximum. Not clamped, so
  /// multi-term bonuses can push it past 1.0.
  pub score: f64,
  /// Names of the fields that contributed to the score.
  pub matched_fields: BTreeSet<String>,
  /// Raw score contributed by each matched field, for explainability.
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub field_scores: BTreeMap<String, f64>,
  pub match_type: MatchType,
}

impl<'a> SearchResult<'a> {
  /// Creates a result with no field information.
  pub fn new(item: &'a SearchableItem, index: usize, score: f64, match_type: MatchType) -> Self {
    Self {
      item,
      index,
      score,
      matched_fields: BTreeSet::new(),
      field_scores: BTreeMap::new(),
      match_type,
    }
  }
}

/// Key used to order results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
  #[default]
  Relevance,
  Name,
  Price,
  Quantity,
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
  Asc,
  #[default]
  Desc,
}

/// Per-call configuration of a search.
///
/// Every field has a default, so a partial JSON document such as
/// `{"maxResults": 5}` deserializes into a complete set of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
  /// Similarity cutoff in `[0, 1]` below which a fuzzy match is ignored.
  #[serde(default = "default_fuzzy_threshold")]
  pub fuzzy_threshold: f64,
  /// Whether items whose status is not active are searched at all.
  #[serde(default)]
  pub include_inactive: bool,
  /// Normalized score floor in `[0, 1]`. Results below it survive only if at
  /// least one field matched.
  #[serde(default = "default_min_score")]
  pub min_score: f64,
  /// Maximum number of results returned.
  #[serde(default = "default_max_results")]
  pub max_results: usize,
  #[serde(default)]
  pub sort_by: SortBy,
  #[serde(default)]
  pub sort_order: SortOrder,
}

fn default_fuzzy_threshold() -> f64 {
  0.7
}

fn default_min_score() -> f64 {
  0.01
}

fn default_max_results() -> usize {
  50
}

impl Default for SearchOptions {
  fn default() -> Self {
    Self {
      fuzzy_threshold: default_fuzzy_threshold(),
      include_inactive: false,
      min_score: default_min_score(),
      max_results: default_max_results(),
      sort_by: SortBy::default(),
      sort_order: SortOrder::default(),
    }
  }
}

impl SearchOptions {
  /// Parses options from a JSON document. Missing keys take their defaults.
  pub fn from_json(json: &str) -> Result<Self> {
    let options: SearchOptions = serde_json::from_str(json)?;
    options.validate()?;
    Ok(options)
  }

  /// Checks that every option lies within its documented domain.
  pub fn validate(&self) -> Result<()> {
    if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
      return Err(SearchError::InvalidOption {
        name: "fuzzyThreshold",
        reason: format!("{} is not within [0, 1]", self.fuzzy_threshold),
      });
    }
    if !(0.0..=1.0).contains(&self.min_score) {
      return Err(SearchError::InvalidOption {
        name: "minScore",
        reason: format!("{} is not within [0, 1]", self.min_score),
      });
    }
    if self.max_results == 0 {
      return Err(SearchError::InvalidOption {
        name: "maxResults",
        reason: "must be a positive integer".to_string(),
      });
    }
    Ok(())
  }

  pub fn fuzzy_threshold(mut self, threshold: f64) -> Self {
    self.fuzzy_threshold = threshold;
    self
  }

  pub fn include_inactive(mut self, include: bool) -> Self {
    self.include_inactive = include;
    self
  }

  pub fn min_score(mut self, min_score: f64) -> Self {
    self.min_score = min_score;
    self
  }

  pub fn max_results(mut self, max_results: usize) -> Self {
    self.max_results = max_results;
    self
  }

  pub fn sort_by(mut self, sort_by: SortBy) -> Self {
    self.sort_by = sort_by;
    self
  }

  pub fn sort_order(mut self, sort_order: SortOrder) -> Self {
    self.sort_order = sort_order;
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_partial_options_json_takes_defaults() {
    let options = SearchOptions::from_json(r#"{"maxResults": 5, "sortBy": "price"}"#).unwrap();
    assert_eq!(options.max_results, 5);
    assert_eq!(options.sort_by, SortBy::Price);
    assert_eq!(options.sort_order, SortOrder::Desc);
    assert_eq!(options.fuzzy_threshold, 0.7);
    assert!(!options.include_inactive);
  }

  #[test]
  fn test_out_of_range_threshold_is_rejected() {
    let err = SearchOptions::default().fuzzy_threshold(1.5).validate().unwrap_err();
    assert!(matches!(err, SearchError::InvalidOption { name: "fuzzyThreshold", .. }));

    let err = SearchOptions::default().min_score(f64::NAN).validate().unwrap_err();
    assert!(matches!(err, SearchError::InvalidOption { name: "minScore", .. }));
  }

  #[test]
  fn test_zero_max_results_is_rejected() {
    let err = SearchOptions::from_json(r#"{"maxResults": 0}"#).unwrap_err();
    assert!(matches!(err, SearchError::InvalidOption { name: "maxResults", .. }));
  }

  #[test]
  fn test_malformed_json_is_an_options_error() {
    let err = SearchOptions::from_json("{not json").unwrap_err();
    assert!(matches!(err, SearchError::Options(_)));
  }

  #[test]
  fn test_item_deserializes_with_camel_case_keys() {
    let item: SearchableItem = serde_json::from_str(
      r#"{"id": "7", "name": "Claw Hammer", "priceTier1": 25.5, "quantityOnHand": 3, "status": "inactive"}"#,
    )
    .unwrap();
    assert_eq!(item.name.as_deref(), Some("Claw Hammer"));
    assert_eq!(item.price_tier1, 25.5);
    assert_eq!(item.quantity_on_hand, 3);
    assert_eq!(item.status, ItemStatus::Inactive);
    assert!(item.sku.is_none());
  }
}
