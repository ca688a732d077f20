//! Per-item field scoring.

use crate::context::QueryContext;
use crate::rules::{first_match, term_credit, FieldSpec, FieldText};
use crate::types::{MatchType, SearchableItem, SearchOptions};
use std::collections::{BTreeMap, BTreeSet};
use tracing::trace;

/// Flat bonus per term when an item contains every term of a multi-term query.
pub const MULTI_TERM_BONUS: f64 = 50.0;

/// The raw outcome of scoring one item, before intents and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemScore {
  pub score: f64,
  pub matched_fields: BTreeSet<String>,
  pub field_scores: BTreeMap<String, f64>,
  pub match_type: MatchType,
}

/// Scores one item against a prepared query.
///
/// Returns `None` when the item lacks one of the query terms, in raw or
/// stemmed form, across all of its fields together. Terms are ANDed, fields
/// are ORed.
pub fn score_item(
  fields: &[FieldSpec],
  item: &SearchableItem,
  context: &QueryContext,
  options: &SearchOptions,
) -> Option<ItemScore> {
  let values: Vec<(&FieldSpec, FieldText)> = fields
    .iter()
    .filter_map(|field| field.read(item).map(|value| (field, FieldText::new(value))))
    .collect();

  let mut score = 0.0;

  if !context.terms.is_empty() {
    let haystack = values
      .iter()
      .map(|(_, text)| text.value.as_str())
      .collect::<Vec<_>>()
      .join(" ");
    let missing = context
      .terms_with_stems()
      .find(|(term, stem)| !haystack.contains(term) && !haystack.contains(stem));
    if let Some((term, _)) = missing {
      trace!(item = %item.id, term, "item lacks a query term");
      return None;
    }
    if context.terms.len() >= 2 {
      score += MULTI_TERM_BONUS * context.terms.len() as f64;
    }
  }

  let mut matched_fields = BTreeSet::new();
  let mut field_scores = BTreeMap::new();
  let mut match_type = MatchType::Partial;

  for (field, text) in &values {
    let mut field_score = 0.0;
    let mut matched = false;

    if let Some((rule, hit)) = first_match(text, context, options) {
      trace!(item = %item.id, field = %field.name, rule = rule.name, "field matched");
      field_score += field.weight * hit.multiplier;
      match_type = hit.promotion.apply(match_type);
      matched = true;
    }

    if let Some(hit) = term_credit(text, context, options) {
      field_score += field.weight * hit.multiplier;
      match_type = hit.promotion.apply(match_type);
      matched = true;
    }

    if matched {
      score += field_score;
      matched_fields.insert(field.name.clone());
      field_scores.insert(field.name.clone(), field_score);
    }
  }

  Some(ItemScore {
    score,
    matched_fields,
    field_scores,
    match_type,
  })
}
