//! Score normalization, threshold filtering and ordering.

use crate::intent::NUMERIC_INTENT_BONUS;
use crate::rules::FieldSpec;
use crate::types::{SearchResult, SortBy, SortOrder};
use std::cmp::Ordering;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// The score an item would get by matching every field exactly, plus the
/// largest bonus each intent can award.
///
/// Multi-term bonuses and per-term credit are not part of this maximum, so
/// normalized scores can exceed 1.0.
pub fn theoretical_max(fields: &[FieldSpec], intent_count: usize) -> f64 {
  let field_max: f64 = fields.iter().map(|field| field.weight * 10.0).sum();
  field_max + NUMERIC_INTENT_BONUS * intent_count as f64
}

/// Divides a raw score by the theoretical maximum. A zero maximum yields 0.
pub fn normalize(raw: f64, max: f64) -> f64 {
  if max > 0.0 {
    raw / max
  } else {
    0.0
  }
}

/// Keeps results that reach `min_score` or matched at least one field.
pub fn retain_relevant(results: &mut Vec<SearchResult<'_>>, min_score: f64) {
  results.retain(|result| result.score >= min_score || !result.matched_fields.is_empty());
}

fn compare(a: &SearchResult<'_>, b: &SearchResult<'_>, sort_by: SortBy) -> Ordering {
  match sort_by {
    SortBy::Relevance => a.score.partial_cmp(&b.score).unwrap_or(Ordering::Equal),
    SortBy::Name => {
      let left = a.item.name.as_deref().unwrap_or("");
      let right = b.item.name.as_deref().unwrap_or("");
      left
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(right.chars().flat_map(char::to_lowercase))
    }
    SortBy::Price => a
      .item
      .price_tier1
      .partial_cmp(&b.item.price_tier1)
      .unwrap_or(Ordering::Equal),
    SortBy::Quantity => a.item.quantity_on_hand.cmp(&b.item.quantity_on_hand),
  }
}

fn directed(ordering: Ordering, order: SortOrder) -> Ordering {
  match order {
    SortOrder::Asc => ordering,
    SortOrder::Desc => ordering.reverse(),
  }
}

/// Sorts results by the requested key and direction.
///
/// The sort is stable: ties keep the order in which the items were supplied,
/// in both directions.
#[cfg(feature = "parallel")]
pub fn sort_results(results: &mut [SearchResult<'_>], sort_by: SortBy, order: SortOrder) {
  results.par_sort_by(|a, b| directed(compare(a, b, sort_by), order));
}

/// Sorts results by the requested key and direction.
///
/// The sort is stable: ties keep the order in which the items were supplied,
/// in both directions.
#[cfg(not(feature = "parallel"))]
pub fn sort_results(results: &mut [SearchResult<'_>], sort_by: SortBy, order: SortOrder) {
  results.sort_by(|a, b| directed(compare(a, b, sort_by), order));
}
