//! Lifecycle hooks for the search engine.

use crate::context::QueryContext;
use crate::types::SearchResult;

/// A trait for extensions that can hook into the search lifecycle.
///
/// Every hook has an empty default, so an extension only implements the
/// stages it cares about. Extensions run in registration order.
///
/// # Examples
///
/// A query rewriter that expands a shop abbreviation:
///
/// ```rust
/// use rummage::prelude::*;
///
/// struct Abbreviations;
///
/// impl SearchExtension for Abbreviations {
///     fn before_query(&self, query: &mut String) {
///         if query.trim().eq_ignore_ascii_case("pvc") {
///             *query = "pvc pipe".to_string();
///         }
///     }
/// }
///
/// let engine = SearchEngine::builder()
///     .with_extension(Box::new(Abbreviations))
///     .build();
/// let items = vec![SearchableItem::new("1").name("PVC Pipe")];
/// let results = engine.search(&items, "PVC", &SearchOptions::default());
/// assert_eq!(results.len(), 1);
/// ```
pub trait SearchExtension: Send + Sync {
  /// Called with the raw query before anything is derived from it.
  ///
  /// This runs before the empty-query check, so a rewrite can turn an empty
  /// query into a real one.
  fn before_query(&self, _query: &mut String) {}

  /// Called with every candidate that survived scoring, intents and the score
  /// floor, before sorting.
  fn after_score(&self, _context: &QueryContext, _results: &mut Vec<SearchResult<'_>>) {}

  /// Called with the sorted list before it is truncated to `max_results`.
  fn before_limit(&self, _context: &QueryContext, _results: &mut Vec<SearchResult<'_>>) {}

  /// Called with the final list.
  fn after_limit(&self, _context: &QueryContext, _results: &mut Vec<SearchResult<'_>>) {}
}
