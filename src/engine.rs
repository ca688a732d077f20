//! The search engine that runs the whole query pipeline.

use crate::analysis::SynonymTable;
use crate::context::QueryContext;
use crate::error::Result;
use crate::extension::SearchExtension;
use crate::intent::apply_intents;
use crate::ranker;
use crate::rules::{default_fields, FieldAccessor, FieldSpec};
use crate::scorer::score_item;
use crate::types::{MatchType, SearchOptions, SearchResult, SearchableItem};
use once_cell::sync::Lazy;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

static DEFAULT_ENGINE: Lazy<SearchEngine> = Lazy::new(SearchEngine::default);

/// Searches `items` with the default field table and synonym table.
///
/// This is the engine's single entry point for callers that need no
/// configuration. See [`SearchEngine::search`] for the pipeline.
///
/// ```rust
/// use rummage::prelude::*;
///
/// let items = vec![
///     SearchableItem::new("1").name("Claw Hammer").price(25.0),
///     SearchableItem::new("2").name("Sledge Hammer").price(55.0),
/// ];
///
/// let results = rummage::search(&items, "hammer under $40", &SearchOptions::default());
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].item.id, "1");
/// ```
pub fn search<'a>(
  items: &'a [SearchableItem],
  query: &str,
  options: &SearchOptions,
) -> Vec<SearchResult<'a>> {
  DEFAULT_ENGINE.search(items, query, options)
}

/// A configured search engine.
///
/// The engine holds the field table, the synonym table and any extensions.
/// It keeps no state between calls, so one engine can serve concurrent
/// searches.
///
/// Create a `SearchEngine` using the [`SearchEngineBuilder`], or use
/// `SearchEngine::default()` for the built-in tables.
pub struct SearchEngine {
  fields: Vec<FieldSpec>,
  synonyms: SynonymTable,
  extensions: Vec<Box<dyn SearchExtension>>,
}

impl Default for SearchEngine {
  fn default() -> Self {
    SearchEngineBuilder::new().build()
  }
}

impl SearchEngine {
  /// Creates a new `SearchEngineBuilder` to construct an engine.
  pub fn builder() -> SearchEngineBuilder {
    SearchEngineBuilder::new()
  }

  /// The field table, in evaluation order.
  pub fn fields(&self) -> &[FieldSpec] {
    &self.fields
  }

  pub fn synonyms(&self) -> &SynonymTable {
    &self.synonyms
  }

  /// Validates `options` and then searches.
  pub fn try_search<'a>(
    &self,
    items: &'a [SearchableItem],
    query: &str,
    options: &SearchOptions,
  ) -> Result<Vec<SearchResult<'a>>> {
    options.validate()?;
    Ok(self.search(items, query, options))
  }

  /// Searches for items matching a free-text query.
  ///
  /// ## Search Lifecycle
  ///
  /// 1.  **`before_query` Hook**: Extensions may rewrite the raw query.
  /// 2.  **Empty query**: A blank query returns every item, in input order,
  ///     with score 1, match type exact and no matched fields. Options are
  ///     ignored, `max_results` included.
  /// 3.  **Analysis**: Terms, stems, synonyms and intents are derived once.
  /// 4.  **Scoring**: Each item is scored independently. Inactive items are
  ///     skipped unless `include_inactive` is set, items missing a query term
  ///     are rejected, failing intents reject the item and passing intents add
  ///     their bonus. With the `parallel` feature this step runs on rayon.
  /// 5.  **Normalization and floor**: Raw scores are divided by the
  ///     theoretical maximum; results below `min_score` without a field match
  ///     are dropped.
  /// 6.  **`after_score` Hook**.
  /// 7.  **Sorting**: Stable sort by `sort_by` / `sort_order`.
  /// 8.  **`before_limit` Hook**.
  /// 9.  **Truncation** to `max_results`.
  /// 10. **`after_limit` Hook**.
  ///
  /// The search never fails; use [`SearchEngine::try_search`] to reject
  /// out-of-range options up front.
  pub fn search<'a>(
    &self,
    items: &'a [SearchableItem],
    query: &str,
    options: &SearchOptions,
  ) -> Vec<SearchResult<'a>> {
    let mut query = query.to_string();
    for ext in &self.extensions {
      ext.before_query(&mut query);
    }

    if items.is_empty() {
      return Vec::new();
    }

    if query.trim().is_empty() {
      debug!(items = items.len(), "empty query, returning every item");
      return items
        .iter()
        .enumerate()
        .map(|(index, item)| SearchResult::new(item, index, 1.0, MatchType::Exact))
        .collect();
    }

    let context = QueryContext::new(&query, &self.synonyms);
    let max = ranker::theoretical_max(&self.fields, context.intents.len());
    debug!(
      query = %context.query,
      terms = context.terms.len(),
      synonyms = context.synonyms.len(),
      intents = context.intents.len(),
      items = items.len(),
      "searching"
    );

    #[cfg(feature = "parallel")]
    let mut results: Vec<SearchResult<'a>> = items
      .par_iter()
      .enumerate()
      .filter_map(|(index, item)| self.score_candidate(index, item, &context, options, max))
      .collect();

    #[cfg(not(feature = "parallel"))]
    let mut results: Vec<SearchResult<'a>> = items
      .iter()
      .enumerate()
      .filter_map(|(index, item)| self.score_candidate(index, item, &context, options, max))
      .collect();

    let scored = results.len();
    ranker::retain_relevant(&mut results, options.min_score);

    for ext in &self.extensions {
      ext.after_score(&context, &mut results);
    }

    ranker::sort_results(&mut results, options.sort_by, options.sort_order);

    for ext in &self.extensions {
      ext.before_limit(&context, &mut results);
    }

    results.truncate(options.max_results);

    for ext in &self.extensions {
      ext.after_limit(&context, &mut results);
    }

    debug!(scored, returned = results.len(), "search finished");
    results
  }

  /// Scores one item, applying the inactive filter and the intent filter.
  fn score_candidate<'a>(
    &self,
    index: usize,
    item: &'a SearchableItem,
    context: &QueryContext,
    options: &SearchOptions,
    max: f64,
  ) -> Option<SearchResult<'a>> {
    if !options.include_inactive && !item.status.is_active() {
      trace!(item = %item.id, status = item.status.as_str(), "skipping inactive item");
      return None;
    }

    let scored = score_item(&self.fields, item, context, options)?;

    let Some(bonus) = apply_intents(&context.intents, item) else {
      trace!(item = %item.id, "item fails a query intent");
      return None;
    };

    Some(SearchResult {
      item,
      index,
      score: ranker::normalize(scored.score + bonus, max),
      matched_fields: scored.matched_fields,
      field_scores: scored.field_scores,
      match_type: scored.match_type,
    })
  }
}

/// A builder for creating `SearchEngine` instances.
///
/// Starts from the built-in field table and synonym table.
///
/// # Examples
///
/// ```
/// use rummage::prelude::*;
/// use std::borrow::Cow;
///
/// fn color_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
///     item.tags.as_ref()?.first().map(|tag| Cow::Borrowed(tag.as_str()))
/// }
///
/// let engine = SearchEngine::builder()
///     .field("color", 2.0, color_of)
///     .synonyms(SynonymTable::empty().with_entry("crimson", ["red"]))
///     .build();
///
/// assert_eq!(engine.fields().len(), 9);
/// ```
pub struct SearchEngineBuilder {
  fields: Vec<FieldSpec>,
  synonyms: SynonymTable,
  extensions: Vec<Box<dyn SearchExtension>>,
}

impl Default for SearchEngineBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl SearchEngineBuilder {
  /// Creates a builder holding the built-in tables and no extensions.
  pub fn new() -> Self {
    Self {
      fields: default_fields(),
      synonyms: SynonymTable::default(),
      extensions: Vec::new(),
    }
  }

  /// Appends a field to the table.
  pub fn field(mut self, name: impl Into<String>, weight: f64, accessor: FieldAccessor) -> Self {
    self.fields.push(FieldSpec::new(name, weight, accessor));
    self
  }

  /// Replaces the whole field table.
  pub fn fields(mut self, fields: Vec<FieldSpec>) -> Self {
    self.fields = fields;
    self
  }

  /// Replaces the synonym table.
  pub fn synonyms(mut self, synonyms: SynonymTable) -> Self {
    self.synonyms = synonyms;
    self
  }

  /// Adds an extension. Extensions run in the order they are added.
  pub fn with_extension(mut self, extension: Box<dyn SearchExtension>) -> Self {
    self.extensions.push(extension);
    self
  }

  /// Builds the `SearchEngine` with the configured components.
  pub fn build(self) -> SearchEngine {
    SearchEngine {
      fields: self.fields,
      synonyms: self.synonyms,
      extensions: self.extensions,
    }
  }
}
