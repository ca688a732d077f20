//! Query artifacts shared by every item scored in one search call.

use crate::analysis::{extract_terms, stem, SynonymTable};
use crate::intent::{parse_intents, QueryIntent};

/// Everything derived from the raw query, computed once per search.
///
/// The scorer reads this for every item, so nothing here is recomputed per
/// item. It is immutable for the duration of the call.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryContext {
  /// Trimmed, lowercased query, price phrases included.
  pub query: String,
  /// Stem of the whole query string.
  pub stemmed_query: String,
  /// Extracted terms, in query order.
  pub terms: Vec<String>,
  /// Stem of each term, parallel to `terms`.
  pub term_stems: Vec<String>,
  /// Synonym expansion of the query words. Empty for long queries.
  pub synonyms: Vec<String>,
  pub intents: Vec<QueryIntent>,
}

impl QueryContext {
  /// Analyzes a raw query.
  pub fn new(raw: &str, synonyms: &SynonymTable) -> Self {
    let query = raw.trim().to_lowercase();
    let stemmed_query = stem(&query).into_owned();
    let terms = extract_terms(&query);
    let term_stems = terms.iter().map(|term| stem(term).into_owned()).collect();

    Self {
      synonyms: synonyms.expand(&query),
      intents: parse_intents(&query),
      query,
      stemmed_query,
      terms,
      term_stems,
    }
  }

  /// True when the query has no content at all.
  pub fn is_empty(&self) -> bool {
    self.query.is_empty()
  }

  /// Iterates `(term, stem)` pairs.
  pub fn terms_with_stems(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .terms
      .iter()
      .zip(&self.term_stems)
      .map(|(term, stem)| (term.as_str(), stem.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::intent::NumericConstraint;

  #[test]
  fn test_context_derives_every_artifact() {
    let context = QueryContext::new("  Hammers under $40 ", &SynonymTable::default());

    assert_eq!(context.query, "hammers under $40");
    assert_eq!(context.terms, vec!["hammers"]);
    assert_eq!(context.term_stems, vec!["hammer"]);
    // "hammers" is not a table key, only its stem would be
    assert!(context.synonyms.is_empty());
    assert_eq!(
      context.intents,
      vec![QueryIntent::Price(NumericConstraint::less(40.0))]
    );
  }

  #[test]
  fn test_short_query_gets_synonyms() {
    let context = QueryContext::new("tool", &SynonymTable::default());
    assert!(context.synonyms.contains(&"equipment".to_string()));
    assert_eq!(context.stemmed_query, "tool");
  }

  #[test]
  fn test_whitespace_query_is_empty() {
    assert!(QueryContext::new(" \t ", &SynonymTable::default()).is_empty());
  }
}
