//! Static synonym expansion for short queries.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Queries with more words than this are never expanded.
pub const MAX_EXPANSION_WORDS: usize = 3;

static DEFAULT_SYNONYMS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
  let entries: [(&'static str, &'static [&'static str]); 20] = [
    ("tool", &["equipment", "implement", "device", "instrument"]),
    ("hammer", &["mallet", "sledge"]),
    ("screw", &["fastener", "bolt"]),
    ("bolt", &["fastener", "screw"]),
    ("nail", &["fastener", "brad", "tack"]),
    ("paint", &["coating", "finish", "stain"]),
    ("glue", &["adhesive", "epoxy", "cement"]),
    ("tape", &["adhesive", "strip"]),
    ("pipe", &["tube", "conduit", "tubing"]),
    ("wire", &["cable", "cord", "lead"]),
    ("light", &["lamp", "fixture", "bulb"]),
    ("saw", &["cutter", "blade"]),
    ("drill", &["driver", "bit"]),
    ("wrench", &["spanner"]),
    ("wood", &["lumber", "timber", "board"]),
    ("lumber", &["wood", "timber", "board"]),
    ("faucet", &["tap", "spigot"]),
    ("cabinet", &["cupboard", "storage"]),
    ("ladder", &["stepladder", "steps"]),
    ("gloves", &["mitts", "handwear"]),
  ];
  entries.into_iter().collect()
});

/// A word to synonyms mapping used for query expansion.
///
/// The default table is the built-in hardware/catalog vocabulary; custom
/// tables can start empty or extend the default.
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTable {
  entries: HashMap<String, Vec<String>>,
}

impl SynonymTable {
  /// Creates a table with no entries.
  pub fn empty() -> Self {
    Self {
      entries: HashMap::new(),
    }
  }

  /// Adds synonyms for a word, extending any existing entry.
  pub fn with_entry<I, S>(mut self, word: impl Into<String>, synonyms: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self
      .entries
      .entry(word.into().to_lowercase())
      .or_default()
      .extend(synonyms.into_iter().map(|s| s.into().to_lowercase()));
    self
  }

  /// Looks up the synonyms of a single lowercase word.
  pub fn get(&self, word: &str) -> Option<&[String]> {
    self.entries.get(word).map(Vec::as_slice)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Expands a query into the flat bag of synonyms of its words.
  ///
  /// Only queries of at most [`MAX_EXPANSION_WORDS`] words are expanded;
  /// longer queries return nothing. Duplicates are not removed.
  pub fn expand(&self, query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    if words.len() > MAX_EXPANSION_WORDS {
      return Vec::new();
    }

    words
      .iter()
      .filter_map(|word| self.get(word))
      .flat_map(|synonyms| synonyms.iter().cloned())
      .collect()
  }
}

impl Default for SynonymTable {
  fn default() -> Self {
    Self {
      entries: DEFAULT_SYNONYMS
        .iter()
        .map(|(word, synonyms)| {
          (
            word.to_string(),
            synonyms.iter().map(|s| s.to_string()).collect(),
          )
        })
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_table_expands_tool() {
    let table = SynonymTable::default();
    assert_eq!(
      table.expand("Tool"),
      vec!["equipment", "implement", "device", "instrument"]
    );
  }

  #[test]
  fn test_union_keeps_duplicates() {
    let synonyms = SynonymTable::default().expand("glue tape");
    assert_eq!(synonyms.iter().filter(|s| *s == "adhesive").count(), 2);
  }

  #[test]
  fn test_long_queries_are_not_expanded() {
    let table = SynonymTable::default();
    assert!(!table.expand("red tool box").is_empty());
    assert!(table.expand("big red tool box").is_empty());
  }

  #[test]
  fn test_custom_entries_are_lowercased() {
    let table = SynonymTable::empty().with_entry("Sofa", ["Couch", "settee"]);
    assert_eq!(table.len(), 1);
    assert_eq!(table.expand("sofa"), vec!["couch", "settee"]);
    assert!(table.expand("chair").is_empty());
  }
}
