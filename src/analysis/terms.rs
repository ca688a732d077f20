//! Term extraction.
//!
//! Price and stock phrases are recognized by the same patterns the intent
//! parser uses, so a phrase that yields an intent never leaks into the terms.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// `under $40`, `less than 40`, `below $12.50`.
///
/// A trailing `- $N` is swallowed with the phrase so stripping never leaves the
/// keyword behind; the range itself is still parsed by [`PRICE_RANGE`].
pub(crate) static LESS_THAN: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(?:under|less\s+than|below)\s*\$?(\d+(?:\.\d+)?)(?:\s*-\s*\$?\d+(?:\.\d+)?)?")
    .expect("valid regex")
});

/// `over $40`, `more than 40`, `above $12.50`.
pub(crate) static GREATER_THAN: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(?:over|more\s+than|above)\s*\$?(\d+(?:\.\d+)?)(?:\s*-\s*\$?\d+(?:\.\d+)?)?")
    .expect("valid regex")
});

/// `$10 - $20`, `10-20`.
pub(crate) static PRICE_RANGE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\$?(\d+(?:\.\d+)?)\s*-\s*\$?(\d+(?:\.\d+)?)").expect("valid regex")
});

/// A bare `$N`. Stripped from terms but never an intent on its own.
static BARE_PRICE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\$\d+(?:\.\d+)?").expect("valid regex"));

pub(crate) static IN_STOCK: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(?:in\s+stock|available)\b").expect("valid regex"));

pub(crate) static OUT_OF_STOCK: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(?:out\s+of\s+stock|unavailable)\b").expect("valid regex"));

static STOP_WORDS: Lazy<HashSet<&'static str>> =
  Lazy::new(|| ["and", "or", "the", "a", "an", "with", "for"].into_iter().collect());

/// Strip order matters: keyword phrases before ranges, ranges before bare
/// prices, out-of-stock before in-stock.
fn phrase_patterns() -> [&'static Regex; 6] {
  [
    &*LESS_THAN,
    &*GREATER_THAN,
    &*PRICE_RANGE,
    &*BARE_PRICE,
    &*OUT_OF_STOCK,
    &*IN_STOCK,
  ]
}

/// Returns true for words that never become terms.
pub fn is_stop_word(word: &str) -> bool {
  STOP_WORDS.contains(word)
}

/// Removes every recognized price and stock phrase from a lowercase query.
pub fn strip_phrases(query: &str) -> String {
  let mut text = query.to_string();
  for pattern in phrase_patterns() {
    text = pattern.replace_all(&text, " ").into_owned();
  }
  text
}

/// Extracts the lowercase search terms from a raw query.
///
/// Tokens made only of punctuation (the `-` of a half-parsed range, a stray
/// `.` after a price) are dropped along with stop-words.
pub fn extract_terms(query: &str) -> Vec<String> {
  strip_phrases(&query.to_lowercase())
    .split_whitespace()
    .filter(|token| !is_stop_word(token))
    .filter(|token| token.chars().any(char::is_alphanumeric))
    .map(str::to_string)
    .collect()
}
