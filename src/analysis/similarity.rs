//! Blended fuzzy string similarity.
//!
//! Three independent measures are combined:
//!
//! | measure                     | weight |
//! |-----------------------------|--------|
//! | normalized Levenshtein      | 0.4    |
//! | Jaro-Winkler                | 0.4    |
//! | character bigram Jaccard    | 0.2    |
//!
//! Every measure is total: empty inputs and empty bigram sets map to defined
//! values instead of NaN.

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

const EDIT_WEIGHT: f64 = 0.4;
const JARO_WINKLER_WEIGHT: f64 = 0.4;
const BIGRAM_WEIGHT: f64 = 0.2;

/// Winkler prefix scaling factor.
const PREFIX_SCALE: f64 = 0.1;
/// Longest common prefix rewarded by the Winkler bonus.
const MAX_PREFIX: usize = 4;

/// Blended similarity between two strings, roughly in `[0, 1]`.
///
/// Identical strings shorter than two characters score 0.8, since they have
/// no bigrams to share.
pub fn similarity(a: &str, b: &str) -> f64 {
  EDIT_WEIGHT * edit_similarity(a, b)
    + JARO_WINKLER_WEIGHT * jaro_winkler(a, b)
    + BIGRAM_WEIGHT * bigram_jaccard(a, b)
}

/// `1 - levenshtein(a, b) / max(len(a), len(b))`, counted in chars.
/// Two empty strings are identical and score 1.
pub fn edit_similarity(a: &str, b: &str) -> f64 {
  strsim::normalized_levenshtein(a, b)
}

/// Jaro similarity plus a prefix bonus of `0.1 * prefix * (1 - jaro)`, with
/// the common prefix capped at four characters.
///
/// Unlike `strsim::jaro_winkler`, the bonus applies at every Jaro level.
pub fn jaro_winkler(a: &str, b: &str) -> f64 {
  let jaro = strsim::jaro(a, b);
  let prefix = a
    .chars()
    .zip(b.chars())
    .take_while(|(x, y)| x == y)
    .take(MAX_PREFIX)
    .count();

  jaro + PREFIX_SCALE * prefix as f64 * (1.0 - jaro)
}

/// Jaccard index of the two strings' character bigram sets.
///
/// Returns 0 when neither string has a bigram.
pub fn bigram_jaccard(a: &str, b: &str) -> f64 {
  let left = bigrams(a);
  let right = bigrams(b);

  let union = left.union(&right).count();
  if union == 0 {
    return 0.0;
  }

  left.intersection(&right).count() as f64 / union as f64
}

/// Adjacent grapheme pairs, so combining marks stay with their base character.
fn bigrams(text: &str) -> HashSet<String> {
  let graphemes: Vec<&str> = text.graphemes(true).collect();
  graphemes.windows(2).map(|pair| pair.concat()).collect()
}
