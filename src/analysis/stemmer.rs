//! Suffix-stripping stemmer.
//!
//! Deliberately crude: one rule fires at most, there is no dictionary, and
//! false stems are accepted. Input is expected to be lowercase already.

use std::borrow::Cow;

/// Shortest stem a rule may produce.
pub const MIN_STEM_LEN: usize = 3;

/// Reduces a word to a rough root so plural, gerund and past-tense forms meet.
///
/// Rules, first match wins:
///
/// 1. `-ies` becomes `-y`
/// 2. `-es` is dropped
/// 3. `-s` (but not `-ss`) is dropped
/// 4. `-ing` is dropped
/// 5. `-ed` is dropped
///
/// A rule only applies when the result keeps at least [`MIN_STEM_LEN`]
/// characters, so short words like "red" or "bed" are never cut down to a
/// single letter that would appear inside almost any text.
///
/// ```
/// use rummage::analysis::stem;
///
/// assert_eq!(stem("batteries"), "battery");
/// assert_eq!(stem("hammers"), "hammer");
/// assert_eq!(stem("boss"), "boss");
/// ```
pub fn stem(word: &str) -> Cow<'_, str> {
  if let Some(root) = word.strip_suffix("ies") {
    return if long_enough(root, 1) {
      Cow::Owned(format!("{root}y"))
    } else {
      Cow::Borrowed(word)
    };
  }

  let root = if let Some(root) = word.strip_suffix("es") {
    root
  } else if word.ends_with('s') && !word.ends_with("ss") {
    &word[..word.len() - 1]
  } else if let Some(root) = word.strip_suffix("ing") {
    root
  } else if let Some(root) = word.strip_suffix("ed") {
    root
  } else {
    word
  };

  if long_enough(root, 0) {
    Cow::Borrowed(root)
  } else {
    Cow::Borrowed(word)
  }
}

fn long_enough(root: &str, appended: usize) -> bool {
  root.chars().count() + appended >= MIN_STEM_LEN
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_ies_becomes_y() {
    assert_eq!(stem("supplies"), "supply");
    assert_eq!(stem("ties"), "ties");
  }

  #[test]
  fn test_es_and_s_are_dropped() {
    assert_eq!(stem("boxes"), "box");
    assert_eq!(stem("nails"), "nail");
    // crude: "es" wins over "s" even where English would disagree
    assert_eq!(stem("wrenches"), "wrench");
    assert_eq!(stem("pipes"), "pip");
  }

  #[test]
  fn test_double_s_is_kept() {
    assert_eq!(stem("brass"), "brass");
    assert_eq!(stem("boss"), "boss");
  }

  #[test]
  fn test_gerund_and_past_tense() {
    assert_eq!(stem("sanding"), "sand");
    assert_eq!(stem("painted"), "paint");
  }

  #[test]
  fn test_unmatched_words_are_borrowed() {
    assert!(matches!(stem("hammer"), Cow::Borrowed("hammer")));
  }

  #[test]
  fn test_short_words_are_kept() {
    assert_eq!(stem("red"), "red");
    assert_eq!(stem("shed"), "shed");
    assert_eq!(stem("ring"), "ring");
    assert_eq!(stem("axes"), "axes");
    assert_eq!(stem("nuts"), "nut");
    assert_eq!(stem("s"), "s");
    assert_eq!(stem(""), "");
  }

  #[test]
  fn test_length_guard_keeps_short_roots_out_of_other_words() {
    // the bare suffix rules would give "r", "us" and "ax"
    assert_eq!(stem("red"), "red");
    assert_eq!(stem("uses"), "uses");
    assert_eq!(stem("axes"), "axes");
    // so a "red" term cannot be satisfied by the "r" inside "hammer"
    assert!(!"claw hammer".contains(stem("red").as_ref()));
  }

  #[test]
  fn test_multi_word_input_stems_last_word() {
    assert_eq!(stem("claw hammers"), "claw hammer");
  }
}
