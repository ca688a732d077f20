//! Structured constraints parsed out of natural-language queries.
//!
//! "hammers under $40" carries a price intent next to its text. Intents are
//! hard filters: an item failing any of them is dropped, an item passing all
//! of them collects a flat bonus per intent.

use crate::analysis::terms::{GREATER_THAN, IN_STOCK, LESS_THAN, OUT_OF_STOCK, PRICE_RANGE};
use crate::types::{ItemStatus, SearchableItem};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Bonus added for each satisfied price or quantity intent.
pub const NUMERIC_INTENT_BONUS: f64 = 20.0;
/// Bonus added for each satisfied status intent.
pub const STATUS_INTENT_BONUS: f64 = 15.0;

/// Comparison applied by an intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntentOperator {
  /// Strictly less than `value`.
  Less,
  /// Strictly greater than `value`.
  Greater,
  /// Within `value..=upper`, inclusive on both ends.
  Between,
  /// Equal to `value`.
  Equal,
}

/// A numeric comparison with one or two operands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericConstraint {
  pub operator: IntentOperator,
  pub value: f64,
  /// Upper bound, only set for `Between`.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub upper: Option<f64>,
}

impl NumericConstraint {
  pub fn less(value: f64) -> Self {
    Self {
      operator: IntentOperator::Less,
      value,
      upper: None,
    }
  }

  pub fn greater(value: f64) -> Self {
    Self {
      operator: IntentOperator::Greater,
      value,
      upper: None,
    }
  }

  /// Bounds given in either order are normalized to `(min, max)`.
  pub fn between(a: f64, b: f64) -> Self {
    Self {
      operator: IntentOperator::Between,
      value: a.min(b),
      upper: Some(a.max(b)),
    }
  }

  pub fn equal(value: f64) -> Self {
    Self {
      operator: IntentOperator::Equal,
      value,
      upper: None,
    }
  }

  /// Tests a value against the constraint.
  pub fn matches(&self, actual: f64) -> bool {
    match self.operator {
      IntentOperator::Less => actual < self.value,
      IntentOperator::Greater => actual > self.value,
      IntentOperator::Between => {
        let upper = self.upper.unwrap_or(self.value);
        actual >= self.value && actual <= upper
      }
      IntentOperator::Equal => actual == self.value,
    }
  }
}

/// A constraint inferred from query phrasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QueryIntent {
  /// Constrains `price_tier1`.
  Price(NumericConstraint),
  /// Constrains `quantity_on_hand`.
  Quantity(NumericConstraint),
  /// Constrains `status`. Only `Equal` is ever produced by the parser.
  Status {
    operator: IntentOperator,
    value: ItemStatus,
  },
}

impl QueryIntent {
  /// Tests an item against this intent.
  pub fn evaluate(&self, item: &SearchableItem) -> bool {
    match self {
      QueryIntent::Price(constraint) => constraint.matches(item.price_tier1),
      QueryIntent::Quantity(constraint) => constraint.matches(item.quantity_on_hand as f64),
      QueryIntent::Status { operator, value } => match operator {
        IntentOperator::Equal => item.status == *value,
        // ordering between statuses is meaningless
        _ => false,
      },
    }
  }

  /// Score bonus granted when the intent is satisfied.
  pub fn bonus(&self) -> f64 {
    match self {
      QueryIntent::Price(_) | QueryIntent::Quantity(_) => NUMERIC_INTENT_BONUS,
      QueryIntent::Status { .. } => STATUS_INTENT_BONUS,
    }
  }
}

/// Parses every recognized constraint out of a raw query.
///
/// All non-overlapping occurrences of each price pattern are emitted, so
/// "over $10 under $40" yields two intents. Numbers that do not parse never
/// produce an intent.
pub fn parse_intents(query: &str) -> Vec<QueryIntent> {
  let query = query.to_lowercase();
  let mut intents = Vec::new();

  intents.extend(
    single_amounts(&LESS_THAN, &query).map(|v| QueryIntent::Price(NumericConstraint::less(v))),
  );
  intents.extend(
    single_amounts(&GREATER_THAN, &query).map(|v| QueryIntent::Price(NumericConstraint::greater(v))),
  );
  intents.extend(PRICE_RANGE.captures_iter(&query).filter_map(|caps| {
    let low = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let high = caps.get(2)?.as_str().parse::<f64>().ok()?;
    Some(QueryIntent::Price(NumericConstraint::between(low, high)))
  }));

  if IN_STOCK.is_match(&query) {
    intents.push(QueryIntent::Status {
      operator: IntentOperator::Equal,
      value: ItemStatus::Active,
    });
  }
  if OUT_OF_STOCK.is_match(&query) {
    intents.push(QueryIntent::Quantity(NumericConstraint::equal(0.0)));
  }

  intents
}

fn single_amounts<'q>(pattern: &'q Regex, query: &'q str) -> impl Iterator<Item = f64> + 'q {
  pattern
    .captures_iter(query)
    .filter_map(|caps| caps.get(1)?.as_str().parse::<f64>().ok())
}

/// Applies every intent as a hard filter.
///
/// Returns `None` as soon as one intent fails, otherwise the summed bonus.
pub fn apply_intents(intents: &[QueryIntent], item: &SearchableItem) -> Option<f64> {
  intents.iter().try_fold(0.0, |bonus, intent| {
    intent.evaluate(item).then(|| bonus + intent.bonus())
  })
}
