//! Field table and the per-field match rule cascade.

use crate::analysis::{similarity, stem};
use crate::context::QueryContext;
use crate::types::{MatchType, SearchableItem, SearchOptions};
use std::borrow::Cow;

/// Reads one searchable text value out of an item.
pub type FieldAccessor = for<'a> fn(&'a SearchableItem) -> Option<Cow<'a, str>>;

/// One searchable field: a name, a relative weight and how to read it.
#[derive(Clone)]
pub struct FieldSpec {
    pub name: String,
    pub weight: f64,
    pub accessor: FieldAccessor,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, weight: f64, accessor: FieldAccessor) -> Self {
        Self {
            name: name.into(),
            weight,
            accessor,
        }
    }

    /// Lowercased value of the field, or `None` when absent or blank.
    pub fn read(&self, item: &SearchableItem) -> Option<String> {
        let value = (self.accessor)(item)?;
        let value = value.trim();
        if value.is_empty() {
            None
        } else {
            Some(value.to_lowercase())
        }
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

fn name_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.name.as_deref().map(Cow::Borrowed)
}

fn sku_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.sku.as_deref().map(Cow::Borrowed)
}

fn category_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.category.as_deref().map(Cow::Borrowed)
}

fn description_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.description.as_deref().map(Cow::Borrowed)
}

fn tags_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.tags.as_ref().map(|tags| Cow::Owned(tags.join(" ")))
}

fn barcode_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.barcode.as_deref().map(Cow::Borrowed)
}

fn supplier_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.supplier.as_deref().map(Cow::Borrowed)
}

fn location_of(item: &SearchableItem) -> Option<Cow<'_, str>> {
    item.location.as_deref().map(Cow::Borrowed)
}

/// The built-in field table, in evaluation order.
pub fn default_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", 10.0, name_of),
        FieldSpec::new("sku", 8.0, sku_of),
        FieldSpec::new("category", 7.0, category_of),
        FieldSpec::new("description", 6.0, description_of),
        FieldSpec::new("tags", 5.0, tags_of),
        FieldSpec::new("barcode", 5.0, barcode_of),
        FieldSpec::new("supplier", 4.0, supplier_of),
        FieldSpec::new("location", 3.0, location_of),
    ]
}

/// How a rule hit changes the item's running match type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Promotion {
    /// Leave the match type alone.
    Keep,
    /// Overwrite the match type.
    Force(MatchType),
    /// Replace the match type only while it is still `Partial`.
    IfPartial(MatchType),
}

impl Promotion {
    pub fn apply(self, current: MatchType) -> MatchType {
        match self {
            Promotion::Keep => current,
            Promotion::Force(match_type) => match_type,
            Promotion::IfPartial(match_type) if current == MatchType::Partial => match_type,
            Promotion::IfPartial(_) => current,
        }
    }
}

/// Outcome of a rule that fired: multiply the field weight by `multiplier`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleHit {
    pub multiplier: f64,
    pub promotion: Promotion,
}

impl RuleHit {
    fn new(multiplier: f64, promotion: Promotion) -> Self {
        Self {
            multiplier,
            promotion,
        }
    }
}

/// A lowercased field value with its stem, prepared once per field.
#[derive(Debug, Clone)]
pub struct FieldText {
    pub value: String,
    pub stemmed: String,
}

impl FieldText {
    pub fn new(value: String) -> Self {
        let stemmed = stem(&value).into_owned();
        Self { value, stemmed }
    }

    fn words(&self) -> impl Iterator<Item = &str> {
        self.value.split_whitespace()
    }

    /// Highest blended similarity between any word of the field and `target`,
    /// if it reaches `threshold`.
    fn best_fuzzy(&self, target: &str, threshold: f64) -> Option<f64> {
        self.words()
            .map(|word| similarity(word, target))
            .filter(|score| *score >= threshold)
            .fold(None, |best: Option<f64>, score| {
                Some(best.map_or(score, |b| b.max(score)))
            })
    }
}

type RuleFn = fn(&FieldText, &QueryContext, &SearchOptions) -> Option<RuleHit>;

/// A named whole-query match strategy.
#[derive(Clone, Copy)]
pub struct MatchRule {
    pub name: &'static str,
    check: RuleFn,
}

impl MatchRule {
    pub fn check(
        &self,
        field: &FieldText,
        context: &QueryContext,
        options: &SearchOptions,
    ) -> Option<RuleHit> {
        (self.check)(field, context, options)
    }
}

impl std::fmt::Debug for MatchRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchRule").field("name", &self.name).finish()
    }
}

/// Whole-query rules in priority order. The first rule that fires for a field
/// is the only one that counts for it.
pub static FIELD_RULES: [MatchRule; 8] = [
    MatchRule {
        name: "exact",
        check: exact,
    },
    MatchRule {
        name: "stemmed-exact",
        check: stemmed_exact,
    },
    MatchRule {
        name: "contains",
        check: contains,
    },
    MatchRule {
        name: "stemmed-contains",
        check: stemmed_contains,
    },
    MatchRule {
        name: "contained-in-query",
        check: contained_in_query,
    },
    MatchRule {
        name: "all-terms",
        check: all_terms,
    },
    MatchRule {
        name: "synonym",
        check: synonym,
    },
    MatchRule {
        name: "word",
        check: word,
    },
];

fn exact(field: &FieldText, context: &QueryContext, _: &SearchOptions) -> Option<RuleHit> {
    (field.value == context.query).then(|| RuleHit::new(10.0, Promotion::Force(MatchType::Exact)))
}

fn stemmed_exact(field: &FieldText, context: &QueryContext, _: &SearchOptions) -> Option<RuleHit> {
    (field.stemmed == context.stemmed_query)
        .then(|| RuleHit::new(9.5, Promotion::Force(MatchType::Exact)))
}

fn contains(field: &FieldText, context: &QueryContext, _: &SearchOptions) -> Option<RuleHit> {
    field
        .value
        .contains(context.query.as_str())
        .then(|| RuleHit::new(8.0, Promotion::Keep))
}

fn stemmed_contains(field: &FieldText, context: &QueryContext, _: &SearchOptions) -> Option<RuleHit> {
    field
        .value
        .contains(context.stemmed_query.as_str())
        .then(|| RuleHit::new(7.5, Promotion::Keep))
}

/// Short fields such as a SKU or a one-word category named inside the query.
fn contained_in_query(field: &FieldText, context: &QueryContext, _: &SearchOptions) -> Option<RuleHit> {
    (field.value.chars().count() >= 3 && context.query.contains(field.value.as_str()))
        .then(|| RuleHit::new(7.0, Promotion::Keep))
}

fn all_terms(field: &FieldText, context: &QueryContext, _: &SearchOptions) -> Option<RuleHit> {
    if context.terms.len() <= 1 {
        return None;
    }
    if context.terms.iter().all(|term| field.value.contains(term.as_str())) {
        return Some(RuleHit::new(7.0, Promotion::Keep));
    }
    context
        .terms_with_stems()
        .all(|(term, stem)| field.value.contains(term) || field.value.contains(stem))
        .then(|| RuleHit::new(6.5, Promotion::Keep))
}

fn synonym(field: &FieldText, context: &QueryContext, _: &SearchOptions) -> Option<RuleHit> {
    context
        .synonyms
        .iter()
        .any(|synonym| field.value.contains(synonym.as_str()))
        .then(|| RuleHit::new(6.0, Promotion::IfPartial(MatchType::Semantic)))
}

fn word(field: &FieldText, context: &QueryContext, options: &SearchOptions) -> Option<RuleHit> {
    if field.words().any(|word| word == context.query) {
        return Some(RuleHit::new(6.0, Promotion::Keep));
    }
    if field.words().any(|word| stem(word) == context.stemmed_query.as_str()) {
        return Some(RuleHit::new(5.8, Promotion::Force(MatchType::Exact)));
    }
    field
        .best_fuzzy(&context.query, options.fuzzy_threshold)
        .map(|score| RuleHit::new(5.0 * score, Promotion::IfPartial(MatchType::Fuzzy)))
}

/// Runs the whole-query cascade and returns the first rule that fires.
pub fn first_match(
    field: &FieldText,
    context: &QueryContext,
    options: &SearchOptions,
) -> Option<(&'static MatchRule, RuleHit)> {
    FIELD_RULES
        .iter()
        .find_map(|rule| rule.check(field, context, options).map(|hit| (rule, hit)))
}

/// Per-term partial credit, additive with the cascade.
///
/// Each term contributes the first of: substring (x3), stemmed substring
/// (x2.8), best fuzzy word (x2 x similarity). Returns `None` when no term
/// contributed anything.
pub fn term_credit(
    field: &FieldText,
    context: &QueryContext,
    options: &SearchOptions,
) -> Option<RuleHit> {
    let mut multiplier = 0.0;
    let mut promotion = Promotion::Keep;
    let mut hit = false;

    for (term, stem) in context.terms_with_stems() {
        if field.value.contains(term) {
            multiplier += 3.0;
        } else if field.value.contains(stem) {
            multiplier += 2.8;
        } else if let Some(score) = field.best_fuzzy(term, options.fuzzy_threshold) {
            multiplier += 2.0 * score;
            promotion = Promotion::IfPartial(MatchType::Fuzzy);
        } else {
            continue;
        }
        hit = true;
    }

    hit.then(|| RuleHit::new(multiplier, promotion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::SynonymTable;

    fn context(query: &str) -> QueryContext {
        QueryContext::new(query, &SynonymTable::default())
    }

    fn fire(value: &str, query: &str) -> Option<(&'static str, f64)> {
        first_match(
            &FieldText::new(value.to_lowercase()),
            &context(query),
            &SearchOptions::default(),
        )
        .map(|(rule, hit)| (rule.name, hit.multiplier))
    }

    #[test]
    fn test_default_field_table() {
        let fields = default_fields();
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["name", "sku", "category", "description", "tags", "barcode", "supplier", "location"]
        );
        let total: f64 = fields.iter().map(|f| f.weight).sum();
        assert_eq!(total, 48.0);
    }

    #[test]
    fn test_field_read_skips_blank_and_joins_tags() {
        let item = SearchableItem::new("1").name("  ").tags(["Red", "Outdoor"]);
        let fields = default_fields();
        assert_eq!(fields[0].read(&item), None);
        assert_eq!(fields[4].read(&item).as_deref(), Some("red outdoor"));
        assert_eq!(fields[1].read(&item), None);
    }

    #[test]
    fn test_cascade_priority() {
        assert_eq!(fire("Hammer", "hammer"), Some(("exact", 10.0)));
        assert_eq!(fire("Hammer", "hammers"), Some(("stemmed-exact", 9.5)));
        assert_eq!(fire("Claw Hammer", "hammer"), Some(("contains", 8.0)));
        assert_eq!(fire("Claw Hammer", "hammers"), Some(("stemmed-contains", 7.5)));
        assert_eq!(fire("Red", "red paint"), Some(("contained-in-query", 7.0)));
        assert_eq!(fire("paint red", "red paint"), Some(("all-terms", 7.0)));
        assert_eq!(fire("painted reds", "red paints"), Some(("all-terms", 6.5)));
        assert_eq!(fire("rubber mallet", "hammer"), Some(("synonym", 6.0)));
    }

    #[test]
    fn test_short_field_is_not_contained_in_query() {
        assert_eq!(fire("ab", "abc saw"), None);
    }

    #[test]
    fn test_word_rule_fuzzy_fallback() {
        let (name, multiplier) = fire("Claw Hamer", "hammer").unwrap();
        assert_eq!(name, "word");
        assert!(multiplier > 4.0 && multiplier < 5.0);
        assert_eq!(fire("Claw Wrench", "hammer"), None);
    }

    #[test]
    fn test_word_rule_stemmed_word_forces_exact() {
        let hit = word(
            &FieldText::new("boxed nails".to_string()),
            &context("box"),
            &SearchOptions::default(),
        )
        .unwrap();
        assert_eq!(hit.multiplier, 5.8);
        assert_eq!(hit.promotion, Promotion::Force(MatchType::Exact));
    }

    #[test]
    fn test_term_credit_adds_per_term() {
        let field = FieldText::new("steel claw hammers".to_string());
        let hit = term_credit(&field, &context("claw hammer"), &SearchOptions::default()).unwrap();
        assert!((hit.multiplier - 6.0).abs() < 1e-9);

        let hit = term_credit(&field, &context("hammered"), &SearchOptions::default()).unwrap();
        assert!((hit.multiplier - 2.8).abs() < 1e-9);

        assert!(term_credit(&field, &context("paint"), &SearchOptions::default()).is_none());
    }

    #[test]
    fn test_promotion() {
        use MatchType::*;
        assert_eq!(Promotion::IfPartial(Fuzzy).apply(Partial), Fuzzy);
        assert_eq!(Promotion::IfPartial(Fuzzy).apply(Semantic), Semantic);
        assert_eq!(Promotion::Force(Exact).apply(Fuzzy), Exact);
        assert_eq!(Promotion::Keep.apply(Semantic), Semantic);
    }
}
