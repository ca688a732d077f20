use rummage::prelude::*;
use std::borrow::Cow;

fn first_tag(item: &SearchableItem) -> Option<Cow<'_, str>> {
  item.tags.as_ref()?.first().map(|tag| Cow::Borrowed(tag.as_str()))
}

fn name_only(item: &SearchableItem) -> Option<Cow<'_, str>> {
  item.name.as_deref().map(Cow::Borrowed)
}

#[test]
fn test_custom_field_is_scored_and_reported() {
  let engine = SearchEngine::builder().field("brand", 9.0, first_tag).build();
  let items = vec![
    SearchableItem::new("1").name("Cordless Drill").tags(["makita", "18v"]),
    SearchableItem::new("2").name("Cordless Drill").tags(["ryobi"]),
  ];

  let results = engine.search(&items, "makita", &SearchOptions::default());
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].item.id, "1");
  assert!(results[0].matched_fields.contains("brand"));
  assert!(results[0].matched_fields.contains("tags"));
}

#[test]
fn test_replaced_table_ignores_other_fields() {
  let engine = SearchEngine::builder()
    .fields(vec![FieldSpec::new("name", 10.0, name_only)])
    .build();
  let items = vec![
    SearchableItem::new("1").name("Hex Key").description("allen wrench"),
    SearchableItem::new("2").name("Allen Wrench"),
  ];

  let results = engine.search(&items, "allen", &SearchOptions::default());
  assert_eq!(results.len(), 1);
  assert_eq!(results[0].item.id, "2");
}

#[test]
fn test_normalization_follows_field_table() {
  let engine = SearchEngine::builder()
    .fields(vec![FieldSpec::new("name", 10.0, name_only)])
    .build();
  let items = vec![SearchableItem::new("1").name("Anvil")];

  // exact (10 x 10) plus term credit (10 x 3), over a maximum of 100
  let results = engine.search(&items, "anvil", &SearchOptions::default());
  assert!((results[0].score - 1.3).abs() < 1e-9);
}
