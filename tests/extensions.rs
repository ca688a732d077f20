use rummage::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct QueryRewriteExt;

impl SearchExtension for QueryRewriteExt {
  fn before_query(&self, query: &mut String) {
    if query.trim() == "ss" {
      *query = "stainless steel".to_string();
    }
  }
}

struct ResultModifyExt;

impl SearchExtension for ResultModifyExt {
  fn after_limit(&self, _context: &QueryContext, results: &mut Vec<SearchResult<'_>>) {
    for m in results {
      m.score += 0.1; // Boost score
    }
  }
}

struct DropDiscontinuedSupplierExt;

impl SearchExtension for DropDiscontinuedSupplierExt {
  fn after_score(&self, _context: &QueryContext, results: &mut Vec<SearchResult<'_>>) {
    results.retain(|m| m.item.supplier.as_deref() != Some("Defunct Co"));
  }
}

struct CountingExt {
  before_limit_seen: Arc<AtomicUsize>,
}

impl SearchExtension for CountingExt {
  fn before_limit(&self, _context: &QueryContext, results: &mut Vec<SearchResult<'_>>) {
    self.before_limit_seen.store(results.len(), Ordering::SeqCst);
  }
}

fn items() -> Vec<SearchableItem> {
  vec![
    SearchableItem::new("1").name("Stainless Steel Bolt").supplier("Acme"),
    SearchableItem::new("2").name("Steel Bolt").supplier("Defunct Co"),
    SearchableItem::new("3").name("Brass Bolt").supplier("Acme"),
  ]
}

#[test]
fn test_query_rewrite() {
  let engine = SearchEngine::builder()
    .with_extension(Box::new(QueryRewriteExt))
    .build();
  let items = items();

  let results = engine.search(&items, "ss", &SearchOptions::default());
  assert_eq!(results.len(), 1, "Query rewrite failed");
  assert_eq!(results[0].item.id, "1");
}

#[test]
fn test_result_boost() {
  let plain = SearchEngine::default();
  let boosted = SearchEngine::builder()
    .with_extension(Box::new(ResultModifyExt))
    .build();
  let items = items();

  let before = plain.search(&items, "bolt", &SearchOptions::default());
  let after = boosted.search(&items, "bolt", &SearchOptions::default());
  assert_eq!(before.len(), after.len());
  for (b, a) in before.iter().zip(&after) {
    assert!((a.score - b.score - 0.1).abs() < 1e-9, "Score boost failed");
  }
}

#[test]
fn test_after_score_filtering() {
  let engine = SearchEngine::builder()
    .with_extension(Box::new(DropDiscontinuedSupplierExt))
    .build();
  let items = items();

  let results = engine.search(&items, "bolt", &SearchOptions::default());
  assert!(results.iter().all(|m| m.item.id != "2"));
  assert_eq!(results.len(), 2);
}

#[test]
fn test_before_limit_sees_untruncated_list() {
  let seen = Arc::new(AtomicUsize::new(0));
  let engine = SearchEngine::builder()
    .with_extension(Box::new(CountingExt {
      before_limit_seen: Arc::clone(&seen),
    }))
    .build();
  let items = items();

  let results = engine.search(&items, "bolt", &SearchOptions::default().max_results(1));
  assert_eq!(results.len(), 1);
  assert_eq!(seen.load(Ordering::SeqCst), 3);
}
