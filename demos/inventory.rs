//! Inventory search example: typos, plurals, synonyms and embedded constraints.
//!
//! Run with `RUST_LOG=rummage=debug cargo run --example inventory` to see the
//! engine's tracing output.

use rummage::prelude::*;
use tracing_subscriber::EnvFilter;

fn sample_catalog() -> Vec<SearchableItem> {
    vec![
        SearchableItem::new("HM-100")
            .name("Claw Hammer")
            .sku("HM-100")
            .category("Hand Tools")
            .description("16 oz fiberglass handle")
            .tags(["framing", "red"])
            .price(24.99)
            .quantity(18),
        SearchableItem::new("HM-200")
            .name("Sledge Hammer")
            .sku("HM-200")
            .category("Hand Tools")
            .description("8 lb steel head for demolition")
            .price(54.50)
            .quantity(0),
        SearchableItem::new("ML-010")
            .name("Rubber Mallet")
            .category("Hand Tools")
            .price(12.00)
            .quantity(7),
        SearchableItem::new("SC-350")
            .name("Wood Screws")
            .sku("SC-350")
            .category("Fasteners")
            .description("#8 x 1-1/4 in, box of 100")
            .supplier("Fastenal")
            .location("Aisle 4")
            .price(6.75)
            .quantity(240),
        SearchableItem::new("PT-020")
            .name("Exterior Paint")
            .category("Paint")
            .description("crimson satin finish, one gallon")
            .price(38.00)
            .quantity(11),
        SearchableItem::new("DR-018")
            .name("Cordless Drill")
            .category("Power Tools")
            .description("18V with two batteries")
            .tags(["driver"])
            .price(129.00)
            .quantity(3),
        SearchableItem::new("DR-001")
            .name("Corded Drill")
            .category("Power Tools")
            .status(ItemStatus::Discontinued)
            .price(49.00)
            .quantity(2),
    ]
}

fn print_results(query: &str, results: &[SearchResult<'_>]) {
    println!("Query: \"{query}\"");
    if results.is_empty() {
        println!("   (no matches)\n");
        return;
    }
    for (i, result) in results.iter().enumerate() {
        let item = result.item;
        println!(
            "{}. {} [{}] ${:.2} x{} (score: {:.3}, {:?})",
            i + 1,
            item.name.as_deref().unwrap_or("?"),
            item.id,
            item.price_tier1,
            item.quantity_on_hand,
            result.score,
            result.match_type,
        );
        let fields: Vec<&str> = result.matched_fields.iter().map(String::as_str).collect();
        println!("   fields: {}", fields.join(", "));
    }
    println!();
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    println!("=== Rummage Inventory Example ===\n");

    let catalog = sample_catalog();
    println!("Searching {} items\n", catalog.len());

    let options = SearchOptions::default();
    for query in [
        "hammer under $40",
        "hammers",
        "hammer out of stock",
        "crimson paint",
        "drill",
        "screws 5-10",
    ] {
        print_results(query, &rummage::search(&catalog, query, &options));
    }

    let cheapest_first = SearchOptions::default()
        .sort_by(SortBy::Price)
        .sort_order(SortOrder::Asc)
        .include_inactive(true);
    print_results(
        "tool (cheapest first, inactive included)",
        &rummage::search(&catalog, "tool", &cheapest_first),
    );

    match SearchOptions::from_json(r#"{"fuzzyThreshold": 2.0}"#) {
        Ok(_) => println!("options accepted"),
        Err(err) => println!("options rejected: {err}"),
    }
}
