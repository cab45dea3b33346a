mod common;

use medledger_core::{categories, filter_items, CatalogQuery, CategoryFilter};

use common::{inventory_item, listing};

fn marketplace() -> Vec<medledger_core::ProductListing> {
    vec![
        listing(
            "1",
            "Amoxicillin 500mg",
            "Broad-spectrum antibiotic for bacterial infections",
            "Antibiotics",
        ),
        listing(
            "2",
            "Surgical Gloves (Box of 100)",
            "Latex-free surgical gloves for medical procedures",
            "Consumables",
        ),
        listing(
            "3",
            "Blood Pressure Monitor",
            "Digital automatic blood pressure monitor",
            "Equipment",
        ),
        listing("4", "Insulin Pens", "Disposable insulin delivery pens", "Diabetes Care"),
    ]
}

fn ids<T>(items: &[&T], id: impl Fn(&T) -> &str) -> Vec<String> {
    items.iter().map(|x| id(x).to_owned()).collect()
}

#[test]
fn empty_query_matches_everything() {
    let products = marketplace();
    let hits = filter_items(&products, &CatalogQuery::default());
    assert_eq!(hits.len(), products.len());
}

#[test]
fn term_matches_name_or_description_case_insensitively() {
    let products = marketplace();

    let by_name = filter_items(&products, &CatalogQuery::new("INSULIN", CategoryFilter::All));
    assert_eq!(ids(&by_name, |p| p.id.as_str()), vec!["4"]);

    let by_description = filter_items(&products, &CatalogQuery::new("latex", CategoryFilter::All));
    assert_eq!(ids(&by_description, |p| p.id.as_str()), vec!["2"]);

    let none = filter_items(&products, &CatalogQuery::new("ventilator", CategoryFilter::All));
    assert!(none.is_empty());
}

#[test]
fn selected_category_must_match_exactly() {
    let products = marketplace();

    let equipment = filter_items(
        &products,
        &CatalogQuery::new("", CategoryFilter::Named("Equipment".to_owned())),
    );
    assert_eq!(ids(&equipment, |p| p.id.as_str()), vec!["3"]);

    let mismatch = filter_items(
        &products,
        &CatalogQuery::new("monitor", CategoryFilter::Named("Antibiotics".to_owned())),
    );
    assert!(mismatch.is_empty());

    let lowercase = filter_items(
        &products,
        &CatalogQuery::new("", CategoryFilter::Named("equipment".to_owned())),
    );
    assert!(lowercase.is_empty());
}

#[test]
fn selector_value_all_disables_category_filter() {
    assert_eq!(CategoryFilter::from_selector("all"), CategoryFilter::All);
    assert_eq!(CategoryFilter::from_selector(""), CategoryFilter::All);
    assert_eq!(
        CategoryFilter::from_selector("Consumables"),
        CategoryFilter::Named("Consumables".to_owned())
    );
}

#[test]
fn inventory_filters_on_name_and_category() {
    let mut gloves = inventory_item("2", "Surgical Gloves (Box)", "Consumables", 156);
    gloves.description = "Latex-free".to_owned();
    let stock = vec![
        inventory_item("1", "Amoxicillin 500mg", "Antibiotics", 45),
        gloves,
        inventory_item("3", "Insulin Pens", "Diabetes Care", 12),
    ];

    let hits = filter_items(
        &stock,
        &CatalogQuery::new("LATEX", CategoryFilter::from_selector("Consumables")),
    );
    assert_eq!(ids(&hits, |i| i.id.as_str()), vec!["2"]);

    let restock: Vec<_> = stock.iter().filter(|i| i.needs_restock()).map(|i| i.id.as_str()).collect();
    assert_eq!(restock, vec!["1", "3"]);
}

#[test]
fn categories_are_distinct_in_first_seen_order() {
    let mut products = marketplace();
    products.push(listing("5", "Azithromycin", "macrolide", "Antibiotics"));

    assert_eq!(
        categories(&products),
        vec!["Antibiotics", "Consumables", "Equipment", "Diabetes Care"]
    );
}
