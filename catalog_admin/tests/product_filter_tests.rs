// tests/product_filter_tests.rs - Search and category filtering over the sample catalog

use catalog_admin::catalog::{filter_products, Category, CategoryFilter, Product};
use catalog_admin::fixtures::sample_products;

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn test_empty_filter_returns_snapshot_unchanged() {
    let products = sample_products();

    let filtered = filter_products(&products, "", CategoryFilter::All);

    assert_eq!(filtered, products);
}

#[test]
fn test_whitespace_term_behaves_like_empty() {
    let products = sample_products();
    assert_eq!(filter_products(&products, "   ", CategoryFilter::All), products);
}

#[test]
fn test_search_is_case_insensitive_on_name_and_description() {
    let products = sample_products();

    assert_eq!(
        names(&filter_products(&products, "AÇAÍ", CategoryFilter::All)),
        vec!["Açaí 300ml", "Açaí 500ml", "Combo Casal"]
    );
    // "granola" appears in one name and in the Açaí 300ml description
    assert_eq!(
        names(&filter_products(&products, "granola", CategoryFilter::All)),
        vec!["Açaí 300ml", "Granola"]
    );
}

#[test]
fn test_non_blank_term_keeps_its_spaces() {
    let products = sample_products();

    // Only the Combo description has "500ml" followed by a space
    assert_eq!(
        names(&filter_products(&products, "500ml ", CategoryFilter::All)),
        vec!["Combo Casal"]
    );
    assert_eq!(filter_products(&products, "500ml", CategoryFilter::All).len(), 3);
}

#[test]
fn test_category_and_search_are_combined() {
    let products = sample_products();

    let filtered = filter_products(&products, "500ml", CategoryFilter::Only(Category::Acai));

    assert_eq!(names(&filtered), vec!["Açaí 500ml"]);
}

#[test]
fn test_category_without_products_is_empty() {
    let products = sample_products();
    assert!(filter_products(&products, "", CategoryFilter::Only(Category::Vitamina)).is_empty());
}

#[test]
fn test_filter_is_subset_and_idempotent() {
    let products = sample_products();
    let cases = [
        ("", CategoryFilter::All),
        ("ml", CategoryFilter::All),
        ("a", CategoryFilter::Only(Category::Acai)),
        ("morango", CategoryFilter::Only(Category::Milkshake)),
        ("inexistente", CategoryFilter::All),
        ("", CategoryFilter::Only(Category::Bebidas)),
    ];

    for (term, category) in cases {
        let once = filter_products(&products, term, category);
        assert!(once.iter().all(|p| products.contains(p)), "subset for {:?}", term);

        let twice = filter_products(&once, term, category);
        assert_eq!(twice, once, "idempotent for {:?}/{:?}", term, category);
    }
}

#[test]
fn test_filter_preserves_snapshot_order() {
    let mut products = sample_products();
    products.reverse();

    let filtered = filter_products(&products, "a", CategoryFilter::All);

    let positions: Vec<usize> = filtered
        .iter()
        .map(|p| products.iter().position(|q| q.id == p.id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_inactive_products_are_not_hidden() {
    let products = sample_products();
    let filtered = filter_products(&products, "sem gás", CategoryFilter::All);
    assert_eq!(names(&filtered), vec!["Água sem Gás"]);
    assert!(!filtered[0].is_active);
}

#[test]
fn test_category_filter_parses_all_sentinel() {
    assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
    assert_eq!(
        "sorvetes".parse::<CategoryFilter>().unwrap(),
        CategoryFilter::Only(Category::Sorvetes)
    );
    assert!("pizza".parse::<CategoryFilter>().is_err());
}
