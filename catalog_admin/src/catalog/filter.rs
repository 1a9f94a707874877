// catalog/filter.rs - Search and category filtering over a snapshot
//
// Filtering never reorders: the output keeps the snapshot's order.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::model::{Category, Product, UnknownCategory};

/// Wire value of the "every category" option
pub const ALL_CATEGORIES: &str = "all";

/// Category selector of the list view
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(category) => category.as_str(),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Case-insensitive substring match on name or description.
/// A blank term matches everything; otherwise the term is used as typed.
pub fn matches_search(product: &Product, search_term: &str) -> bool {
    if search_term.trim().is_empty() {
        return true;
    }
    let term = search_term.to_lowercase();
    product.name.to_lowercase().contains(&term) || product.description.to_lowercase().contains(&term)
}

/// Filter a snapshot by search term AND category
pub fn filter_products(products: &[Product], search_term: &str, category: CategoryFilter) -> Vec<Product> {
    let filtered: Vec<Product> = products
        .iter()
        .filter(|p| category.matches(p.category) && matches_search(p, search_term))
        .cloned()
        .collect();

    tracing::debug!(
        "Filtered {} of {} products (term='{}', category={})",
        filtered.len(),
        products.len(),
        search_term,
        category.as_str()
    );

    filtered
}
