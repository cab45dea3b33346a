//! Term + category filtering shared by the marketplace grid and inventory table.

use crate::domain::{InventoryItem, ProductListing};

pub trait Searchable {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;
}

impl Searchable for ProductListing {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}

impl Searchable for InventoryItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn category(&self) -> &str {
        &self.category
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Maps the selector value used by the dashboards; "all" means no filter.
    pub fn from_selector(raw: &str) -> Self {
        if raw.is_empty() || raw.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Named(raw.to_owned())
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub term: String,
    pub category: CategoryFilter,
}

impl CatalogQuery {
    pub fn new(term: impl Into<String>, category: CategoryFilter) -> Self {
        Self {
            term: term.into(),
            category,
        }
    }

    pub fn matches<T: Searchable + ?Sized>(&self, item: &T) -> bool {
        let term = self.term.to_lowercase();
        let matches_term = term.is_empty()
            || item.name().to_lowercase().contains(&term)
            || item.description().to_lowercase().contains(&term);
        let matches_category = match &self.category {
            CategoryFilter::All => true,
            CategoryFilter::Named(c) => item.category() == c,
        };
        matches_term && matches_category
    }
}

pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &CatalogQuery) -> Vec<&'a T> {
    items.iter().filter(|item| query.matches(*item)).collect()
}

/// Distinct categories in first-seen order.
pub fn categories<T: Searchable>(items: &[T]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !out.iter().any(|c| c == item.category()) {
            out.push(item.category().to_owned());
        }
    }
    out
}
