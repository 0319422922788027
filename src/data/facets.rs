use std::collections::BTreeSet;

use super::model::Product;

/// Distinct values of the categorical columns, offered as filter choices.
/// Built from the whole catalog, never from a filtered view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub categories: Vec<String>,
    pub brands: Vec<String>,
    pub warranties: Vec<String>,
}

impl Facets {
    /// Collect sorted, de-duplicated, non-empty values per facet.
    pub fn from_products(products: &[Product]) -> Self {
        let mut categories = BTreeSet::new();
        let mut brands = BTreeSet::new();
        let mut warranties = BTreeSet::new();

        for p in products {
            if !p.category.is_empty() {
                categories.insert(p.category.as_str());
            }
            if !p.brand.is_empty() {
                brands.insert(p.brand.as_str());
            }
            if !p.warranty.is_empty() {
                warranties.insert(p.warranty.as_str());
            }
        }

        let owned = |set: BTreeSet<&str>| -> Vec<String> {
            set.into_iter().map(str::to_string).collect()
        };
        Facets {
            categories: owned(categories),
            brands: owned(brands),
            warranties: owned(warranties),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty() && self.brands.is_empty() && self.warranties.is_empty()
    }
}
