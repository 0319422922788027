use super::facets::Facets;
use super::model::Product;

// ---------------------------------------------------------------------------
// Catalog – the imported product list for the session
// ---------------------------------------------------------------------------

/// Ordered product list plus its facet index. Replaced wholesale on every
/// successful import; there is no incremental merge.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    facets: Facets,
}

impl Catalog {
    /// Build the catalog and its facet index.
    pub fn from_products(products: Vec<Product>) -> Self {
        let facets = Facets::from_products(&products);
        Catalog { products, facets }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn facets(&self) -> &Facets {
        &self.facets
    }

    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
