//! Product catalog loaded once at startup.
//!
//! The catalog is read-only after load: products are deserialized from the
//! embedded `data/catalog.json` and never mutated for the life of the
//! session. All queries hand out clones of the immutable records.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use aeromerge_core::{Price, ProductId, Size};

/// Embedded sample catalog data.
const CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// A product record. Immutable after catalog load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: String,
    pub colors: Vec<String>,
    pub sizes: Vec<Size>,
    pub description: String,
    pub long_description: String,
    /// Opaque image reference for the presentation layer.
    pub image: String,
    #[serde(default)]
    pub featured: bool,
    pub stock: u32,
}

/// Sort order for catalog listings.
///
/// `Popularity` sorts by descending stock count. Stock level is a stand-in
/// signal for popularity; the proxy semantic is intentional and the name is
/// kept until a real popularity metric exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceLow,
    PriceHigh,
    Popularity,
    #[default]
    Newest,
}

/// Error loading the catalog data file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to parse catalog data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// In-memory product catalog.
///
/// Cheaply cloneable via `Arc`; every clone sees the same immutable product
/// list.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    products: Arc<Vec<Product>>,
}

impl CatalogStore {
    /// Load the catalog from the embedded data file.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file is malformed or contains a
    /// duplicate product id.
    pub fn load() -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(CATALOG_JSON)?;

        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        tracing::info!(count = products.len(), "catalog loaded");
        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// All products in natural (insertion, id-ascending) order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id. Unknown ids return `None`, never an error.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Products flagged as featured, in natural order.
    #[must_use]
    pub fn featured(&self) -> Vec<Product> {
        self.products.iter().filter(|p| p.featured).cloned().collect()
    }

    /// Filter by category (if given), then sort.
    ///
    /// Filtering and sorting are independent: the category filter is applied
    /// first, then the chosen sort orders the filtered subset.
    #[must_use]
    pub fn query(&self, category: Option<&str>, sort: SortKey) -> Vec<Product> {
        let mut results: Vec<Product> = self
            .products
            .iter()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();

        match sort {
            SortKey::PriceLow => results.sort_by(|a, b| a.price.amount.cmp(&b.price.amount)),
            SortKey::PriceHigh => results.sort_by(|a, b| b.price.amount.cmp(&a.price.amount)),
            SortKey::Popularity => results.sort_by(|a, b| b.stock.cmp(&a.stock)),
            SortKey::Newest => results.sort_by(|a, b| b.id.cmp(&a.id)),
        }

        results
    }

    /// Case-insensitive substring search against name, description, and
    /// category.
    ///
    /// An empty or whitespace-only query returns the full catalog in natural
    /// order.
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<Product> {
        let query = text.trim().to_lowercase();
        if query.is_empty() {
            return self.products.as_ref().clone();
        }

        self.products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&query)
                    || p.description.to_lowercase().contains(&query)
                    || p.category.to_lowercase().contains(&query)
            })
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(products: &[Product]) -> Vec<i32> {
        products.iter().map(|p| p.id.as_i32()).collect()
    }

    #[test]
    fn test_load_sample_catalog() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(catalog.all().len(), 3);
        assert_eq!(ids(catalog.all()), vec![1, 2, 3]);
    }

    #[test]
    fn test_find_known_and_unknown() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        let product = catalog.find(ProductId::new(1)).expect("id 1 exists");
        assert_eq!(product.name, "AEROMERGE Drift Knit");
        assert!(catalog.find(ProductId::new(999)).is_none());
    }

    #[test]
    fn test_featured_products() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(catalog.featured().len(), 3);
    }

    #[test]
    fn test_query_category_filter() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        let racing = catalog.query(Some("racing"), SortKey::default());
        assert_eq!(racing.len(), 1);
        assert_eq!(
            racing.first().map(|p| p.name.as_str()),
            Some("AEROMERGE Pulse Racer")
        );
    }

    #[test]
    fn test_query_unknown_category_is_empty() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert!(catalog.query(Some("sandals"), SortKey::default()).is_empty());
    }

    #[test]
    fn test_sort_price_ascending() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(ids(&catalog.query(None, SortKey::PriceLow)), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_price_descending() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(ids(&catalog.query(None, SortKey::PriceHigh)), vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_popularity_by_stock() {
        // Stock counts: id 1 = 50, id 3 = 42, id 2 = 35.
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(ids(&catalog.query(None, SortKey::Popularity)), vec![1, 3, 2]);
    }

    #[test]
    fn test_sort_newest_is_default() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(ids(&catalog.query(None, SortKey::default())), vec![3, 2, 1]);
    }

    #[test]
    fn test_search_case_insensitive() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(ids(&catalog.search("KNIT")), vec![1, 2]);
    }

    #[test]
    fn test_search_matches_category() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(ids(&catalog.search("racing")), vec![3]);
    }

    #[test]
    fn test_search_empty_returns_full_catalog_in_natural_order() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert_eq!(ids(&catalog.search("")), vec![1, 2, 3]);
        assert_eq!(ids(&catalog.search("   ")), vec![1, 2, 3]);
    }

    #[test]
    fn test_search_no_match_is_empty() {
        let catalog = CatalogStore::load().expect("embedded catalog parses");
        assert!(catalog.search("sandals").is_empty());
    }

    #[test]
    fn test_sort_key_wire_names() {
        // The presentation layer sends kebab-case sort values.
        let key: SortKey = serde_json::from_str("\"price-low\"").expect("parses");
        assert_eq!(key, SortKey::PriceLow);
    }
}
