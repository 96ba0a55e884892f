//! # Catalog Resolver
//!
//! Read-only queries over the immutable product list.
//!
//! ## Query Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    How Filtering Works                                  │
//! │                                                                         │
//! │  filter("shirt", ["Clothing"], Some(Low))                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  For each product, in catalog order:                                   │
//! │    (a) "shirt" ⊂ lowercase(name | description | category)  AND        │
//! │    (b) categories empty  OR  category ∈ categories         AND        │
//! │    (c) tier absent       OR  classify(footprint) == tier              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Matching products, catalog order, no ranking                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Alternatives
//! A product lists alternative ids; ids missing from the catalog are
//! silently skipped. Nothing here is cached, so every answer reflects the
//! catalog the resolver was built from.

use serde::Serialize;
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};
use crate::impact;
use crate::types::{FootprintTier, Product, ProductId};
use crate::validation;

/// Classifies a footprint value into its tier.
///
/// Same rule as [`FootprintTier::classify`], exposed alongside the other
/// catalog queries.
#[inline]
pub fn classify_footprint(kg_co2e: f64) -> FootprintTier {
    FootprintTier::classify(kg_co2e)
}

// =============================================================================
// Catalog Filter
// =============================================================================

/// The three conjunctive conditions of a catalog search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Lowercased search text. Empty matches everything.
    query: String,
    categories: Vec<String>,
    tier: Option<FootprintTier>,
}

impl CatalogFilter {
    pub fn new(query: &str, categories: Vec<String>, tier: Option<FootprintTier>) -> Self {
        CatalogFilter {
            query: query.to_lowercase(),
            categories,
            tier,
        }
    }

    /// Checks a product against all three conditions.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_query(product) && self.matches_category(product) && self.matches_tier(product)
    }

    fn matches_query(&self, product: &Product) -> bool {
        if self.query.is_empty() {
            return true;
        }
        [&product.name, &product.description, &product.category]
            .iter()
            .any(|field| field.to_lowercase().contains(&self.query))
    }

    fn matches_category(&self, product: &Product) -> bool {
        self.categories.is_empty() || self.categories.contains(&product.category)
    }

    fn matches_tier(&self, product: &Product) -> bool {
        self.tier
            .map_or(true, |tier| product.footprint_tier() == tier)
    }

    /// True when no condition narrows the result.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty() && self.categories.is_empty() && self.tier.is_none()
    }
}

// =============================================================================
// Comparison
// =============================================================================

/// A product set against its resolvable alternatives.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison<'a> {
    pub product: &'a Product,
    pub alternatives: Vec<&'a Product>,
    /// Lowest-footprint alternative.
    pub best: Option<&'a Product>,
    /// Footprint avoided by switching to `best`, kg CO₂e.
    pub savings_kg: Option<f64>,
    /// `savings_kg` as a share of the product's footprint.
    pub savings_percent: Option<f64>,
}

// =============================================================================
// Catalog
// =============================================================================

/// The immutable product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog, rejecting invalid records and duplicate ids.
    pub fn new(products: Vec<Product>) -> CoreResult<Self> {
        validation::validate_catalog(&products)?;

        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();

        Ok(Catalog { products, index })
    }

    /// Parses a JSON array of product records.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).map_err(|e| CoreError::MalformedCatalog(e.to_string()))?;
        Catalog::new(products)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Looks up a product by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.index.get(&id).map(|&position| &self.products[position])
    }

    /// Distinct categories, in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category.as_str()) {
                categories.push(&product.category);
            }
        }
        categories
    }

    /// Products matching all of: text query, category set, footprint tier.
    ///
    /// ## Arguments
    /// * `query` - Case-insensitive substring of name, description or
    ///   category. Empty matches everything.
    /// * `categories` - Allowed categories (exact match). Empty allows all.
    /// * `tier` - Required footprint tier. `None` allows all.
    pub fn filter(
        &self,
        query: &str,
        categories: &[String],
        tier: Option<FootprintTier>,
    ) -> Vec<&Product> {
        self.search(&CatalogFilter::new(query, categories.to_vec(), tier))
    }

    /// Products matching a prepared filter, in catalog order.
    pub fn search(&self, filter: &CatalogFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Resolves a product's alternative ids, in listed order.
    ///
    /// Ids with no catalog entry are dropped.
    pub fn alternatives_of(&self, product: &Product) -> Vec<&Product> {
        product
            .alternatives
            .iter()
            .filter_map(|&id| self.get(id))
            .collect()
    }

    /// The alternative with the lowest footprint.
    ///
    /// Ties go to the one listed first. `None` when nothing resolves.
    pub fn best_alternative(&self, product: &Product) -> Option<&Product> {
        self.alternatives_of(product)
            .into_iter()
            .fold(None, |best: Option<&Product>, alt| match best {
                Some(current) if current.carbon_footprint <= alt.carbon_footprint => Some(current),
                _ => Some(alt),
            })
    }

    /// Sets a product against its alternatives.
    pub fn compare<'a>(&'a self, product: &'a Product) -> Comparison<'a> {
        let alternatives = self.alternatives_of(product);
        let best = self.best_alternative(product);
        let savings_kg = best.map(|alt| product.carbon_footprint - alt.carbon_footprint);
        let savings_percent = best.and_then(|alt| {
            impact::reduction_percent(product.carbon_footprint, alt.carbon_footprint)
        });

        Comparison {
            product,
            alternatives,
            best,
            savings_kg,
            savings_percent,
        }
    }

    /// Footprint avoided if every product were swapped for its best alternative.
    pub fn potential_savings(&self) -> f64 {
        self.products
            .iter()
            .filter_map(|p| {
                self.best_alternative(p)
                    .map(|best| p.carbon_footprint - best.carbon_footprint)
            })
            .sum()
    }

    /// Number of products listing at least one alternative id.
    pub fn alternatives_count(&self) -> usize {
        self.products.iter().filter(|p| p.has_alternatives()).count()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: u32, name: &str, category: &str, footprint: f64, alternatives: &[u32]) -> Product {
        Product {
            id: ProductId(id),
            name: name.to_string(),
            category: category.to_string(),
            image: None,
            price: Money::from_cents(1000),
            carbon_footprint: footprint,
            description: format!("{} description", name),
            alternatives: alternatives.iter().map(|&a| ProductId(a)).collect(),
        }
    }

    fn three_products() -> Catalog {
        Catalog::new(vec![
            product(1, "Cotton T-Shirt", "Clothing", 20.0, &[2, 99, 3]),
            product(2, "Organic Tee", "Apparel", 5.0, &[]),
            product(3, "Steel Bottle", "Kitchen", 5.0, &[]),
        ])
        .unwrap()
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::new(vec![
            product(1, "A", "Kitchen", 1.0, &[]),
            product(2, "B", "Clothing", 1.0, &[]),
            product(3, "C", "Kitchen", 1.0, &[]),
            product(4, "D", "Garden", 1.0, &[]),
        ])
        .unwrap();

        assert_eq!(catalog.categories(), vec!["Kitchen", "Clothing", "Garden"]);
        assert!(Catalog::default().categories().is_empty());
    }

    #[test]
    fn test_filter_empty_returns_all_in_order() {
        let catalog = three_products();
        let ids: Vec<ProductId> = catalog.filter("", &[], None).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId(1), ProductId(2), ProductId(3)]);
    }

    #[test]
    fn test_filter_query_is_case_insensitive() {
        let catalog = three_products();

        let hits = catalog.filter("SHIRT", &[], None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProductId(1));

        // Category text matches too.
        let hits = catalog.filter("kitch", &[], None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, ProductId(3));

        // Description text matches too.
        assert_eq!(catalog.filter("tee description", &[], None).len(), 1);
    }

    #[test]
    fn test_filter_conditions_are_conjunctive() {
        let catalog = three_products();

        let categories = vec!["Apparel".to_string(), "Clothing".to_string()];
        let ids: Vec<ProductId> = catalog
            .filter("", &categories, Some(FootprintTier::Low))
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![ProductId(2)]);

        assert!(catalog.filter("bottle", &categories, None).is_empty());
        assert_eq!(catalog.filter("", &[], Some(FootprintTier::High)).len(), 1);
        assert!(catalog.filter("", &[], Some(FootprintTier::Medium)).is_empty());
    }

    #[test]
    fn test_category_match_is_exact() {
        let catalog = three_products();
        assert!(catalog.filter("", &["clothing".to_string()], None).is_empty());
    }

    #[test]
    fn test_alternatives_drop_dangling_ids() {
        let catalog = three_products();
        let shirt = catalog.get(ProductId(1)).unwrap();

        let ids: Vec<ProductId> = catalog.alternatives_of(shirt).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId(2), ProductId(3)]);
    }

    #[test]
    fn test_best_alternative_prefers_first_on_tie() {
        let catalog = three_products();
        let shirt = catalog.get(ProductId(1)).unwrap();

        assert_eq!(catalog.best_alternative(shirt).map(|p| p.id), Some(ProductId(2)));
    }

    #[test]
    fn test_best_alternative_picks_minimum() {
        let catalog = Catalog::new(vec![
            product(1, "Base", "X", 30.0, &[2, 3, 4]),
            product(2, "Alt A", "X", 12.0, &[]),
            product(3, "Alt B", "X", 4.0, &[]),
            product(4, "Alt C", "X", 9.0, &[]),
        ])
        .unwrap();
        let base = catalog.get(ProductId(1)).unwrap();

        assert_eq!(catalog.best_alternative(base).map(|p| p.id), Some(ProductId(3)));
    }

    #[test]
    fn test_best_alternative_none_when_unresolved() {
        let catalog = Catalog::new(vec![product(1, "Lonely", "X", 3.0, &[8, 9])]).unwrap();
        let lonely = catalog.get(ProductId(1)).unwrap();

        assert!(catalog.alternatives_of(lonely).is_empty());
        assert!(catalog.best_alternative(lonely).is_none());
    }

    #[test]
    fn test_compare() {
        let catalog = three_products();
        let shirt = catalog.get(ProductId(1)).unwrap();

        let comparison = catalog.compare(shirt);
        assert_eq!(comparison.alternatives.len(), 2);
        assert_eq!(comparison.best.map(|p| p.id), Some(ProductId(2)));
        assert_eq!(comparison.savings_kg, Some(15.0));
        assert_eq!(comparison.savings_percent, Some(75.0));

        let tee = catalog.get(ProductId(2)).unwrap();
        let comparison = catalog.compare(tee);
        assert!(comparison.best.is_none());
        assert!(comparison.savings_kg.is_none());
    }

    #[test]
    fn test_potential_savings_and_counts() {
        let catalog = Catalog::new(vec![
            product(1, "A", "X", 20.0, &[2]),
            product(2, "B", "X", 5.0, &[]),
            product(3, "C", "X", 10.0, &[4, 2]),
            product(4, "D", "X", 8.0, &[]),
            product(5, "E", "X", 10.0, &[404]),
        ])
        .unwrap();

        // (20 - 5) + (10 - 5); product 5 has nothing resolvable
        assert_eq!(catalog.potential_savings(), 20.0);
        assert_eq!(catalog.alternatives_count(), 3);
    }

    #[test]
    fn test_from_json_rejects_duplicates_and_garbage() {
        let duplicate = r#"[
            {"id": 1, "name": "A", "category": "X", "price": 1.0, "carbonFootprint": 1.0, "description": ""},
            {"id": 1, "name": "B", "category": "X", "price": 1.0, "carbonFootprint": 1.0, "description": ""}
        ]"#;
        assert!(matches!(
            Catalog::from_json(duplicate),
            Err(CoreError::DuplicateProductId(ProductId(1)))
        ));

        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(CoreError::MalformedCatalog(_))
        ));

        let empty = Catalog::from_json("[]").unwrap();
        assert!(empty.is_empty());
        assert!(empty.filter("anything", &[], None).is_empty());
    }

    #[test]
    fn test_classify_footprint_matches_tier() {
        assert_eq!(classify_footprint(5.0), FootprintTier::Low);
        assert_eq!(classify_footprint(15.01), FootprintTier::High);
    }
}
