//! # Catalog Commands
//!
//! Browsing, searching and comparing products.
//!
//! ## Search Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Search Flow                                  │
//! │                                                                         │
//! │  --query "Shirt"  --category Clothing  --tier low                      │
//! │       │                 │                   │                           │
//! │       ▼                 ▼                   ▼                           │
//! │  lowercase,        exact match,        classify(footprint)             │
//! │  substring of      any of the          == Low                          │
//! │  name/desc/cat     given categories                                    │
//! │       │                 │                   │                           │
//! │       └──────── AND ────┴────── AND ────────┘                           │
//! │                         │                                               │
//! │                         ▼                                               │
//! │              Vec<ProductDto>, catalog order                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use ecocart_core::{impact, Comparison, FootprintTier, Product, ProductId};
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::CatalogState;

/// Product as listed to the shopper.
///
/// Adds the footprint badge to the catalog record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    pub tier: FootprintTier,
    /// Stars out of five.
    pub eco_rating: u8,
}

impl<'a> From<&'a Product> for ProductDto<'a> {
    fn from(product: &'a Product) -> Self {
        let tier = product.footprint_tier();
        ProductDto {
            product,
            tier,
            eco_rating: tier.eco_rating(),
        }
    }
}

/// One product with its resolved alternatives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail<'a> {
    #[serde(flatten)]
    pub product: ProductDto<'a>,
    pub alternatives: Vec<ProductDto<'a>>,
}

/// A comparison plus its everyday equivalents.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse<'a> {
    #[serde(flatten)]
    pub comparison: Comparison<'a>,
    /// Car miles matching the footprint avoided by switching.
    pub driving_miles_saved: Option<f64>,
}

/// Catalog-wide impact figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogOverview {
    pub product_count: usize,
    pub category_count: usize,
    /// Products listing at least one greener alternative.
    pub alternatives_count: usize,
    /// kg CO₂e avoided if every product were swapped for its best alternative.
    pub potential_savings: f64,
    pub potential_driving_miles: f64,
    pub potential_trees: u32,
}

/// Lists the distinct categories in first-seen order.
pub fn list_categories(catalog: &CatalogState) -> Vec<&str> {
    debug!("list_categories command");
    catalog.inner().categories()
}

/// Filters the catalog.
///
/// ## Arguments
/// * `query` - Case-insensitive text; empty matches everything
/// * `categories` - Exact category names; empty matches everything
/// * `tier` - Footprint tier, or `None` for all
pub fn search_products<'a>(
    catalog: &'a CatalogState,
    query: &str,
    categories: &[String],
    tier: Option<FootprintTier>,
) -> Vec<ProductDto<'a>> {
    debug!(query = %query, categories = ?categories, tier = ?tier, "search_products command");

    let results: Vec<ProductDto<'a>> = catalog
        .inner()
        .filter(query, categories, tier)
        .into_iter()
        .map(ProductDto::from)
        .collect();

    debug!(count = results.len(), "search complete");
    results
}

/// Looks up one product and resolves its alternatives.
pub fn get_product(catalog: &CatalogState, id: ProductId) -> Result<ProductDetail<'_>, ApiError> {
    debug!(id = %id, "get_product command");

    let catalog = catalog.inner();
    let product = catalog
        .get(id)
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    Ok(ProductDetail {
        product: ProductDto::from(product),
        alternatives: catalog
            .alternatives_of(product)
            .into_iter()
            .map(ProductDto::from)
            .collect(),
    })
}

/// Sets a product against its alternatives and picks the greenest.
pub fn compare_product(
    catalog: &CatalogState,
    id: ProductId,
) -> Result<ComparisonResponse<'_>, ApiError> {
    debug!(id = %id, "compare_product command");

    let catalog = catalog.inner();
    let product = catalog
        .get(id)
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    let comparison = catalog.compare(product);
    let driving_miles_saved = comparison.savings_kg.map(impact::driving_miles);

    Ok(ComparisonResponse {
        comparison,
        driving_miles_saved,
    })
}

/// Summarizes what the catalog could save.
pub fn catalog_overview(catalog: &CatalogState) -> CatalogOverview {
    debug!("catalog_overview command");

    let catalog = catalog.inner();
    let potential_savings = catalog.potential_savings();

    CatalogOverview {
        product_count: catalog.len(),
        category_count: catalog.categories().len(),
        alternatives_count: catalog.alternatives_count(),
        potential_savings,
        potential_driving_miles: impact::driving_miles(potential_savings),
        potential_trees: impact::trees_equivalent(potential_savings),
    }
}
