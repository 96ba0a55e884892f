//! # Validation Module
//!
//! Integrity checks applied when a catalog is loaded.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Checks Happen                                │
//! │                                                                         │
//! │  Catalog load (Catalog::new)                                           │
//! │  ├── THIS MODULE: names, prices, footprints, unique ids                │
//! │  └── Rejects the whole catalog on the first bad record                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Caller surface (CLI commands)                                         │
//! │  └── Alternative must be listed by the base product                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Cart engine                                                           │
//! │  └── No checks: every operation is total                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ecocart_core::validation::{validate_footprint, validate_product_name};
//!
//! assert!(validate_product_name("Bamboo Toothbrush").is_ok());
//! assert!(validate_footprint(-1.0).is_err());
//! ```

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a product name: must not be blank.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates a price: zero (free items) is allowed, negatives are not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a footprint figure: finite and non-negative.
pub fn validate_footprint(kg_co2e: f64) -> ValidationResult<()> {
    if !kg_co2e.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "carbonFootprint".to_string(),
        });
    }

    if kg_co2e < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "carbonFootprint".to_string(),
        });
    }

    Ok(())
}

/// Validates every field of one product record.
pub fn validate_product(product: &Product) -> CoreResult<()> {
    let checks = validate_product_name(&product.name)
        .and_then(|_| validate_price(product.price))
        .and_then(|_| validate_footprint(product.carbon_footprint));

    checks.map_err(|source| CoreError::InvalidProduct {
        id: product.id,
        source,
    })
}

/// Validates a whole catalog: each record, then id uniqueness.
pub fn validate_catalog(products: &[Product]) -> CoreResult<()> {
    let mut seen = HashSet::with_capacity(products.len());

    for product in products {
        validate_product(product)?;

        if !seen.insert(product.id) {
            return Err(CoreError::DuplicateProductId(product.id));
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ProductId;

    fn product(id: u32) -> Product {
        Product {
            id: ProductId(id),
            name: format!("Product {}", id),
            category: "Home".to_string(),
            image: None,
            price: Money::from_cents(100),
            carbon_footprint: 1.0,
            description: String::new(),
            alternatives: vec![],
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Reusable Bottle").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(2999)).is_ok());
        assert!(validate_price(Money::from_cents(-1)).is_err());
    }

    #[test]
    fn test_validate_footprint() {
        assert!(validate_footprint(0.0).is_ok());
        assert!(validate_footprint(42.5).is_ok());
        assert!(validate_footprint(-0.1).is_err());
        assert!(validate_footprint(f64::NAN).is_err());
        assert!(validate_footprint(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_catalog_rejects_duplicates() {
        let products = vec![product(1), product(2), product(1)];
        let err = validate_catalog(&products).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateProductId(ProductId(1))));
    }

    #[test]
    fn test_validate_catalog_reports_bad_record() {
        let mut bad = product(5);
        bad.carbon_footprint = -3.0;

        let err = validate_catalog(&[product(1), bad]).unwrap_err();
        assert!(matches!(err, CoreError::InvalidProduct { id: ProductId(5), .. }));
    }

    #[test]
    fn test_validate_empty_catalog() {
        assert!(validate_catalog(&[]).is_ok());
    }
}
