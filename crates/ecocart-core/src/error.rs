//! # Error Types
//!
//! Domain-specific error types for ecocart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ecocart-core errors (this file)                                       │
//! │  ├── CoreError        - Catalog integrity failures                     │
//! │  └── ValidationError  - Field-level validation failures                │
//! │                                                                         │
//! │  ecocart-db errors (separate crate)                                    │
//! │  └── DbError          - Storage and catalog file failures              │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the shopper sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Shopper      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cart engine itself never returns an error: every cart operation is
//! total. Errors only arise while building a [`Catalog`](crate::Catalog)
//! from untrusted input.

use thiserror::Error;

use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Two catalog records share an id.
    ///
    /// ## When This Occurs
    /// - A hand-edited products file repeats an id
    /// - Two catalog exports were concatenated
    #[error("Duplicate product id in catalog: {0}")]
    DuplicateProductId(ProductId),

    /// A catalog record failed field validation.
    #[error("Invalid product {id}: {source}")]
    InvalidProduct {
        id: ProductId,
        #[source]
        source: ValidationError,
    },

    /// Catalog text is not a JSON array of products.
    #[error("Malformed catalog: {0}")]
    MalformedCatalog(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is below zero.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g. unknown footprint tier label).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::DuplicateProductId(ProductId(7));
        assert_eq!(err.to_string(), "Duplicate product id in catalog: 7");

        let err = CoreError::InvalidProduct {
            id: ProductId(3),
            source: ValidationError::MustBeNonNegative {
                field: "price".to_string(),
            },
        };
        assert_eq!(err.to_string(), "Invalid product 3: price must not be negative");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::NotFinite {
            field: "carbonFootprint".to_string(),
        };
        assert_eq!(err.to_string(), "carbonFootprint must be a finite number");
    }
}
