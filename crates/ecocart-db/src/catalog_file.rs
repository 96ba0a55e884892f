//! # Catalog File Loading
//!
//! The catalog ships as a JSON array of product records on disk. This
//! module reads it and hands it to [`Catalog::from_json`] for validation.

use std::path::Path;

use ecocart_core::Catalog;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

/// Reads and validates a catalog file.
///
/// ## Errors
/// * [`DbError::CatalogIo`] - The file is missing or unreadable
/// * [`DbError::InvalidCatalog`] - Bad JSON, invalid record or duplicate id
pub async fn load_catalog(path: impl AsRef<Path>) -> DbResult<Catalog> {
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading catalog file");

    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DbError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;

    let catalog = Catalog::from_json(&json)?;

    info!(
        path = %path.display(),
        products = catalog.len(),
        categories = catalog.categories().len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecocart_core::{CoreError, ProductId};
    use std::io::Write;

    fn write_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_valid_catalog() {
        let file = write_file(
            r#"[
              {"id": 1, "name": "Plastic Bottle", "category": "Kitchen", "price": 1.99,
               "carbonFootprint": 0.8, "description": "Single use", "alternatives": [2]},
              {"id": 2, "name": "Steel Bottle", "category": "Kitchen", "price": 24.5,
               "carbonFootprint": 0.3, "description": "Reusable"}
            ]"#,
        );

        let catalog = load_catalog(file.path()).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(ProductId(1)).unwrap().price.cents(), 199);
        assert_eq!(catalog.get(ProductId(2)).unwrap().price.cents(), 2450);
    }

    #[tokio::test]
    async fn test_shipped_catalog_is_valid() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/products.json");
        let catalog = load_catalog(path).await.unwrap();

        assert!(catalog.len() >= 10);
        assert!(catalog.alternatives_count() > 0);
        assert!(catalog.potential_savings() > 0.0);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");

        let err = load_catalog(&path).await.unwrap_err();
        assert!(matches!(err, DbError::CatalogIo { path: p, .. } if p == path));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let file = write_file("[{\"id\": 1,");
        let err = load_catalog(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidCatalog(CoreError::MalformedCatalog(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_ids_rejected() {
        let file = write_file(
            r#"[
              {"id": 7, "name": "A", "category": "X", "price": 1, "carbonFootprint": 1, "description": ""},
              {"id": 7, "name": "B", "category": "X", "price": 2, "carbonFootprint": 2, "description": ""}
            ]"#,
        );
        let err = load_catalog(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidCatalog(CoreError::DuplicateProductId(ProductId(7)))
        ));
    }

    #[tokio::test]
    async fn test_sub_cent_price_rejected() {
        let file = write_file(
            r#"[{"id": 1, "name": "Seed Packet", "category": "Garden", "price": 0.125,
                 "carbonFootprint": 0.1, "description": ""}]"#,
        );

        let err = load_catalog(file.path()).await.unwrap_err();
        match err {
            DbError::InvalidCatalog(CoreError::MalformedCatalog(msg)) => {
                assert!(msg.contains("finer than one cent"), "{}", msg);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_price_rejected() {
        let file = write_file(
            r#"[{"id": 1, "name": "Yacht", "category": "Leisure", "price": 1e300,
                 "carbonFootprint": 1, "description": ""}]"#,
        );

        let err = load_catalog(file.path()).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InvalidCatalog(CoreError::MalformedCatalog(_))
        ));
    }
}
