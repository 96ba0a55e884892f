//! # Catalog State
//!
//! The loaded catalog, shared read-only with every command.

use std::path::Path;
use std::sync::Arc;

use ecocart_core::Catalog;
use ecocart_db::{load_catalog, DbResult};

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Arc<Catalog>,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState {
            catalog: Arc::new(catalog),
        }
    }

    /// Reads and validates the catalog file.
    pub async fn load(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(CatalogState::new(load_catalog(path).await?))
    }

    /// Returns a reference to the inner Catalog.
    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }
}
