//! # Configuration State
//!
//! Where things live on disk, resolved once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`, `--catalog`, `--storage-key`)
//! 2. Environment variables (`ECOCART_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup, so no lock is needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use ecocart_core::CART_STORAGE_KEY;
use serde::Serialize;

/// Environment variable overriding the database file path.
pub const DB_PATH_VAR: &str = "ECOCART_DB_PATH";

/// Environment variable overriding the catalog file path.
pub const CATALOG_PATH_VAR: &str = "ECOCART_CATALOG_PATH";

/// Environment variable overriding the cart's storage key.
pub const STORAGE_KEY_VAR: &str = "ECOCART_STORAGE_KEY";

/// Catalog location when nothing else is configured.
pub const DEFAULT_CATALOG_PATH: &str = "data/products.json";

const DB_FILE_NAME: &str = "ecocart.db";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// SQLite file holding the saved cart.
    pub db_path: PathBuf,

    /// JSON array of product records.
    pub catalog_path: PathBuf,

    /// Key the cart is saved under.
    pub storage_key: String,
}

impl ConfigState {
    /// Reads `ECOCART_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        ConfigState::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        ConfigState {
            db_path: non_empty(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(default_database_path),
            catalog_path: non_empty(CATALOG_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_PATH)),
            storage_key: non_empty(STORAGE_KEY_VAR)
                .unwrap_or_else(|| CART_STORAGE_KEY.to_string()),
        }
    }

    /// Applies command-line flags on top.
    pub fn with_overrides(
        mut self,
        db_path: Option<PathBuf>,
        catalog_path: Option<PathBuf>,
        storage_key: Option<String>,
    ) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        if let Some(path) = catalog_path {
            self.catalog_path = path;
        }
        if let Some(key) = storage_key {
            self.storage_key = key;
        }
        self
    }
}

/// Determines the database file path based on the platform.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/org.ecocart.ecocart/ecocart.db`
/// - **Windows**: `%APPDATA%\ecocart\ecocart\data\ecocart.db`
/// - **Linux**: `~/.local/share/ecocart/ecocart.db`
///
/// Falls back to the working directory when no home directory is known.
pub fn default_database_path() -> PathBuf {
    ProjectDirs::from("org", "ecocart", "ecocart")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::from_lookup(lookup(&[]));
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
        assert_eq!(config.storage_key, "ecocart-storage");
        assert!(config.db_path.ends_with(DB_FILE_NAME));
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = ConfigState::from_lookup(lookup(&[
            (DB_PATH_VAR, "/tmp/cart.db"),
            (CATALOG_PATH_VAR, "/srv/products.json"),
            (STORAGE_KEY_VAR, "kiosk-cart"),
        ]));
        assert_eq!(config.db_path, PathBuf::from("/tmp/cart.db"));
        assert_eq!(config.catalog_path, PathBuf::from("/srv/products.json"));
        assert_eq!(config.storage_key, "kiosk-cart");
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let config = ConfigState::from_lookup(lookup(&[(STORAGE_KEY_VAR, "  ")]));
        assert_eq!(config.storage_key, CART_STORAGE_KEY);
    }

    #[test]
    fn test_flags_override_env() {
        let config = ConfigState::from_lookup(lookup(&[(DB_PATH_VAR, "/tmp/env.db")]))
            .with_overrides(Some(PathBuf::from("/tmp/flag.db")), None, None);
        assert_eq!(config.db_path, PathBuf::from("/tmp/flag.db"));
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
    }
}
