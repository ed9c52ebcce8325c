//! Product catalog loading.
//!
//! The catalog is read once at startup, either from `FESTIFY_CATALOG_PATH` or
//! from the JSON file bundled into the binary.

use std::path::{Path, PathBuf};

use festify_core::{CatalogError, StaticCatalog};
use thiserror::Error;

/// Catalog bundled with the storefront.
const BUNDLED_CATALOG: &str = include_str!("../content/catalog.json");

/// Errors loading the catalog at startup.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Invalid(#[from] CatalogError),
}

/// Load the catalog from `path`, or the bundled one when `path` is `None`.
///
/// # Errors
///
/// Returns `CatalogLoadError` if the file cannot be read or is not a valid
/// catalog.
pub fn load_catalog(path: Option<&Path>) -> Result<StaticCatalog, CatalogLoadError> {
    let catalog = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            StaticCatalog::from_json(&json)?
        }
        None => bundled_catalog()?,
    };

    tracing::info!(products = catalog.len(), "Catalog loaded");
    Ok(catalog)
}

/// Parse the bundled catalog.
///
/// # Errors
///
/// Returns `CatalogError` if the bundled file is malformed.
pub fn bundled_catalog() -> Result<StaticCatalog, CatalogError> {
    StaticCatalog::from_json(BUNDLED_CATALOG)
}
