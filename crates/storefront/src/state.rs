//! Application state shared across handlers.

use std::sync::Arc;

use festify_core::StaticCatalog;

use crate::catalog::{CatalogLoadError, load_catalog};
use crate::config::StorefrontConfig;
use crate::middleware::CartSessionStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Config and catalog are
/// read-only after startup; per-visitor state lives in the session store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: StaticCatalog,
    session_store: CartSessionStore,
}

impl AppState {
    /// Create application state with an already-loaded catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig, catalog: StaticCatalog) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                session_store: CartSessionStore::default(),
            }),
        }
    }

    /// Create application state, loading the catalog named by the config.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog cannot be loaded.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, CatalogLoadError> {
        let catalog = load_catalog(config.catalog_path.as_deref())?;
        Ok(Self::new(config, catalog))
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &StaticCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the session store holding every visitor's cart.
    #[must_use]
    pub fn session_store(&self) -> &CartSessionStore {
        &self.inner.session_store
    }
}
