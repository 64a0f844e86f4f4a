//! # Web API Application State
//!
//! Shared state for the web API: configuration, the catalog store, and the
//! API key registry.

use std::sync::Arc;

use crate::catalog::CatalogStore;
use crate::config::StorefrontConfig;
use crate::web::auth::ApiKeyRegistry;

/// Shared application state, cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<StorefrontConfig>,
    /// The catalog persistence collaborator
    pub catalog: Arc<CatalogStore>,
    /// Registry of configured API keys
    pub api_keys: Arc<ApiKeyRegistry>,
}

impl AppState {
    /// Build application state from configuration with a fresh catalog.
    pub fn new(config: StorefrontConfig) -> Self {
        let api_keys = ApiKeyRegistry::from_config(&config.auth.api_keys);
        Self {
            config: Arc::new(config),
            catalog: Arc::new(CatalogStore::new()),
            api_keys: Arc::new(api_keys),
        }
    }
}
