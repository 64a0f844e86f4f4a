//! # Configuration Management
//!
//! Layered configuration for the catalog service: compiled-in defaults with
//! `STOREFRONT_`-prefixed environment overrides (e.g.
//! `STOREFRONT_WEB__BIND_ADDRESS=0.0.0.0:8080`).

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorefrontConfig {
    pub web: WebConfig,
    pub auth: AuthConfig,
}

/// Web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    pub bind_address: String,
    pub request_timeout_seconds: u64,
}

/// Authentication configuration.
///
/// When `enabled` is false every request is treated as a trusted administrator;
/// intended for local development and some test setups only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub enabled: bool,
    #[serde(default)]
    pub api_keys: Vec<ApiKeyConfig>,
}

/// A single configured API key with its role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiKeyConfig {
    /// The bearer token value presented by clients.
    pub key: String,
    /// Human-readable description of the key holder (becomes the actor subject).
    pub description: String,
    /// Whether this key grants catalog administration rights.
    #[serde(default)]
    pub admin: bool,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            web: WebConfig {
                bind_address: "127.0.0.1:8080".to_string(),
                request_timeout_seconds: 30,
            },
            auth: AuthConfig {
                enabled: true,
                api_keys: Vec::new(),
            },
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from defaults plus environment overrides.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Config::try_from(&Self::default())?)
            .add_source(
                config::Environment::with_prefix("STOREFRONT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
