//! # API Key Authentication
//!
//! Runtime API key validation with per-key roles. Keys come from
//! configuration; each maps a bearer token to an [`Actor`] carrying the
//! key's description and admin flag.

use std::collections::HashMap;

use thiserror::Error;

use crate::config::ApiKeyConfig;
use crate::gate::Actor;

/// Errors from credential validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid API key")]
    InvalidKey,
}

/// Registry of valid API keys with their associated roles.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyRegistry {
    keys: HashMap<String, ApiKeyEntry>,
}

#[derive(Debug, Clone)]
struct ApiKeyEntry {
    description: String,
    admin: bool,
}

impl ApiKeyRegistry {
    /// Build the registry from configuration.
    pub fn from_config(configs: &[ApiKeyConfig]) -> Self {
        let keys = configs
            .iter()
            .map(|c| {
                let entry = ApiKeyEntry {
                    description: c.description.clone(),
                    admin: c.admin,
                };
                (c.key.clone(), entry)
            })
            .collect();
        Self { keys }
    }

    /// Validate an API key and return the [`Actor`] it authenticates.
    pub fn validate_key(&self, key: &str) -> Result<Actor, AuthError> {
        match self.keys.get(key) {
            Some(entry) => Ok(Actor {
                subject: entry.description.clone(),
                authenticated: true,
                admin: entry.admin,
            }),
            None => Err(AuthError::InvalidKey),
        }
    }

    /// Check if the registry has any keys configured.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
