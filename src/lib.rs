#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Storefront Core
//!
//! Catalog service for the storefront e-commerce API: role-gated CRUD over
//! collections and products.
//!
//! ## Architecture
//!
//! Every request flows through a fixed decision chain — authentication, then
//! authorization, then field validation — before any stored state changes.
//! The chain lives in the [`gate`] module as pure functions plus a declarative
//! route wrapper; the HTTP layer only translates gate outcomes to status codes
//! and bodies.
//!
//! ## Module Organization
//!
//! - [`gate`] - access decisions and aggregated payload validation
//! - [`models`] - collection and product entities plus wire payloads
//! - [`catalog`] - in-memory persistence collaborator with referential checks
//! - [`web`] - axum router, handlers, middleware, and API error mapping
//! - [`config`] - layered configuration with environment overrides
//! - [`logging`] - structured tracing setup
//! - [`error`] - crate-level startup errors

pub mod catalog;
pub mod config;
pub mod error;
pub mod gate;
pub mod logging;
pub mod models;
pub mod web;

pub use config::StorefrontConfig;
pub use error::{Result, StorefrontError};
pub use web::state::AppState;
