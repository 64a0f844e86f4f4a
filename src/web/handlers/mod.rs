//! # Web API Handlers
//!
//! HTTP request handlers for the catalog API.

pub mod collections;
pub mod health;
pub mod products;
