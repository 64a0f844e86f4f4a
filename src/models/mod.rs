//! # Catalog Data Models
//!
//! Entities for the two catalog resources plus the wire payload types used by
//! the HTTP layer. Creation payloads keep every field optional so the
//! validation gate can report missing fields alongside invalid ones instead of
//! failing at deserialization.

pub mod collection;
pub mod product;

pub use collection::{Collection, CollectionPatch, CollectionResponse, NewCollection};
pub use product::{NewProduct, Product, ProductDraft, ProductPatch};
