//! Collection entity and its wire payloads.

use serde::{Deserialize, Serialize};

/// A product collection as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: i64,
    pub title: String,
}

/// Creation / full-replace payload for a collection.
///
/// `title` is optional at the serde level so a missing field surfaces as a
/// field-level validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCollection {
    pub title: Option<String>,
}

/// Partial-update payload for a collection. Omitted fields keep prior values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionPatch {
    pub title: Option<String>,
}

/// Collection representation returned to clients, including the derived
/// `products_count` (computed at read time, never stored).
#[derive(Debug, Clone, Serialize)]
pub struct CollectionResponse {
    pub id: i64,
    pub title: String,
    pub products_count: i64,
}

impl CollectionResponse {
    pub fn new(collection: Collection, products_count: i64) -> Self {
        Self {
            id: collection.id,
            title: collection.title,
            products_count,
        }
    }
}
