//! Product entity and its wire payloads.
//!
//! The foreign key to the owning collection is named `collection` on the wire,
//! matching the public API contract (and the field key used in validation
//! error bodies).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product as stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub inventory: i64,
    pub unit_price: Decimal,
    pub collection: i64,
}

/// Creation / full-replace payload for a product.
///
/// Required fields are optional at the serde level so the validation gate can
/// aggregate "field is required" errors with the rest of the violations.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    pub inventory: Option<i64>,
    pub unit_price: Option<Decimal>,
    pub collection: Option<i64>,
}

/// A fully validated product payload, produced by the validation gate.
/// Carries everything needed to persist a product except its id.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub inventory: i64,
    pub unit_price: Decimal,
    pub collection: i64,
}

impl ProductDraft {
    /// Materialize a product with a server-assigned id.
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            title: self.title,
            description: self.description,
            slug: self.slug,
            inventory: self.inventory,
            unit_price: self.unit_price,
            collection: self.collection,
        }
    }
}

/// Partial-update payload for a product. Only supplied fields are validated
/// and applied; omitted fields keep prior values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub inventory: Option<i64>,
    pub unit_price: Option<Decimal>,
    pub collection: Option<i64>,
}
