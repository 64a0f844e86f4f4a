//! # Payload Validation
//!
//! Field validation for create, replace, and merge-update payloads. Pure
//! functions producing an aggregated field→messages map: every applicable
//! field is checked and every violation collected before returning, so
//! clients always see the complete set of problems in one response.
//!
//! Merge updates validate only the fields they supply; omitted fields keep
//! their prior values and are not re-validated.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::{CollectionPatch, NewCollection, NewProduct, ProductDraft, ProductPatch};

/// Aggregated validation errors, keyed by wire field name. Serialized verbatim
/// as the 400 response body. BTreeMap keeps field ordering deterministic.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

const REQUIRED: &str = "This field is required.";
const BLANK: &str = "This field may not be blank.";
const PRICE_NOT_POSITIVE: &str = "Unit price must be greater than zero.";
const INVENTORY_NEGATIVE: &str = "Inventory may not be negative.";

fn push(errors: &mut FieldErrors, field: &str, message: impl Into<String>) {
    errors.entry(field.to_string()).or_default().push(message.into());
}

fn check_title(errors: &mut FieldErrors, title: Option<&str>, required: bool) {
    match title {
        None if required => push(errors, "title", REQUIRED),
        None => {}
        Some(value) if value.trim().is_empty() => push(errors, "title", BLANK),
        Some(_) => {}
    }
}

fn check_unit_price(errors: &mut FieldErrors, unit_price: Option<Decimal>, required: bool) {
    match unit_price {
        None if required => push(errors, "unit_price", REQUIRED),
        None => {}
        Some(value) if value <= Decimal::ZERO => push(errors, "unit_price", PRICE_NOT_POSITIVE),
        Some(_) => {}
    }
}

fn check_inventory(errors: &mut FieldErrors, inventory: Option<i64>, required: bool) {
    match inventory {
        None if required => push(errors, "inventory", REQUIRED),
        None => {}
        Some(value) if value < 0 => push(errors, "inventory", INVENTORY_NEGATIVE),
        Some(_) => {}
    }
}

fn check_collection(
    errors: &mut FieldErrors,
    collection: Option<i64>,
    required: bool,
    exists: impl Fn(i64) -> bool,
) {
    match collection {
        None if required => push(errors, "collection", REQUIRED),
        None => {}
        Some(id) if !exists(id) => {
            push(errors, "collection", format!("Collection {id} does not exist."));
        }
        Some(_) => {}
    }
}

/// Build a `collection` field error for a referential failure detected by the
/// store (the lock-held re-check).
pub fn unknown_collection(id: i64) -> FieldErrors {
    let mut errors = FieldErrors::new();
    push(&mut errors, "collection", format!("Collection {id} does not exist."));
    errors
}

/// Validate a collection create/replace payload, yielding the title to persist.
pub fn validate_new_collection(payload: &NewCollection) -> Result<String, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_title(&mut errors, payload.title.as_deref(), true);
    if errors.is_empty() {
        Ok(payload.title.clone().unwrap_or_default())
    } else {
        Err(errors)
    }
}

/// Validate a collection merge-update payload. Only supplied fields are checked.
pub fn validate_collection_patch(patch: &CollectionPatch) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_title(&mut errors, patch.title.as_deref(), false);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate a product create/replace payload against the full rule set,
/// yielding a draft ready to persist. `collection_exists` is the referential
/// query against the persistence collaborator.
pub fn validate_new_product(
    payload: &NewProduct,
    collection_exists: impl Fn(i64) -> bool,
) -> Result<ProductDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    check_title(&mut errors, payload.title.as_deref(), true);
    check_unit_price(&mut errors, payload.unit_price, true);
    check_inventory(&mut errors, payload.inventory, true);
    check_collection(&mut errors, payload.collection, true, collection_exists);

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(ProductDraft {
        title: payload.title.clone().unwrap_or_default(),
        description: payload.description.clone().unwrap_or_default(),
        slug: payload.slug.clone().unwrap_or_default(),
        inventory: payload.inventory.unwrap_or_default(),
        unit_price: payload.unit_price.unwrap_or_default(),
        collection: payload.collection.unwrap_or_default(),
    })
}

/// Validate a product merge-update payload. Only supplied fields are checked.
pub fn validate_product_patch(
    patch: &ProductPatch,
    collection_exists: impl Fn(i64) -> bool,
) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    check_title(&mut errors, patch.title.as_deref(), false);
    check_unit_price(&mut errors, patch.unit_price, false);
    check_inventory(&mut errors, patch.inventory, false);
    check_collection(&mut errors, patch.collection, false, collection_exists);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
