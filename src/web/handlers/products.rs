//! # Product Handlers
//!
//! HTTP handlers for the product resource. Access checks run at the route
//! level; these handlers perform field validation and catalog operations.
//!
//! Referential failures on the `collection` foreign key are reported as field
//! errors, matching the validation contract, even when the store's lock-held
//! re-check is the one that catches them.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::catalog::CatalogError;
use crate::gate::validation;
use crate::models::{NewProduct, Product, ProductPatch};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

fn map_product_error(err: CatalogError) -> ApiError {
    match err {
        CatalogError::CollectionNotFound(id) => {
            ApiError::validation_failed(validation::unknown_collection(id))
        }
        other => other.into(),
    }
}

/// List products: GET /store/products/
pub async fn list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog.products())
}

/// Create a product: POST /store/products/
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let draft = validation::validate_new_product(&payload, |id| state.catalog.collection_exists(id))
        .map_err(ApiError::validation_failed)?;

    let product = state.catalog.create_product(draft).map_err(map_product_error)?;
    info!(product_id = product.id, "Created product");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Retrieve a product: GET /store/products/{id}/
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    let product = state
        .catalog
        .product(id)
        .ok_or_else(|| ApiError::not_found(format!("Product {id} does not exist")))?;

    Ok(Json(product))
}

/// Replace a product: PUT /store/products/{id}/
pub async fn replace_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<Json<Product>> {
    // Target resolution precedes field validation for detail routes.
    if !state.catalog.product_exists(id) {
        return Err(ApiError::not_found(format!("Product {id} does not exist")));
    }

    let draft = validation::validate_new_product(&payload, |id| state.catalog.collection_exists(id))
        .map_err(ApiError::validation_failed)?;

    let product = state
        .catalog
        .replace_product(id, draft)
        .map_err(map_product_error)?;
    info!(product_id = id, "Replaced product");

    Ok(Json(product))
}

/// Merge-update a product: PATCH /store/products/{id}/
pub async fn merge_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> ApiResult<Json<Product>> {
    if !state.catalog.product_exists(id) {
        return Err(ApiError::not_found(format!("Product {id} does not exist")));
    }

    validation::validate_product_patch(&patch, |id| state.catalog.collection_exists(id))
        .map_err(ApiError::validation_failed)?;

    let product = state
        .catalog
        .merge_product(id, patch)
        .map_err(map_product_error)?;
    info!(product_id = id, "Merged product update");

    Ok(Json(product))
}

/// Delete a product: DELETE /store/products/{id}/
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.catalog.delete_product(id)?;
    info!(product_id = id, "Deleted product");
    Ok(StatusCode::NO_CONTENT)
}
