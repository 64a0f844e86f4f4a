//! # Collection Handlers
//!
//! HTTP handlers for the collection resource. Access checks run at the route
//! level (see the router wiring); these handlers perform field validation and
//! catalog operations.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::catalog::CatalogError;
use crate::gate::validation;
use crate::models::{CollectionPatch, CollectionResponse, NewCollection};
use crate::web::errors::{ApiError, ApiResult};
use crate::web::state::AppState;

/// List collections: GET /store/collections/
pub async fn list_collections(State(state): State<AppState>) -> Json<Vec<CollectionResponse>> {
    let collections = state
        .catalog
        .collections_with_counts()
        .into_iter()
        .map(|(collection, count)| CollectionResponse::new(collection, count))
        .collect();
    Json(collections)
}

/// Create a collection: POST /store/collections/
pub async fn create_collection(
    State(state): State<AppState>,
    Json(payload): Json<NewCollection>,
) -> ApiResult<(StatusCode, Json<CollectionResponse>)> {
    let title = validation::validate_new_collection(&payload).map_err(ApiError::validation_failed)?;

    let collection = state.catalog.create_collection(title);
    info!(collection_id = collection.id, "Created collection");

    Ok((
        StatusCode::CREATED,
        Json(CollectionResponse::new(collection, 0)),
    ))
}

/// Retrieve a collection: GET /store/collections/{id}/
pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CollectionResponse>> {
    let (collection, count) = state
        .catalog
        .collection_with_count(id)
        .ok_or_else(|| ApiError::not_found(format!("Collection {id} does not exist")))?;

    Ok(Json(CollectionResponse::new(collection, count)))
}

/// Replace a collection: PUT /store/collections/{id}/
pub async fn replace_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewCollection>,
) -> ApiResult<Json<CollectionResponse>> {
    // Target resolution precedes field validation for detail routes.
    if !state.catalog.collection_exists(id) {
        return Err(ApiError::not_found(format!("Collection {id} does not exist")));
    }

    let title = validation::validate_new_collection(&payload).map_err(ApiError::validation_failed)?;

    let (collection, count) = state.catalog.replace_collection(id, title)?;
    info!(collection_id = id, "Replaced collection");

    Ok(Json(CollectionResponse::new(collection, count)))
}

/// Merge-update a collection: PATCH /store/collections/{id}/
pub async fn merge_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<CollectionPatch>,
) -> ApiResult<Json<CollectionResponse>> {
    if !state.catalog.collection_exists(id) {
        return Err(ApiError::not_found(format!("Collection {id} does not exist")));
    }

    validation::validate_collection_patch(&patch).map_err(ApiError::validation_failed)?;

    // The store merges under a single lock; omitted fields keep prior values.
    let (collection, count) = state.catalog.merge_collection(id, patch.title)?;
    info!(collection_id = id, "Merged collection update");

    Ok(Json(CollectionResponse::new(collection, count)))
}

/// Delete a collection: DELETE /store/collections/{id}/
///
/// Restricted: deleting a collection that still contains products yields a
/// 409 conflict rather than cascading.
pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    match state.catalog.delete_collection(id) {
        Ok(()) => {
            info!(collection_id = id, "Deleted collection");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err @ CatalogError::CollectionInUse { .. }) => Err(ApiError::conflict(err.to_string())),
        Err(err) => Err(err.into()),
    }
}
