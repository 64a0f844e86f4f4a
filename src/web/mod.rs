//! # Web API
//!
//! Axum surface for the catalog service: router, shared state, middleware,
//! and error types. Every mutating route is wrapped with the access gate so
//! authentication and authorization are checked before body deserialization.

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod state;

use std::time::Duration;

use axum::routing::get;
use axum::Router;

use crate::gate::{authorize, Action, Resource};
use crate::web::state::AppState;

/// Build the full application router with middleware applied.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.web.request_timeout_seconds);

    let router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/store/collections/",
            get(authorize(
                Resource::Collections,
                Action::List,
                handlers::collections::list_collections,
            ))
            .post(authorize(
                Resource::Collections,
                Action::Create,
                handlers::collections::create_collection,
            )),
        )
        .route(
            "/store/collections/{id}/",
            get(authorize(
                Resource::Collections,
                Action::Retrieve,
                handlers::collections::get_collection,
            ))
            .put(authorize(
                Resource::Collections,
                Action::Replace,
                handlers::collections::replace_collection,
            ))
            .patch(authorize(
                Resource::Collections,
                Action::MergeUpdate,
                handlers::collections::merge_collection,
            ))
            .delete(authorize(
                Resource::Collections,
                Action::Delete,
                handlers::collections::delete_collection,
            )),
        )
        .route(
            "/store/products/",
            get(authorize(
                Resource::Products,
                Action::List,
                handlers::products::list_products,
            ))
            .post(authorize(
                Resource::Products,
                Action::Create,
                handlers::products::create_product,
            )),
        )
        .route(
            "/store/products/{id}/",
            get(authorize(
                Resource::Products,
                Action::Retrieve,
                handlers::products::get_product,
            ))
            .put(authorize(
                Resource::Products,
                Action::Replace,
                handlers::products::replace_product,
            ))
            .patch(authorize(
                Resource::Products,
                Action::MergeUpdate,
                handlers::products::merge_product,
            ))
            .delete(authorize(
                Resource::Products,
                Action::Delete,
                handlers::products::delete_product,
            )),
        )
        // Actor resolution runs before the authorize() wrappers.
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::resolve_actor,
        ));

    middleware::apply_middleware_stack(router, request_timeout).with_state(state)
}
