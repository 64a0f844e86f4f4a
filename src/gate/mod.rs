//! # Access Validation Gate
//!
//! Declarative route-level access control for the catalog API. Routes wrap
//! their handlers with [`authorize`]:
//!
//! ```rust,ignore
//! use storefront_core::gate::{authorize, Action, Resource};
//!
//! Router::new()
//!     .route(
//!         "/store/collections/",
//!         post(authorize(Resource::Collections, Action::Create, create_collection)),
//!     )
//! ```
//!
//! The wrapper extracts the [`Actor`] placed in request extensions by the auth
//! middleware and runs [`check_access`] BEFORE the inner handler is invoked,
//! so authentication and authorization failures are reported regardless of
//! payload content — including bodies that would not even deserialize.
//!
//! Decision order is fixed: authentication (401), then authorization (403),
//! then the inner handler performs field validation (400). Read operations
//! bypass the first two checks entirely.

pub mod validation;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use axum::extract::Request;
use axum::handler::Handler;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::web::errors::{ApiError, AuthFailureReason, AuthFailureSeverity};

/// The authenticated (or anonymous) identity a request acts as.
///
/// Produced by the auth middleware for every request. The two-tier role model
/// is a plain `admin` flag; extend to a permission set if more roles emerge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Identity description (API key description, or "anonymous").
    pub subject: String,
    /// Whether the request presented valid credentials.
    pub authenticated: bool,
    /// Whether the credentials grant catalog administration rights.
    pub admin: bool,
}

impl Actor {
    /// An unauthenticated request.
    pub fn anonymous() -> Self {
        Self {
            subject: "anonymous".to_string(),
            authenticated: false,
            admin: false,
        }
    }

    /// The actor used when authentication is disabled in configuration;
    /// every operation is allowed.
    pub fn trusted() -> Self {
        Self {
            subject: "auth-disabled".to_string(),
            authenticated: true,
            admin: true,
        }
    }
}

/// Resources exposed by the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Collections,
    Products,
    /// Health endpoints - public, no auth required.
    Health,
}

impl Resource {
    /// Check if this resource is public (no authentication required).
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(self, Self::Health)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Collections => "collections",
            Self::Products => "products",
            Self::Health => "health",
        })
    }
}

/// Operations on catalog resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Create new resource (POST)
    Create,
    /// Read single resource (GET by id)
    Retrieve,
    /// List resources (GET collection)
    List,
    /// Full replace (PUT)
    Replace,
    /// Partial merge update (PATCH)
    MergeUpdate,
    /// Delete resource (DELETE)
    Delete,
}

impl Action {
    /// Mutating actions require an authenticated administrator; reads do not.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, Self::Retrieve | Self::List)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create",
            Self::Retrieve => "retrieve",
            Self::List => "list",
            Self::Replace => "replace",
            Self::MergeUpdate => "merge_update",
            Self::Delete => "delete",
        })
    }
}

/// Combines a resource and an action for declarative route authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceAction {
    pub resource: Resource,
    pub action: Action,
}

impl ResourceAction {
    #[must_use]
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// Whether this resource+action pair is open to any actor.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.resource.is_public() || !self.action.is_mutating()
    }
}

/// Access denial outcomes, in decision order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    /// The operation requires credentials and none (valid) were presented.
    Unauthenticated,
    /// Credentials are valid but lack the administrator role.
    Forbidden,
}

/// Pure access decision: authentication, then authorization.
///
/// Read operations (`Retrieve`, `List`) and public resources pass for any
/// actor. Mutating operations require `authenticated` first (otherwise
/// [`AccessDenied::Unauthenticated`]), then `admin` (otherwise
/// [`AccessDenied::Forbidden`]).
pub fn check_access(actor: &Actor, required: ResourceAction) -> Result<(), AccessDenied> {
    if required.is_open() {
        return Ok(());
    }
    if !actor.authenticated {
        return Err(AccessDenied::Unauthenticated);
    }
    if !actor.admin {
        return Err(AccessDenied::Forbidden);
    }
    Ok(())
}

/// Wraps a handler with resource+action access checking.
///
/// The check happens before the inner handler is invoked, and before any
/// request body deserialization occurs.
pub fn authorize<H, T, S>(resource: Resource, action: Action, handler: H) -> AuthorizedHandler<H>
where
    H: Handler<T, S>,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    AuthorizedHandler {
        required: ResourceAction::new(resource, action),
        inner: handler,
    }
}

/// Handler wrapper that performs the access check before delegating to the
/// inner handler.
#[derive(Clone)]
pub struct AuthorizedHandler<H> {
    required: ResourceAction,
    inner: H,
}

impl<H> AuthorizedHandler<H> {
    /// Get the resource being protected.
    pub fn resource(&self) -> Resource {
        self.required.resource
    }

    /// Get the action being performed.
    pub fn action(&self) -> Action {
        self.required.action
    }
}

impl<H, T, S> Handler<T, S> for AuthorizedHandler<H>
where
    H: Handler<T, S> + Clone + Send + 'static,
    T: 'static,
    S: Clone + Send + Sync + 'static,
{
    type Future = Pin<Box<dyn Future<Output = Response> + Send>>;

    fn call(self, req: Request, state: S) -> Self::Future {
        Box::pin(async move {
            if self.required.is_open() {
                return self.inner.call(req, state).await.into_response();
            }

            let actor = match req.extensions().get::<Actor>() {
                Some(actor) => actor.clone(),
                None => {
                    // The middleware always inserts an actor; missing means a
                    // misconfigured router.
                    warn!(
                        resource = %self.required.resource,
                        action = %self.required.action,
                        "Actor missing from request extensions"
                    );
                    return ApiError::auth_error(
                        "Actor not found - auth middleware may not have run",
                    )
                    .into_response();
                }
            };

            match check_access(&actor, self.required) {
                Ok(()) => self.inner.call(req, state).await.into_response(),
                Err(AccessDenied::Unauthenticated) => {
                    warn!(
                        resource = %self.required.resource,
                        action = %self.required.action,
                        "Unauthenticated request to protected route"
                    );
                    ApiError::auth_error_with_context(
                        "Authentication required",
                        AuthFailureReason::Missing,
                        AuthFailureSeverity::Low,
                    )
                    .into_response()
                }
                Err(AccessDenied::Forbidden) => {
                    warn!(
                        subject = %actor.subject,
                        resource = %self.required.resource,
                        action = %self.required.action,
                        "Permission denied at route level"
                    );
                    ApiError::authorization_error_with_context(
                        format!(
                            "Administrator role required for {}:{}",
                            self.required.resource, self.required.action
                        ),
                        AuthFailureSeverity::Medium,
                    )
                    .into_response()
                }
            }
        })
    }
}

impl<H> fmt::Debug for AuthorizedHandler<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedHandler")
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}
