//! # Authentication Middleware
//!
//! Resolves the [`Actor`] for every request and stores it in request
//! extensions for the authorization wrapper and handlers.
//!
//! Resolution rules:
//! - auth disabled in configuration → trusted actor, every operation allowed
//! - no `Authorization` header → anonymous actor (read operations still work)
//! - malformed header or unknown key → 401 immediately
//! - valid bearer key → actor with the key's subject and admin flag

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::gate::Actor;
use crate::web::errors::{ApiError, AuthFailureReason, AuthFailureSeverity};
use crate::web::state::AppState;

/// Actor-resolution middleware, applied to the whole router.
pub async fn resolve_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.auth.enabled {
        debug!("Authentication disabled - treating request as trusted");
        request.extensions_mut().insert(Actor::trusted());
        return Ok(next.run(request).await);
    }

    let actor = match request.headers().get("authorization") {
        None => Actor::anonymous(),
        Some(header) => {
            let header = header.to_str().map_err(|_| {
                ApiError::auth_error_with_context(
                    "Invalid authorization header format",
                    AuthFailureReason::Malformed,
                    AuthFailureSeverity::High,
                )
            })?;

            let token = extract_bearer_token(header)?;

            state.api_keys.validate_key(token).map_err(|e| {
                warn!(error = %e, "API key validation failed");
                ApiError::auth_error_with_context(
                    "Invalid API key",
                    AuthFailureReason::Invalid,
                    AuthFailureSeverity::High,
                )
            })?
        }
    };

    debug!(
        subject = %actor.subject,
        authenticated = actor.authenticated,
        admin = actor.admin,
        "Resolved request actor"
    );

    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}

/// Extract Bearer token from Authorization header
fn extract_bearer_token(auth_header: &str) -> Result<&str, ApiError> {
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::auth_error_with_context(
            "Authorization header must use Bearer scheme",
            AuthFailureReason::Malformed,
            AuthFailureSeverity::High,
        )
    })?;

    if token.is_empty() {
        return Err(ApiError::auth_error_with_context(
            "Empty Bearer token",
            AuthFailureReason::Malformed,
            AuthFailureSeverity::High,
        ));
    }

    Ok(token)
}
