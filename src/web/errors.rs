//! # Web API Error Types
//!
//! Request-level errors and their HTTP response conversions. Every variant is
//! an expected, user-facing outcome — nothing here panics or terminates the
//! process, and nothing is retried.
//!
//! Validation failures serialize the aggregated field→messages map verbatim as
//! the response body (the client contract); everything else uses the
//! `{"error": {"code", "message"}}` envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::gate::validation::FieldErrors;

/// Auth failure context for gateway signaling.
///
/// Included in 401/403 response headers so upstream gateways can make informed
/// rate-limiting decisions based on failure severity.
#[derive(Debug, Clone)]
pub struct AuthFailureContext {
    /// Machine-readable failure category
    pub reason: AuthFailureReason,
    /// Suggested severity for gateway action
    pub severity: AuthFailureSeverity,
}

/// Machine-readable auth failure reasons.
#[derive(Debug, Clone, Copy)]
pub enum AuthFailureReason {
    /// No credentials provided
    Missing,
    /// Credentials are invalid (unknown key)
    Invalid,
    /// Header is not valid UTF-8 or not a Bearer scheme
    Malformed,
    /// Valid auth but insufficient role
    Forbidden,
}

/// Severity levels for auth failures (signals gateway rate-limiting behavior).
#[derive(Debug, Clone, Copy)]
pub enum AuthFailureSeverity {
    /// Likely misconfiguration, not an attack (e.g. missing credentials)
    Low,
    /// Valid auth but wrong role
    Medium,
    /// Possible brute-force or fuzzing attempt
    High,
}

impl AuthFailureReason {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Invalid => "invalid",
            Self::Malformed => "malformed",
            Self::Forbidden => "forbidden",
        }
    }
}

impl AuthFailureSeverity {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    fn retry_after_seconds(&self) -> Option<u64> {
        match self {
            Self::Low => None,
            Self::Medium => Some(5),
            Self::High => Some(60),
        }
    }
}

/// Web API specific errors with HTTP status code mappings.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    #[error("Validation failed for {} field(s)", errors.len())]
    ValidationFailed { errors: FieldErrors },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationError {
        reason: String,
        /// Machine-readable failure context for gateway signaling headers
        failure_context: Option<AuthFailureContext>,
    },

    #[error("Authorization failed: {reason}")]
    AuthorizationError {
        reason: String,
        /// Machine-readable failure context for gateway signaling headers
        failure_context: Option<AuthFailureContext>,
    },

    #[error("Internal server error")]
    Internal,
}

impl ApiError {
    /// Create a NotFound error with a custom message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a ValidationFailed error carrying the aggregated field errors.
    pub fn validation_failed(errors: FieldErrors) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Create a Conflict error (409), e.g. restricted collection deletes.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create an AuthenticationError with reason (no gateway signaling context).
    pub fn auth_error(reason: impl Into<String>) -> Self {
        Self::AuthenticationError {
            reason: reason.into(),
            failure_context: None,
        }
    }

    /// Create an AuthenticationError with gateway signaling context.
    pub fn auth_error_with_context(
        reason: impl Into<String>,
        failure_reason: AuthFailureReason,
        severity: AuthFailureSeverity,
    ) -> Self {
        Self::AuthenticationError {
            reason: reason.into(),
            failure_context: Some(AuthFailureContext {
                reason: failure_reason,
                severity,
            }),
        }
    }

    /// Create an AuthorizationError with gateway signaling context.
    pub fn authorization_error_with_context(
        reason: impl Into<String>,
        severity: AuthFailureSeverity,
    ) -> Self {
        Self::AuthorizationError {
            reason: reason.into(),
            failure_context: Some(AuthFailureContext {
                reason: AuthFailureReason::Forbidden,
                severity,
            }),
        }
    }
}

fn apply_failure_context(response: &mut Response, failure_context: &Option<AuthFailureContext>) {
    if let Some(ctx) = failure_context {
        let headers = response.headers_mut();
        if let Ok(value) = ctx.reason.as_str().parse() {
            headers.insert("x-auth-failure-reason", value);
        }
        if let Ok(value) = ctx.severity.as_str().parse() {
            headers.insert("x-auth-failure-severity", value);
        }
        if let Some(retry_after) = ctx.severity.retry_after_seconds() {
            if let Ok(value) = retry_after.to_string().parse() {
                headers.insert(axum::http::header::RETRY_AFTER, value);
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // Field errors go out verbatim as the body, per the client contract.
            ApiError::ValidationFailed { errors } => {
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }

            ApiError::AuthenticationError {
                reason,
                failure_context,
            } => {
                let body = json!({
                    "error": {
                        "code": "AUTHENTICATION_FAILED",
                        "message": reason
                    }
                });
                let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
                apply_failure_context(&mut response, &failure_context);
                response
            }

            ApiError::AuthorizationError {
                reason,
                failure_context,
            } => {
                let body = json!({
                    "error": {
                        "code": "AUTHORIZATION_FAILED",
                        "message": reason
                    }
                });
                let mut response = (StatusCode::FORBIDDEN, Json(body)).into_response();
                apply_failure_context(&mut response, &failure_context);
                response
            }

            ApiError::NotFound { message } => envelope(StatusCode::NOT_FOUND, "NOT_FOUND", &message),

            ApiError::Conflict { message } => envelope(StatusCode::CONFLICT, "CONFLICT", &message),

            ApiError::Internal => envelope(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error",
            ),
        }
    }
}

fn envelope(status_code: StatusCode, error_code: &str, message: &str) -> Response {
    let body = json!({
        "error": {
            "code": error_code,
            "message": message
        }
    });
    (status_code, Json(body)).into_response()
}

/// Default mapping for catalog errors. Product handlers override the
/// `CollectionNotFound` case where a referential failure is a field error.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CollectionNotFound(_) | CatalogError::ProductNotFound(_) => {
                ApiError::not_found(err.to_string())
            }
            CatalogError::CollectionInUse { .. } => ApiError::conflict(err.to_string()),
        }
    }
}

/// Result type alias for web API operations.
pub type ApiResult<T> = Result<T, ApiError>;
