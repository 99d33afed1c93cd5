use crate::errors::ApiError;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

pub mod extract;
pub mod jwks;
pub mod middleware;
pub mod verify;

pub use verify::Claims;

/// Permission strings recognized by the drinks API
pub mod permissions {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}

/// Failures of the request-authorization pipeline. Every variant maps to
/// 401 except `Forbidden`, which is the only 403: the caller presented a
/// valid token that simply lacks the required permission.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authorization header is expected")]
    MissingHeader,
    #[error("{0}")]
    MalformedHeader(String),
    #[error("{0}")]
    InvalidHeader(String),
    #[error("Token is expired")]
    TokenExpired,
    #[error("{0}")]
    InvalidClaims(String),
    #[error("You are not authorized to access this resource")]
    Forbidden,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (error_code, status) = match &self {
            AuthError::MissingHeader => ("authorization_header_missing", StatusCode::UNAUTHORIZED),
            AuthError::MalformedHeader(_) | AuthError::InvalidHeader(_) => {
                ("invalid_header", StatusCode::UNAUTHORIZED)
            }
            AuthError::TokenExpired => ("token_expired", StatusCode::UNAUTHORIZED),
            AuthError::InvalidClaims(_) => ("invalid_claims", StatusCode::UNAUTHORIZED),
            AuthError::Forbidden => ("forbidden", StatusCode::FORBIDDEN),
        };
        ApiError::new(error_code, self.to_string(), status).into_response()
    }
}

/// Checks that a verified claims payload carries the required permission.
///
/// An empty `required` string means a valid token is sufficient on its
/// own. A token without any `permissions` claim signals an identity
/// provider that is not configured for role-based access control, which
/// is a claims problem (401) rather than an authorization refusal (403).
pub fn check_permission(required: &str, claims: &Claims) -> Result<(), AuthError> {
    if required.is_empty() {
        return Ok(());
    }

    let permissions = claims.permissions.as_ref().ok_or_else(|| {
        AuthError::InvalidClaims(
            "Incorrect claims, please check the role-based access control settings".to_string(),
        )
    })?;

    if !permissions.iter().any(|p| p == required) {
        return Err(AuthError::Forbidden);
    }

    Ok(())
}
