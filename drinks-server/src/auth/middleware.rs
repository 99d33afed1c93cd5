use super::extract::bearer_token;
use super::{check_permission, AuthError};
use crate::state::AppState;
use axum::{body::Body, http::Request, middleware::Next, response::Response};
use http::header::AUTHORIZATION;
use log::{debug, warn};

/// Per-route authorization guard.
///
/// Composed at route registration via `axum::middleware::from_fn` with the
/// state and required permission captured in the closure. Runs the three
/// pipeline stages in order and only then invokes the wrapped handler:
/// extract the bearer token, verify it against the key set, check the
/// permission. The verified claims are left in the request extensions for
/// handlers that care about caller identity.
pub async fn authorize(
    state: AppState,
    permission: &'static str,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            AuthError::MalformedHeader("Authorization header must be Bearer token".to_string())
        })?),
        None => None,
    };

    let token = bearer_token(header).inspect_err(|_| {
        warn!("Attempt to access protected resource without a usable bearer token");
    })?;

    let claims = state.verifier.verify(token).await?;
    check_permission(permission, &claims)?;
    debug!("Authorized {:?} for {:?}", claims.sub, permission);

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
