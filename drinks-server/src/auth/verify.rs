use super::jwks::{JwksClient, JwksError};
use super::AuthError;
use crate::config::AuthConfig;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use log::{debug, warn};
use serde::Deserialize;

/// The decoded payload of a verified access token. Lives only for the
/// duration of one request.
#[derive(Debug, Clone, Deserialize)]
pub struct Claims {
    pub iss: String,
    #[serde(default)]
    pub sub: Option<String>,
    pub exp: u64,
    /// Permission strings granted to the caller. Absent entirely when the
    /// identity provider does not embed permissions in its tokens.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
}

/// Verifies access tokens against the identity provider's published keys.
///
/// Only RS256 is accepted; tokens declaring any other algorithm are
/// rejected before a key is even looked up, so an attacker cannot downgrade
/// verification to a symmetric scheme keyed with public material.
pub struct TokenVerifier {
    jwks: JwksClient,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(auth: &AuthConfig) -> Result<Self, JwksError> {
        let jwks = JwksClient::new(auth.jwks_url())?;
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[auth.audience.as_str()]);
        validation.set_issuer(&[auth.issuer()]);
        Ok(Self { jwks, validation })
    }

    /// Validate a compact token string, producing its claims.
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| {
            AuthError::InvalidHeader("Unable to parse authentication token".to_string())
        })?;

        if header.alg != Algorithm::RS256 {
            return Err(AuthError::InvalidHeader(
                "Invalid header. Use an RS256 signed JWT access token".to_string(),
            ));
        }

        let kid = header.kid.ok_or_else(|| {
            AuthError::InvalidHeader("Unable to find appropriate key".to_string())
        })?;

        let key = self.jwks.decoding_key(&kid).await.map_err(|e| match e {
            JwksError::KeyNotFound(_) => {
                AuthError::InvalidHeader("Unable to find appropriate key".to_string())
            }
            other => {
                warn!("Signing key lookup failed: {}", other);
                AuthError::InvalidHeader("Unable to verify authentication token".to_string())
            }
        })?;

        let data = decode::<Claims>(token, &key, &self.validation).map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidIssuer
            | ErrorKind::InvalidAudience
            | ErrorKind::MissingRequiredClaim(_) => AuthError::InvalidClaims(
                "Incorrect claims, please check the audience and issuer".to_string(),
            ),
            _ => AuthError::InvalidHeader("Unable to parse authentication token".to_string()),
        })?;

        debug!(
            "Verified token issued by {} (exp {})",
            data.claims.iss, data.claims.exp
        );
        Ok(data.claims)
    }
}
