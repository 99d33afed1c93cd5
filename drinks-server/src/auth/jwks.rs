use jsonwebtoken::DecodingKey;
use log::{debug, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors that can occur while resolving signing keys
#[derive(Debug, Error)]
pub enum JwksError {
    #[error("Failed to fetch key set: {0}")]
    Fetch(String),
    #[error("Failed to parse key set: {0}")]
    Parse(String),
    #[error("No key found for kid {0}")]
    KeyNotFound(String),
    #[error("Key material is not usable: {0}")]
    BadKey(String),
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(String),
}

/// A single public signing key published by the identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: String,
    #[serde(rename = "use", default)]
    pub usage: Option<String>,
    #[serde(default)]
    pub alg: Option<String>,
    /// RSA modulus, base64url encoded
    pub n: String,
    /// RSA public exponent, base64url encoded
    pub e: String,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

/// Fetches the identity provider's key set and keeps it cached by kid.
///
/// There is no expiry on the cache; a lookup that misses refetches the
/// set once, which is what tolerates key rotation. Fetches are read-only
/// and idempotent, so concurrent in-flight requests may fetch redundantly
/// without needing mutual exclusion beyond the map swap.
pub struct JwksClient {
    http: reqwest::Client,
    jwks_url: String,
    keys: RwLock<HashMap<String, Jwk>>,
}

impl JwksClient {
    pub fn new(jwks_url: String) -> Result<Self, JwksError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(2))
            .build()
            .map_err(|e| JwksError::HttpClient(e.to_string()))?;

        Ok(Self {
            http,
            jwks_url,
            keys: RwLock::new(HashMap::new()),
        })
    }

    /// Fetch the key set from the well-known endpoint
    async fn fetch(&self) -> Result<HashMap<String, Jwk>, JwksError> {
        debug!("Fetching JWKS from {}", self.jwks_url);

        let response = self
            .http
            .get(&self.jwks_url)
            .send()
            .await
            .map_err(|e| JwksError::Fetch(e.to_string()))?;

        if !response.status().is_success() {
            return Err(JwksError::Fetch(format!("HTTP {}", response.status())));
        }

        let set: JwkSet = response
            .json()
            .await
            .map_err(|e| JwksError::Parse(e.to_string()))?;

        debug!("Fetched JWKS with {} keys", set.keys.len());
        Ok(set
            .keys
            .into_iter()
            .map(|key| (key.kid.clone(), key))
            .collect())
    }

    /// Look up the key matching `kid` and build a decoding key from it.
    ///
    /// A miss against the cached set triggers a single refetch before
    /// giving up, so freshly rotated keys resolve without a restart.
    pub async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, JwksError> {
        if let Some(jwk) = self.keys.read().await.get(kid) {
            return decoding_key_from_jwk(jwk);
        }

        warn!("Key {} not in cached JWKS, refetching", kid);
        let fresh = self.fetch().await?;
        let mut keys = self.keys.write().await;
        *keys = fresh;

        match keys.get(kid) {
            Some(jwk) => decoding_key_from_jwk(jwk),
            None => Err(JwksError::KeyNotFound(kid.to_string())),
        }
    }
}

fn decoding_key_from_jwk(jwk: &Jwk) -> Result<DecodingKey, JwksError> {
    if jwk.kty != "RSA" {
        return Err(JwksError::BadKey(format!(
            "unsupported key type {}",
            jwk.kty
        )));
    }
    if jwk.usage.as_deref().is_some_and(|u| u != "sig") {
        return Err(JwksError::BadKey(format!(
            "key {} is not a signing key",
            jwk.kid
        )));
    }
    if jwk.alg.as_deref().is_some_and(|a| a != "RS256") {
        return Err(JwksError::BadKey(format!(
            "key {} is not an RS256 key",
            jwk.kid
        )));
    }
    DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|e| JwksError::BadKey(e.to_string()))
}
