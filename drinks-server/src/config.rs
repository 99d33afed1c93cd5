use config::{Config as ConfigCrate, ConfigError};
use serde::Deserialize;

/// Main configuration structure for the drinks server
#[derive(Debug, Deserialize, Clone)]
pub struct DrinksConfig {
    /// The port the server will listen to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Identity provider configuration used to verify access tokens
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Configuration for the identity provider that issues access tokens
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    /// Identity provider domain, e.g. `my-cafe.auth0.com`
    #[serde(default)]
    pub domain: String,

    /// API identifier the `aud` claim of every token must match
    #[serde(default)]
    pub audience: String,

    /// Expected `iss` claim; derived from the domain when empty
    #[serde(default)]
    pub issuer: String,

    /// JWKS discovery endpoint; derived from the domain when empty
    #[serde(default)]
    pub jwks_url: String,
}

fn default_port() -> u16 {
    8000
}

impl AuthConfig {
    /// The expected token issuer, `https://{domain}/` unless overridden
    pub fn issuer(&self) -> String {
        if self.issuer.is_empty() {
            format!("https://{}/", self.domain)
        } else {
            self.issuer.clone()
        }
    }

    /// The JWKS endpoint, the well-known location unless overridden
    pub fn jwks_url(&self) -> String {
        if self.jwks_url.is_empty() {
            format!("https://{}/.well-known/jwks.json", self.domain)
        } else {
            self.jwks_url.clone()
        }
    }
}

impl Default for DrinksConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            auth: AuthConfig::default(),
        }
    }
}

impl DrinksConfig {
    /// Creates a new config instance from environment variables
    pub fn new() -> Result<Self, String> {
        ConfigCrate::builder()
            .add_source(
                config::Environment::with_prefix("DRINKS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(|e: ConfigError| e.to_string())?
            .try_deserialize()
            .map_err(|e: ConfigError| e.to_string())
    }

    #[cfg(test)]
    pub fn for_test_with_mocks(idp_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0, // Let the OS choose a port
            auth: AuthConfig {
                domain: "test-cafe.example.com".to_string(),
                audience: "drinks-api".to_string(),
                // Point both endpoints at the mock identity provider
                issuer: format!("{}/", idp_mock.uri()),
                jwks_url: format!("{}/.well-known/jwks.json", idp_mock.uri()),
            },
        }
    }
}
