use crate::config::{AuthConfig, DrinksConfig};
use crate::create_app;
use crate::state::tests::create_test_state;
use axum::body::Body;
use axum::Router;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::LevelFilter;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// kid under which the test keypair is published in the mock JWKS
pub const TEST_KID: &str = "test-key-1";

/// RSA keypair minted once per test process; signing keys are expensive
/// to generate, and every fixture can share one.
pub struct TestKeyPair {
    pub private_key_pem: String,
    pub modulus_b64: String,
    pub exponent_b64: String,
}

impl TestKeyPair {
    pub fn shared() -> &'static TestKeyPair {
        static KEYS: OnceLock<TestKeyPair> = OnceLock::new();
        KEYS.get_or_init(TestKeyPair::generate)
    }

    fn generate() -> Self {
        use rsa::{pkcs8::EncodePrivateKey, rand_core::OsRng};

        let mut rng = OsRng;
        let private_key =
            RsaPrivateKey::new(&mut rng, 2048).expect("Failed to generate RSA key pair");

        let modulus_b64 = URL_SAFE_NO_PAD.encode(private_key.n().to_bytes_be());
        let exponent_b64 = URL_SAFE_NO_PAD.encode(private_key.e().to_bytes_be());

        let private_key_pem = private_key
            .to_pkcs8_pem(rsa::pkcs8::LineEnding::LF)
            .expect("Failed to export private key")
            .to_string();

        Self {
            private_key_pem,
            modulus_b64,
            exponent_b64,
        }
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Clock before epoch")
        .as_secs()
}

/// Describes the token to mint; defaults produce a token the verifier
/// accepts, individual fields can be bent to produce each failure mode.
pub struct TokenSpec {
    pub kid: String,
    pub issuer: Option<String>,
    pub audience: String,
    pub exp: u64,
    pub permissions: Option<Vec<String>>,
}

impl TokenSpec {
    pub fn valid(permissions: &[&str]) -> Self {
        Self {
            kid: TEST_KID.to_string(),
            issuer: None,
            audience: "drinks-api".to_string(),
            exp: unix_now() + 3600,
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
        }
    }

    pub fn valid_without_permissions() -> Self {
        Self {
            permissions: None,
            ..Self::valid(&[])
        }
    }

    pub fn expired(mut self) -> Self {
        self.exp = unix_now() - 3600;
        self
    }

    pub fn with_kid(mut self, kid: &str) -> Self {
        self.kid = kid.to_string();
        self
    }

    pub fn with_audience(mut self, audience: &str) -> Self {
        self.audience = audience.to_string();
        self
    }

    pub fn with_issuer(mut self, issuer: &str) -> Self {
        self.issuer = Some(issuer.to_string());
        self
    }
}

/// A mock identity provider: serves the shared test key as its JWKS and
/// mints tokens against it.
pub struct TestIdp {
    pub server: MockServer,
}

impl TestIdp {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let keys = TestKeyPair::shared();
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "keys": [{
                    "kty": "RSA",
                    "kid": TEST_KID,
                    "use": "sig",
                    "alg": "RS256",
                    "n": keys.modulus_b64,
                    "e": keys.exponent_b64,
                }]
            })))
            .mount(&server)
            .await;

        Self { server }
    }

    pub fn auth_config(&self) -> AuthConfig {
        DrinksConfig::for_test_with_mocks(&self.server).auth
    }

    fn issuer(&self) -> String {
        format!("{}/", self.server.uri())
    }

    /// Mint an RS256 token described by `spec`
    pub fn token(&self, spec: TokenSpec) -> String {
        let claims = json!({
            "iss": spec.issuer.unwrap_or_else(|| self.issuer()),
            "sub": "auth0|tester",
            "aud": spec.audience,
            "iat": unix_now(),
            "exp": spec.exp,
            "permissions": spec.permissions,
        });

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(spec.kid);

        let key = EncodingKey::from_rsa_pem(TestKeyPair::shared().private_key_pem.as_bytes())
            .expect("Failed to create encoding key");
        encode(&header, &claims, &key).expect("Failed to encode token")
    }

    /// Mint a token signed with a symmetric key, as an algorithm-confusion
    /// attacker would
    pub fn hs256_token(&self, permissions: &[&str]) -> String {
        let claims = json!({
            "iss": self.issuer(),
            "sub": "auth0|attacker",
            "aud": "drinks-api",
            "iat": unix_now(),
            "exp": unix_now() + 3600,
            "permissions": permissions,
        });

        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(TEST_KID.to_string());

        let key = EncodingKey::from_secret(b"attacker-chosen-secret");
        encode(&header, &claims, &key).expect("Failed to encode token")
    }
}

/// Test fixture wiring the full application against a mock identity
/// provider. Requests go through the real router, middleware and store.
pub struct TestFixture {
    pub app: Router,
    pub config: DrinksConfig,
    pub idp: TestIdp,
}

impl TestFixture {
    pub async fn new() -> Self {
        // Initialize test logger
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let idp = TestIdp::start().await;
        let config = DrinksConfig::for_test_with_mocks(&idp.server);
        let state = create_test_state(config.clone());
        let app = create_app(state);

        Self { app, config, idp }
    }

    /// A token carrying exactly the given permissions
    pub fn token(&self, permissions: &[&str]) -> String {
        self.idp.token(TokenSpec::valid(permissions))
    }

    fn request_builder(
        &self,
        method: Method,
        uri: impl AsRef<str>,
        token: Option<&str>,
    ) -> http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri.as_ref());
        builder = builder.header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder
    }

    pub async fn get(&self, uri: impl AsRef<str>, token: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(Method::GET, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn post<T: Serialize>(
        &self,
        uri: impl AsRef<str>,
        body: &T,
        token: Option<&str>,
    ) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        let request = self
            .request_builder(Method::POST, uri, token)
            .body(Body::from(json_body))
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn patch<T: Serialize>(
        &self,
        uri: impl AsRef<str>,
        body: &T,
        token: Option<&str>,
    ) -> TestResponse {
        let json_body = serde_json::to_vec(body).expect("Failed to serialize body to JSON");
        let request = self
            .request_builder(Method::PATCH, uri, token)
            .body(Body::from(json_body))
            .expect("Failed to build request");
        self.send(request).await
    }

    pub async fn delete(&self, uri: impl AsRef<str>, token: Option<&str>) -> TestResponse {
        let request = self
            .request_builder(Method::DELETE, uri, token)
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Sends a request through the router and collects the response
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Try to parse as JSON, defaulting to empty object on failure
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| json!({}))
        } else {
            json!({})
        };

        TestResponse {
            status,
            headers,
            json,
        }
    }
}

/// Response from a test request with convenient access to status, headers
/// and JSON body
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub json: Value,
}

impl TestResponse {
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            serde_json::to_string_pretty(&self.json).unwrap_or_default()
        );
        self
    }

    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Asserts the structured error body: status, `success: false` and the
    /// machine-readable error code slug
    pub fn assert_error(&self, status: StatusCode, error_code: &str) -> &Self {
        self.assert_status(status);
        assert_eq!(self.json["success"], false, "body: {}", self.json);
        assert_eq!(self.json["error_code"], error_code, "body: {}", self.json);
        self
    }

    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}

mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixture_points_auth_at_mock_idp() {
        let fixture = TestFixture::new().await;
        assert_eq!(fixture.config.auth.audience, "drinks-api");
        assert!(fixture
            .config
            .auth
            .jwks_url()
            .starts_with(&fixture.idp.server.uri()));
    }
}
