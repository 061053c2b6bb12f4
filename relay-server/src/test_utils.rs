use crate::config::RelayConfig;
use crate::create_app;
use crate::state::AppState;
use axum::body::Body;
use axum::Router;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use http::{Method, Request, Response, StatusCode};
use http_body_util::BodyExt;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use log::LevelFilter;
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use serde_json::{json, Value};
use std::sync::OnceLock;
use tower::ServiceExt;
use wiremock::MockServer;

/// Test fixture wiring the full router against a wiremock stand-in for the
/// login server.
pub struct TestFixture {
    pub app: Router,
    pub config: RelayConfig,
    /// Mock login server (token, revocation and JWKS endpoints)
    pub sso_mock: MockServer,
}

impl TestFixture {
    pub async fn new() -> Self {
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let sso_mock = MockServer::start().await;
        let config = RelayConfig::for_test_with_mock(&sso_mock);
        let state = AppState::new(config.clone()).expect("failed to build test state");
        let app = create_app(state).await;

        Self {
            app,
            config,
            sso_mock,
        }
    }

    /// Same fixture, but with the login server endpoints pointing at a
    /// closed port so every provider call fails at the transport level.
    pub async fn with_unreachable_sso(self) -> Self {
        let mut config = self.config.clone();
        config.sso.token_url = "http://127.0.0.1:1/v2/oauth/token".to_string();
        config.sso.revoke_url = "http://127.0.0.1:1/v2/oauth/revoke".to_string();
        config.sso.jwks_url = "http://127.0.0.1:1/oauth/jwks".to_string();

        let state = AppState::new(config.clone()).expect("failed to build test state");
        let app = create_app(state).await;
        Self {
            app,
            config,
            sso_mock: self.sso_mock,
        }
    }

    /// Sends a GET request and wraps the response for assertions.
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        let response = self.get_raw(uri).await;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        let text = String::from_utf8_lossy(&body).to_string();
        let json = serde_json::from_slice(&body).unwrap_or_else(|_| json!({}));
        TestResponse { status, json, text }
    }

    /// Sends a GET request and returns the raw response, for header
    /// assertions.
    pub async fn get_raw(&self, uri: impl AsRef<str>) -> Response<Body> {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri.as_ref())
            .body(Body::empty())
            .expect("Failed to build request");

        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }
}

/// Response from a test request with convenient access to status and body.
pub struct TestResponse {
    pub status: StatusCode,
    /// Body parsed as JSON, empty object when the body was not JSON
    pub json: Value,
    /// Raw body text
    pub text: String,
}

impl TestResponse {
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status, expected,
            "Expected status {} but got {} with body: {}",
            expected, self.status, self.text
        );
        self
    }

    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }
}

// RS256 test keypair, generated once per test binary. The public half is
// exposed as a JWKS document for the mocked key set endpoint, the private
// half signs the identity tokens under test.

pub const TEST_KID: &str = "JWT-Signature-Key";

fn private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("failed to generate test key")
    })
}

pub fn jwks_document() -> Value {
    let public = private_key().to_public_key();
    json!({
        "keys": [
            {
                "kty": "RSA",
                "kid": TEST_KID,
                "alg": "RS256",
                "use": "sig",
                "n": URL_SAFE_NO_PAD.encode(public.n().to_bytes_be()),
                "e": URL_SAFE_NO_PAD.encode(public.e().to_bytes_be()),
            }
        ]
    })
}

/// Mints a valid identity token for the given client id.
pub fn sign_identity_token(client_id: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": "CHARACTER:EVE:2112625428",
        "name": "Test Pilot",
        "owner": "8PmzCeTKb4VFUDrHLc/AeZXDSWM=",
        "iss": "login.eveonline.com",
        "aud": [client_id, "EVE Online"],
        "iat": now,
        "exp": now + 1200,
    });

    let pem = private_key()
        .to_pkcs1_pem(LineEnding::LF)
        .expect("failed to encode test key");
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("failed to load test key");

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(TEST_KID.to_string());
    encode(&header, &claims, &key).expect("failed to sign test token")
}
