//! RS256 test keypair helpers shared by the verifier and flow tests.
//!
//! A real 2048-bit key is generated once per test binary and exposed both as
//! a JWKS document (for the mocked key set endpoint) and as a PEM signing key
//! (for minting tokens).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use rsa::pkcs1::{EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;
use serde::Serialize;
use serde_json::json;
use std::sync::OnceLock;

pub const TEST_KID: &str = "JWT-Signature-Key";

fn private_key() -> &'static RsaPrivateKey {
    static KEY: OnceLock<RsaPrivateKey> = OnceLock::new();
    KEY.get_or_init(|| {
        RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("failed to generate test key")
    })
}

/// JWKS document matching the test signing key.
pub fn jwks_document() -> serde_json::Value {
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

/// Claims payload for minted test tokens.
#[derive(Debug, Serialize, Clone)]
pub struct TestClaims {
    pub sub: String,
    pub name: String,
    pub owner: String,
    pub iss: String,
    pub aud: serde_json::Value,
    pub iat: i64,
    pub exp: i64,
}

impl TestClaims {
    pub fn valid_for(client_id: &str) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: "CHARACTER:EVE:2112625428".to_string(),
            name: "Test Pilot".to_string(),
            owner: "8PmzCeTKb4VFUDrHLc/AeZXDSWM=".to_string(),
            iss: "login.eveonline.com".to_string(),
            aud: json!([client_id, "EVE Online"]),
            iat: now,
            exp: now + 1200,
        }
    }

    pub fn expired_for(client_id: &str) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            iat: now - 7200,
            exp: now - 3600,
            ..Self::valid_for(client_id)
        }
    }
}

pub fn sign(claims: TestClaims) -> String {
    sign_with_kid(claims, TEST_KID)
}

pub fn sign_with_kid(claims: TestClaims, kid: &str) -> String {
    let pem = private_key()
        .to_pkcs1_pem(LineEnding::LF)
        .expect("failed to encode test key");
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).expect("failed to load test key");

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    encode(&header, &claims, &key).expect("failed to sign test token")
}
