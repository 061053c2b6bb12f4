use crate::error::{KeysError, VerifyError};
use crate::keys::KeySetCache;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, DecodingKey, Validation};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Issuer spellings the login server has been observed to use. Older tokens
/// carry the bare hostname, newer ones the full URL.
const ACCEPTED_ISSUERS: [&str; 2] = ["login.eveonline.com", "https://login.eveonline.com"];

/// Audience value the login server adds alongside the client id.
const PROVIDER_AUDIENCE: &str = "EVE Online";

/// `aud` is a bare string on some tokens and an array on others.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Claims extracted from a signature-verified identity token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IdentityClaims {
    /// Provider-namespaced subject, e.g. `CHARACTER:EVE:2112625428`
    pub sub: String,
    /// Character display name
    pub name: String,
    /// Opaque hash that changes when the character changes hands
    pub owner: String,
    pub iss: String,
    pub aud: Audience,
    pub iat: i64,
    pub exp: i64,
    /// Granted scopes; a bare string for a single scope, an array otherwise
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scp: Option<serde_json::Value>,
}

impl IdentityClaims {
    /// Numeric character id, taken from the final colon-segment of `sub`.
    pub fn character_id(&self) -> Result<u64, VerifyError> {
        let segments: Vec<&str> = self.sub.split(':').collect();
        if segments.len() < 3 {
            return Err(VerifyError::MalformedSubject(self.sub.clone()));
        }
        segments
            .last()
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| VerifyError::MalformedSubject(self.sub.clone()))
    }
}

/// Validates identity tokens against the published signing key set.
pub struct IdentityVerifier {
    keys: Arc<KeySetCache>,
    client_id: String,
}

impl IdentityVerifier {
    pub fn new(keys: Arc<KeySetCache>, client_id: impl Into<String>) -> Self {
        Self {
            keys,
            client_id: client_id.into(),
        }
    }

    /// Verify the token's signature and temporal claims, then extract the
    /// identity claims. Claims are only ever produced from a token that
    /// passed verification.
    pub async fn verify(&self, token: &str) -> Result<IdentityClaims, VerifyError> {
        let header = decode_header(token).map_err(VerifyError::MalformedToken)?;
        let kid = header
            .kid
            .ok_or_else(|| VerifyError::MalformedToken(ErrorKind::InvalidToken.into()))?;
        debug!("Verifying identity token signed with key {kid:?}");

        let jwk = self.keys.get_key(&kid).await?;
        let decoding_key =
            DecodingKey::from_jwk(&jwk).map_err(|e| KeysError::Malformed(e.to_string()))?;

        let mut validation = Validation::new(header.alg);
        validation.set_issuer(&ACCEPTED_ISSUERS);
        validation.set_audience(&[self.client_id.as_str(), PROVIDER_AUDIENCE]);

        let data = decode::<IdentityClaims>(token, &decoding_key, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => VerifyError::TokenExpired,
                ErrorKind::InvalidSignature => VerifyError::SignatureInvalid,
                ErrorKind::InvalidAudience => VerifyError::ClaimsRejected("audience"),
                ErrorKind::InvalidIssuer => VerifyError::ClaimsRejected("issuer"),
                ErrorKind::ImmatureSignature => VerifyError::ClaimsRejected("issue time"),
                _ => VerifyError::MalformedToken(e),
            })?;

        // Reject tokens whose subject we could never turn into an identity
        data.claims.character_id()?;
        Ok(data.claims)
    }
}
