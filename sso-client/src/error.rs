use http::StatusCode;
use thiserror::Error;

/// Errors from the token and revocation endpoints
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to reach the login server: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Login server rejected the request (status {status}): {body}")]
    Provider { status: StatusCode, body: String },

    #[error("Login server returned an unexpected token payload: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl TokenError {
    /// The raw provider error body, when the provider answered at all
    pub fn provider_body(&self) -> Option<&str> {
        match self {
            TokenError::Provider { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Errors from the signing key set
#[derive(Debug, Error)]
pub enum KeysError {
    #[error("Failed to fetch the signing key set: {0}")]
    SourceUnavailable(#[from] reqwest::Error),

    #[error("Key set endpoint answered with status {0}")]
    SourceStatus(StatusCode),

    #[error("Key set contained unusable key material: {0}")]
    Malformed(String),

    #[error("No signing key with id {0:?} is published")]
    KeyNotFound(String),
}

/// Errors from identity token verification
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Identity token could not be parsed: {0}")]
    MalformedToken(jsonwebtoken::errors::Error),

    #[error("Identity token signature is invalid")]
    SignatureInvalid,

    #[error("Identity token {0} claim was rejected")]
    ClaimsRejected(&'static str),

    #[error("Identity token has expired")]
    TokenExpired,

    #[error("Subject claim {0:?} is not in the expected namespace:realm:id form")]
    MalformedSubject(String),

    #[error(transparent)]
    Keys(#[from] KeysError),
}

/// Errors from the full authorization flow
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Verify(#[from] VerifyError),
}

impl FlowError {
    pub fn provider_body(&self) -> Option<&str> {
        match self {
            FlowError::Token(e) => e.provider_body(),
            FlowError::Verify(_) => None,
        }
    }
}
