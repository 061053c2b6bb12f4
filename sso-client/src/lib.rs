//! # sso-client
//!
//! Client for the EVE Online SSO OAuth2 Authorization Code flow.
//!
//! ## Components
//!
//! - **TokenClient:** code exchange, refresh and revocation against the
//!   login server's token endpoints.
//! - **KeySetCache:** lazily fetched, process-wide cache of the published
//!   signing keys, refreshed on a key-id miss.
//! - **IdentityVerifier:** signature and temporal validation of identity
//!   tokens, yielding typed claims.
//! - **AuthorizationFlow:** the redirect/callback state machine tying the
//!   pieces together.

pub mod credentials;
pub mod error;
pub mod flow;
pub mod keys;
pub mod token;
pub mod verifier;

#[cfg(test)]
mod test_keys;

pub use credentials::Credentials;
pub use error::{FlowError, KeysError, TokenError, VerifyError};
pub use flow::{AuthorizationFlow, AuthorizationOutcome, FlowParams, FlowState, RedirectTarget};
pub use keys::KeySetCache;
pub use token::{ProviderTokenResponse, RevocationOutcome, TokenClient};
pub use verifier::{Audience, IdentityClaims, IdentityVerifier};
