use crate::error::FlowError;
use crate::token::{ProviderTokenResponse, TokenClient};
use crate::verifier::{IdentityClaims, IdentityVerifier};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use log::{debug, info};
use rand::Rng;
use std::sync::Arc;
use url::Url;

/// Progress of a single authorization attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    AwaitingCallback,
    Exchanging,
    Verifying,
    Complete,
    Failed,
}

/// Where to send the user-agent, plus the anti-replay state value baked into
/// the URL.
#[derive(Debug, Clone)]
pub struct RedirectTarget {
    pub url: Url,
    pub state: String,
}

/// Result of a completed authorization: the issued token pair and the
/// verified identity behind it.
#[derive(Debug, Clone)]
pub struct AuthorizationOutcome {
    pub tokens: ProviderTokenResponse,
    pub claims: IdentityClaims,
}

/// Static parameters of the authorization step.
#[derive(Debug, Clone)]
pub struct FlowParams {
    pub authorize_url: Url,
    pub redirect_uri: String,
    pub client_id: String,
    pub scope: String,
}

/// Drives one authorization attempt through
/// `Idle -> AwaitingCallback -> Exchanging -> Verifying -> Complete`,
/// dropping to `Failed` from any active state.
///
/// One instance per incoming flow; refresh and revocation are stateless
/// pass-throughs on the [`TokenClient`] and do not go through here. The
/// redirect and the callback arrive as separate requests, so a callback
/// is also accepted on a fresh instance that never issued a redirect:
/// [`handle_callback`](Self::handle_callback) enters `Exchanging` from
/// `Idle` as well as from `AwaitingCallback`.
pub struct AuthorizationFlow {
    tokens: Arc<TokenClient>,
    verifier: Arc<IdentityVerifier>,
    params: FlowParams,
    state: FlowState,
}

impl AuthorizationFlow {
    pub fn new(
        tokens: Arc<TokenClient>,
        verifier: Arc<IdentityVerifier>,
        params: FlowParams,
    ) -> Self {
        Self {
            tokens,
            verifier,
            params,
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Build the provider authorization URL with a fresh anti-replay state
    /// value.
    ///
    /// The state value is generated but not compared on callback: doing so
    /// would need server-side session storage, which this relay does not
    /// keep. Known limitation.
    pub fn begin_authorization(&mut self) -> RedirectTarget {
        let state = generate_state_value();
        let mut url = self.params.authorize_url.clone();
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.params.redirect_uri)
            .append_pair("client_id", &self.params.client_id)
            .append_pair("scope", &self.params.scope)
            .append_pair("state", &state);

        debug!("Issued authorization redirect with state {state}");
        self.state = FlowState::AwaitingCallback;
        RedirectTarget { url, state }
    }

    /// Exchange the callback code for tokens and verify the identity token
    /// behind them.
    ///
    /// Callable from `Idle` as well as `AwaitingCallback`, since the
    /// authorization redirect is usually issued by a different instance
    /// than the one receiving the callback.
    pub async fn handle_callback(
        &mut self,
        code: &str,
    ) -> Result<AuthorizationOutcome, FlowError> {
        self.state = FlowState::Exchanging;
        let tokens = match self.tokens.exchange_code(code).await {
            Ok(tokens) => tokens,
            Err(e) => {
                self.state = FlowState::Failed;
                return Err(e.into());
            }
        };

        self.state = FlowState::Verifying;
        let claims = match self.verifier.verify(&tokens.access_token).await {
            Ok(claims) => claims,
            Err(e) => {
                self.state = FlowState::Failed;
                return Err(e.into());
            }
        };

        self.state = FlowState::Complete;
        info!("Authorized character {:?} ({})", claims.name, claims.sub);
        Ok(AuthorizationOutcome { tokens, claims })
    }
}

/// 256 bits of randomness, base64url without padding.
fn generate_state_value() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    URL_SAFE_NO_PAD.encode(bytes)
}
