use crate::config::RelayConfig;
use reqwest::Client;
use sso_client::{Credentials, FlowParams, IdentityVerifier, KeySetCache, TokenClient};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub tokens: Arc<TokenClient>,
    pub verifier: Arc<IdentityVerifier>,
    flow_params: FlowParams,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, io::Error> {
        let http = Self::create_sso_http_client(config.sso.request_timeout);

        let authorize_url = parse_url(&config.sso.authorize_url, "authorize URL")?;
        let token_url = parse_url(&config.sso.token_url, "token URL")?;
        let revoke_url = parse_url(&config.sso.revoke_url, "revoke URL")?;
        let jwks_url = parse_url(&config.sso.jwks_url, "JWKS URL")?;

        let credentials = Credentials::new(&config.sso.client_id, &config.sso.client_secret);
        let tokens = Arc::new(TokenClient::new(
            http.clone(),
            credentials,
            token_url,
            revoke_url,
        ));
        let keys = Arc::new(KeySetCache::new(http, jwks_url));
        let verifier = Arc::new(IdentityVerifier::new(keys, &config.sso.client_id));

        let flow_params = FlowParams {
            authorize_url,
            redirect_uri: config.callback_url(),
            client_id: config.sso.client_id.clone(),
            scope: config.sso.scope.clone(),
        };

        Ok(Self {
            config: Arc::new(config),
            tokens,
            verifier,
            flow_params,
        })
    }

    /// Parameters for a fresh per-request authorization flow
    pub fn flow_params(&self) -> FlowParams {
        self.flow_params.clone()
    }

    fn create_sso_http_client(timeout_secs: u64) -> Client {
        // One shared client for all login server calls, with bounded
        // timeouts so a slow provider cannot stall a request forever
        Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(2))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Some(Duration::from_secs(90)))
            .build()
            .expect("Failed to create SSO client")
    }
}

fn parse_url(raw: &str, what: &str) -> Result<Url, io::Error> {
    Url::parse(raw).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid {what} {raw:?}: {e}"),
        )
    })
}
