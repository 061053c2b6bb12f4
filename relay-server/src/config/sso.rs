//! Login server (EVE SSO) configuration

use confique::Config;

/// Endpoints and credentials for the login server
#[derive(Debug, Config, Clone)]
pub struct SsoConfig {
    /// Application client id issued by the login server
    #[config(env = "RELAY_SSO_CLIENT_ID", default = "")]
    pub client_id: String,

    /// Application client secret issued by the login server
    #[config(env = "RELAY_SSO_CLIENT_SECRET", default = "")]
    pub client_secret: String,

    /// Authorization endpoint the user-agent is redirected to
    #[config(
        env = "RELAY_SSO_AUTHORIZE_URL",
        default = "https://login.eveonline.com/v2/oauth/authorize"
    )]
    pub authorize_url: String,

    /// Token endpoint for code exchange and refresh
    #[config(
        env = "RELAY_SSO_TOKEN_URL",
        default = "https://login.eveonline.com/v2/oauth/token"
    )]
    pub token_url: String,

    /// Revocation endpoint
    #[config(
        env = "RELAY_SSO_REVOKE_URL",
        default = "https://login.eveonline.com/v2/oauth/revoke"
    )]
    pub revoke_url: String,

    /// Published signing key set (JWKS) endpoint
    #[config(
        env = "RELAY_SSO_JWKS_URL",
        default = "https://login.eveonline.com/oauth/jwks"
    )]
    pub jwks_url: String,

    /// Scopes requested during authorization (default: publicData)
    #[config(env = "RELAY_SSO_SCOPE", default = "publicData")]
    pub scope: String,

    /// Timeout for outbound login server calls in seconds (default: 10)
    #[config(env = "RELAY_SSO_REQUEST_TIMEOUT", default = 10)]
    pub request_timeout: u64,
}
