pub mod sso;

use crate::config::sso::SsoConfig;
use confique::Config;

/// Main configuration for the relay server, loaded from the environment.
#[derive(Debug, Config, Clone)]
pub struct RelayConfig {
    /// The port the relay listens on (default: 3000)
    #[config(env = "RELAY_PORT", default = 3000)]
    pub port: u16,

    /// Public base URL of this relay, used to build the callback redirect
    /// and the refresh/revoke action links (default: http://localhost:3000)
    #[config(env = "RELAY_PUBLIC_URL", default = "http://localhost:3000")]
    pub public_url: String,

    /// Login server configuration
    #[config(nested)]
    pub sso: SsoConfig,
}

impl RelayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, confique::Error> {
        Self::builder().env().load()
    }

    /// Redirect URI registered with the login server
    pub fn callback_url(&self) -> String {
        format!(
            "{}/api/auth/callback/eveonline",
            self.public_url.trim_end_matches('/')
        )
    }

    #[cfg(test)]
    pub fn for_test_with_mock(sso_mock: &wiremock::MockServer) -> Self {
        Self {
            port: 0,
            public_url: "http://localhost:3000".to_string(),
            sso: SsoConfig {
                client_id: "test-client-id".to_string(),
                client_secret: "test-client-secret".to_string(),
                authorize_url: format!("{}/v2/oauth/authorize", sso_mock.uri()),
                token_url: format!("{}/v2/oauth/token", sso_mock.uri()),
                revoke_url: format!("{}/v2/oauth/revoke", sso_mock.uri()),
                jwks_url: format!("{}/oauth/jwks", sso_mock.uri()),
                scope: "publicData".to_string(),
                request_timeout: 5,
            },
        }
    }
}
