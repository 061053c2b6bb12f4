use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Application credentials registered with the login server.
///
/// The Basic authorization token is derived once at construction and reused
/// for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct Credentials {
    client_id: String,
    basic_token: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl AsRef<str>) -> Self {
        let client_id = client_id.into();
        let basic_token = STANDARD.encode(format!("{}:{}", client_id, client_secret.as_ref()));
        Self {
            client_id,
            basic_token,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Value for the `Authorization` header, including the scheme
    pub fn authorization_header(&self) -> String {
        format!("Basic {}", self.basic_token)
    }
}
