use crate::error::KeysError;
use jsonwebtoken::jwk::{Jwk, JwkSet};
use log::{debug, info};
use moka::future::Cache as MokaCache;
use tokio::sync::Mutex;
use url::Url;

/// Process-wide cache of the login server's published signing keys.
///
/// Keys are fetched lazily and kept for the lifetime of the process. A
/// presented key id that is not cached triggers exactly one refetch of the
/// key set document, which tolerates key rotation on the provider side.
/// Entries are replaced on matching key id and added otherwise.
pub struct KeySetCache {
    http: reqwest::Client,
    jwks_url: Url,
    keys: MokaCache<String, Jwk>,
    // Coalesces concurrent cache misses into a single fetch
    refresh_lock: Mutex<()>,
}

impl KeySetCache {
    pub fn new(http: reqwest::Client, jwks_url: Url) -> Self {
        Self {
            http,
            jwks_url,
            keys: MokaCache::builder().max_capacity(64).build(),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Resolve a signing key by its key id.
    ///
    /// On a miss the published key set is refetched once and merged into the
    /// cache; if the id is still absent the provider simply does not publish
    /// it and `KeysError::KeyNotFound` is returned.
    pub async fn get_key(&self, kid: &str) -> Result<Jwk, KeysError> {
        if let Some(key) = self.keys.get(kid).await {
            return Ok(key);
        }

        let _guard = self.refresh_lock.lock().await;
        // A concurrent miss may have already filled the cache
        if let Some(key) = self.keys.get(kid).await {
            return Ok(key);
        }

        debug!("Signing key {kid:?} not cached, refetching key set");
        self.refresh().await?;

        self.keys
            .get(kid)
            .await
            .ok_or_else(|| KeysError::KeyNotFound(kid.to_string()))
    }

    /// Fetch the current key set document and merge it into the cache.
    ///
    /// Public so callers can hook up a periodic refresh if they want one;
    /// duplicate refreshes are idempotent.
    pub async fn refresh(&self) -> Result<(), KeysError> {
        let response = self.http.get(self.jwks_url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(KeysError::SourceStatus(status));
        }

        let body = response.bytes().await?;
        let key_set: JwkSet =
            serde_json::from_slice(&body).map_err(|e| KeysError::Malformed(e.to_string()))?;

        let mut merged = 0;
        for key in key_set.keys {
            if let Some(kid) = key.common.key_id.clone() {
                self.keys.insert(kid, key).await;
                merged += 1;
            }
        }
        info!("Merged {merged} signing keys from {}", self.jwks_url);
        Ok(())
    }
}
