//! Key provider fetching published key files over HTTP(S).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::is_epoch_encoding;
use super::key_file::KeyFile;
use crate::domain::entities::EpochKeys;
use crate::ports::outbound::{EpochKeyProvider, KeyLookupError};

/// Reference location of published key files.
pub const DEFAULT_KEY_URL: &str =
    "https://raw.githubusercontent.com/explainers-by-googlers/prtoken-reference/main/published_keys";

/// Fetches `<base_url>/<epoch_id_encoding>.json`.
#[derive(Debug, Clone)]
pub struct HttpKeyProvider {
    client: Client,
    base_url: String,
}

impl HttpKeyProvider {
    /// Create a provider over a base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self, KeyLookupError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| KeyLookupError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// URL of the key file for an epoch.
    pub fn key_url(&self, epoch_id_encoding: &str) -> String {
        format!("{}/{}.json", self.base_url, epoch_id_encoding)
    }
}

#[async_trait]
impl EpochKeyProvider for HttpKeyProvider {
    async fn lookup(&self, epoch_id_encoding: &str) -> Result<EpochKeys, KeyLookupError> {
        if !is_epoch_encoding(epoch_id_encoding) {
            return Err(KeyLookupError::NotFound(epoch_id_encoding.to_string()));
        }

        let url = self.key_url(epoch_id_encoding);
        debug!(%url, "Fetching key file");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| KeyLookupError::Transport(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(KeyLookupError::NotFound(epoch_id_encoding.to_string()))
            }
            status if !status.is_success() => {
                return Err(KeyLookupError::Transport(format!(
                    "{url}: HTTP {status}"
                )))
            }
            _ => {}
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| KeyLookupError::Transport(e.to_string()))?;

        KeyFile::from_slice(&body)?.to_epoch_keys()
    }
}
